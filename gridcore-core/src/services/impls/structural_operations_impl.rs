//! Implementation of StructuralOperationsService trait

use crate::dependency::DependencyGraph;
use crate::domain::Cell;
use crate::repository::CellRepository;
use crate::traits::StructuralOperationsService;
use crate::types::CellAddress;
use crate::{Result, SpreadsheetError};
use std::sync::{Arc, Mutex};

/// Concrete implementation of StructuralOperationsService
pub struct StructuralOperationsServiceImpl {
    repository: Arc<Mutex<CellRepository>>,
    dependency_graph: Arc<Mutex<DependencyGraph>>,
}

impl StructuralOperationsServiceImpl {
    /// Create a new StructuralOperationsServiceImpl
    pub fn new(
        repository: Arc<Mutex<CellRepository>>,
        dependency_graph: Arc<Mutex<DependencyGraph>>,
    ) -> Self {
        Self {
            repository,
            dependency_graph,
        }
    }

    fn shift_dependency_graph(&self, graph: &mut DependencyGraph, address: &CellAddress, new_address: CellAddress) {
        let deps = graph.get_dependencies(address);
        if !deps.is_empty() {
            graph.remove_dependencies_for(address);
            for dep in deps {
                graph.add_dependency(new_address, dep);
            }
        }
    }
}

impl StructuralOperationsService for StructuralOperationsServiceImpl {
    fn insert_rows(&self, start: u32, count: u32) -> Result<Vec<CellAddress>> {
        let mut repository = self.repository.lock().map_err(|_| {
            SpreadsheetError::LockError("Failed to acquire repository lock".to_string())
        })?;
        let mut dependency_graph = self.dependency_graph.lock().map_err(|_| {
            SpreadsheetError::LockError("Failed to acquire dependency graph lock".to_string())
        })?;

        let affected_addresses = repository.shift_rows(start, count as i32)?;

        for address in &affected_addresses {
            let new_address = CellAddress::new(address.col, address.row + count);
            self.shift_dependency_graph(&mut dependency_graph, address, new_address);
        }

        Ok(affected_addresses)
    }

    fn delete_rows(&self, start: u32, count: u32) -> Result<Vec<Cell>> {
        let mut repository = self.repository.lock().map_err(|_| {
            SpreadsheetError::LockError("Failed to acquire repository lock".to_string())
        })?;
        let mut dependency_graph = self.dependency_graph.lock().map_err(|_| {
            SpreadsheetError::LockError("Failed to acquire dependency graph lock".to_string())
        })?;

        let mut deleted_cells = Vec::new();
        for address in repository.get_all_addresses() {
            if address.row >= start && address.row < start + count {
                if let Some(cell) = repository.delete(&address) {
                    deleted_cells.push(cell);
                }
                dependency_graph.remove_dependencies_for(&address);
                dependency_graph.remove_cell(&address);
            }
        }

        repository.shift_rows(start + count, -(count as i32))?;

        Ok(deleted_cells)
    }

    fn insert_columns(&self, start: u32, count: u32) -> Result<Vec<CellAddress>> {
        let mut repository = self.repository.lock().map_err(|_| {
            SpreadsheetError::LockError("Failed to acquire repository lock".to_string())
        })?;
        let mut dependency_graph = self.dependency_graph.lock().map_err(|_| {
            SpreadsheetError::LockError("Failed to acquire dependency graph lock".to_string())
        })?;

        let affected_addresses = repository.shift_columns(start, count as i32)?;

        for address in &affected_addresses {
            let new_address = CellAddress::new(address.col + count, address.row);
            self.shift_dependency_graph(&mut dependency_graph, address, new_address);
        }

        Ok(affected_addresses)
    }

    fn delete_columns(&self, start: u32, count: u32) -> Result<Vec<Cell>> {
        let mut repository = self.repository.lock().map_err(|_| {
            SpreadsheetError::LockError("Failed to acquire repository lock".to_string())
        })?;
        let mut dependency_graph = self.dependency_graph.lock().map_err(|_| {
            SpreadsheetError::LockError("Failed to acquire dependency graph lock".to_string())
        })?;

        let mut deleted_cells = Vec::new();
        for address in repository.get_all_addresses() {
            if address.col >= start && address.col < start + count {
                if let Some(cell) = repository.delete(&address) {
                    deleted_cells.push(cell);
                }
                dependency_graph.remove_dependencies_for(&address);
                dependency_graph.remove_cell(&address);
            }
        }

        repository.shift_columns(start + count, -(count as i32))?;

        Ok(deleted_cells)
    }

    fn get_bounds(&self) -> (u32, u32) {
        let repository = match self.repository.lock() {
            Ok(r) => r,
            Err(_) => return (0, 0),
        };

        let addresses = repository.get_all_addresses();
        let max_row = addresses.iter().map(|a| a.row).max().unwrap_or(0);
        let max_col = addresses.iter().map(|a| a.col).max().unwrap_or(0);

        (max_row + 1, max_col + 1)
    }
}
