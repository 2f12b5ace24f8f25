//! Implementation of CellOperationsService trait

use crate::dependency::{DependencyAnalyzer, DependencyGraph};
use crate::domain::Cell;
use crate::formula::FormulaParser;
use crate::repository::CellRepository;
use crate::traits::CellOperationsService;
use crate::types::{CellAddress, CellValue};
use crate::{Result, SpreadsheetError};
use std::sync::{Arc, Mutex};

/// Concrete implementation of CellOperationsService
pub struct CellOperationsServiceImpl {
    repository: Arc<Mutex<CellRepository>>,
    dependency_graph: Arc<Mutex<DependencyGraph>>,
}

impl CellOperationsServiceImpl {
    /// Create a new CellOperationsServiceImpl
    pub fn new(
        repository: Arc<Mutex<CellRepository>>,
        dependency_graph: Arc<Mutex<DependencyGraph>>,
    ) -> Self {
        Self {
            repository,
            dependency_graph,
        }
    }
}

impl CellOperationsService for CellOperationsServiceImpl {
    fn set_cell(&self, address: &CellAddress, value: &str) -> Result<Cell> {
        let mut repository = self.repository.lock().map_err(|_| {
            SpreadsheetError::LockError("Failed to acquire repository lock".to_string())
        })?;
        let mut dependency_graph = self.dependency_graph.lock().map_err(|_| {
            SpreadsheetError::LockError("Failed to acquire dependency graph lock".to_string())
        })?;

        // Parse the value to determine if it's a formula
        let cell = if let Some(formula_str) = value.strip_prefix('=') {
            dependency_graph.remove_dependencies_for(address);

            match FormulaParser::parse(formula_str) {
                Ok(expr) => {
                    for dep in DependencyAnalyzer::extract_dependencies(&expr) {
                        dependency_graph.add_dependency(*address, dep);
                    }

                    Cell::with_formula(CellValue::from_string(value.to_string()), value.to_string())
                }
                Err(e) => {
                    // Malformed formula: still store the raw text so the cell
                    // remains a valid dependency source, but surface the error.
                    let mut cell = Cell::with_formula(
                        CellValue::from_string(value.to_string()),
                        value.to_string(),
                    );
                    cell.set_error(e.to_string());
                    cell
                }
            }
        } else {
            dependency_graph.remove_dependencies_for(address);
            Cell::new(CellValue::from_string(value.to_string()))
        };

        repository.set(address, cell.clone());

        Ok(cell)
    }

    fn get_cell(&self, address: &CellAddress) -> Option<Cell> {
        let repository = self.repository.lock().ok()?;
        repository.get(address).cloned()
    }

    fn delete_cell(&self, address: &CellAddress) -> Result<()> {
        let mut repository = self.repository.lock().map_err(|_| {
            SpreadsheetError::LockError("Failed to acquire repository lock".to_string())
        })?;
        let mut dependency_graph = self.dependency_graph.lock().map_err(|_| {
            SpreadsheetError::LockError("Failed to acquire dependency graph lock".to_string())
        })?;

        repository.delete(address);
        dependency_graph.remove_dependencies_for(address);
        dependency_graph.remove_cell(address);

        Ok(())
    }

    fn get_cell_value(&self, address: &CellAddress) -> Option<CellValue> {
        let repository = self.repository.lock().ok()?;
        repository.get(address).map(|cell| cell.get_computed_value())
    }
}
