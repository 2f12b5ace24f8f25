//! Implementation of CalculationService trait

use crate::dependency::DependencyGraph;
use crate::evaluator::{Evaluator, context::RepositoryContext};
use crate::formula::FormulaParser;
use crate::repository::CellRepository;
use crate::traits::CalculationService;
use crate::types::{CellAddress, CellValue, ErrorType};
use crate::{Result, SpreadsheetError};
use std::collections::HashSet;
use std::sync::{Arc, Mutex};

/// Concrete implementation of CalculationService
pub struct CalculationServiceImpl {
    repository: Arc<Mutex<CellRepository>>,
    dependency_graph: Arc<Mutex<DependencyGraph>>,
    needs_recalc: Arc<Mutex<bool>>,
}

impl CalculationServiceImpl {
    /// Create a new CalculationServiceImpl
    pub fn new(
        repository: Arc<Mutex<CellRepository>>,
        dependency_graph: Arc<Mutex<DependencyGraph>>,
    ) -> Self {
        Self {
            repository,
            dependency_graph,
            needs_recalc: Arc::new(Mutex::new(false)),
        }
    }

    /// Mark that recalculation is needed
    pub fn mark_needs_recalculation(&self) {
        if let Ok(mut needs) = self.needs_recalc.lock() {
            *needs = true;
        }
    }

    /// Clear the recalculation flag
    pub fn clear_recalculation_flag(&self) {
        if let Ok(mut needs) = self.needs_recalc.lock() {
            *needs = false;
        }
    }

    /// Recompute a single cell's formula and persist the result. Does not
    /// hold the repository lock across evaluation, since evaluating a
    /// formula may itself need to read other cells through the same lock.
    ///
    /// `cyclic_cells` are never evaluated: they are written directly as
    /// `#CIRC!` so a cycle can't hang or produce a stale value.
    fn recalculate_one(&self, address: &CellAddress, cyclic_cells: &HashSet<CellAddress>) -> Result<()> {
        if cyclic_cells.contains(address) {
            let mut repository = self.repository.lock().map_err(|_| {
                SpreadsheetError::LockError("Failed to acquire repository lock".to_string())
            })?;
            if let Some(cell) = repository.get_mut(address) {
                cell.set_computed_value(CellValue::from_error(ErrorType::CircularDependency {
                    cells: cyclic_cells.iter().copied().collect(),
                }));
            }
            return Ok(());
        }

        let formula_text = {
            let repository = self.repository.lock().map_err(|_| {
                SpreadsheetError::LockError("Failed to acquire repository lock".to_string())
            })?;
            match repository.get(address) {
                Some(cell) if cell.has_formula() => match &cell.raw_value {
                    CellValue::String(s) if s.starts_with('=') => Some(s[1..].to_string()),
                    _ => None,
                },
                _ => None,
            }
        };

        let Some(formula_text) = formula_text else {
            return Ok(());
        };

        let new_value = match FormulaParser::parse(&formula_text) {
            Ok(ast) => {
                let mut context = RepositoryContext::new(&self.repository);
                context.push_evaluation(address);
                let mut evaluator = Evaluator::new(&mut context);
                match evaluator.evaluate(&ast) {
                    Ok(value) => value,
                    Err(e) => CellValue::from_error(e.to_error_type()),
                }
            }
            Err(e) => CellValue::from_error(e.to_error_type()),
        };

        let mut repository = self.repository.lock().map_err(|_| {
            SpreadsheetError::LockError("Failed to acquire repository lock".to_string())
        })?;
        if let Some(cell) = repository.get_mut(address) {
            cell.set_computed_value(new_value);
        }

        Ok(())
    }
}

impl CalculationService for CalculationServiceImpl {
    fn recalculate(&self) -> Result<()> {
        let (order, cyclic_cells) = {
            let dependency_graph = self.dependency_graph.lock().map_err(|_| {
                SpreadsheetError::LockError("Failed to acquire dependency graph lock".to_string())
            })?;
            dependency_graph.calculation_order_with_cycles()
        };

        for address in order {
            self.recalculate_one(&address, &cyclic_cells)?;
        }

        self.clear_recalculation_flag();
        Ok(())
    }

    fn recalculate_cells(&self, addresses: &[CellAddress]) -> Result<()> {
        let (order, cyclic_cells) = {
            let dependency_graph = self.dependency_graph.lock().map_err(|_| {
                SpreadsheetError::LockError("Failed to acquire dependency graph lock".to_string())
            })?;

            let mut affected = HashSet::new();
            for address in addresses {
                affected.insert(*address);
                affected.extend(dependency_graph.get_all_dependents(address));
            }

            let (order, cyclic_cells) = dependency_graph.calculation_order_with_cycles();
            (
                order
                    .into_iter()
                    .filter(|addr| affected.contains(addr))
                    .collect::<Vec<_>>(),
                cyclic_cells,
            )
        };

        for address in order {
            self.recalculate_one(&address, &cyclic_cells)?;
        }

        Ok(())
    }

    fn get_calculation_order(&self) -> Result<Vec<CellAddress>> {
        let dependency_graph = self.dependency_graph.lock().map_err(|_| {
            SpreadsheetError::LockError("Failed to acquire dependency graph lock".to_string())
        })?;

        dependency_graph.get_calculation_order()
    }

    fn needs_recalculation(&self) -> bool {
        self.needs_recalc
            .lock()
            .map(|needs| *needs)
            .unwrap_or(false)
    }
}
