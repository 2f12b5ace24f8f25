//! Spreadsheet facade
//!
//! Single entry point for cell, batch, undo/redo, and structural operations.
//! Each sheet owns its own cell store and dependency graph; the facade looks
//! up the active sheet's pair and drives it through the service impls rather
//! than holding any cell state itself.

use crate::Result;
use crate::SpreadsheetError;
use crate::dependency::{DependencyAnalyzer, DependencyGraph};
use crate::domain::Cell;
use crate::formula::FormulaParser;
use crate::repository::CellRepository;
use crate::services::batch_manager::BatchManager;
use crate::services::event_manager::EventManager;
use crate::services::impls::{
    CalculationServiceImpl, CellOperationsServiceImpl, StructuralOperationsServiceImpl,
};
use crate::facade::event::{EventCallback, SpreadsheetEvent};
use crate::traits::{CalculationService, CellOperationsService, StructuralOperationsService};
use crate::types::{CellAddress, CellValue};
use crate::utils::format_cell_value;
use crate::workbook::sheet_manager::{Analysis, StructuralOperation};
use crate::workbook::{Sheet, SheetManager, Workbook};
use std::collections::{HashSet, VecDeque};
use std::rc::Rc;
use std::sync::{Arc, Mutex};

/// Default bound on the undo/redo stacks (number of snapshots kept).
const DEFAULT_UNDO_STACK_SIZE: usize = 100;

/// Largest row/column index the address space allows, mirroring
/// `CellAddress`'s own limits.
const MAX_ROWS: u32 = 1_048_576;
const MAX_COLS: u32 = 16_384;
/// Largest number of cells a single structural operation may touch before
/// it's rejected outright.
const MAX_STRUCTURAL_CELLS: usize = 100_000;

/// Deep copy of one sheet's cell store and dependency graph, used to restore
/// state on undo/redo. Captured before a mutation, not after.
#[derive(Clone)]
struct Snapshot {
    sheet_name: String,
    cells: CellRepository,
    graph: DependencyGraph,
}

/// Facade for spreadsheet operations: cell access, transactional batches,
/// undo/redo, and structural edits.
pub struct SpreadsheetFacade {
    sheet_manager: Arc<Mutex<SheetManager>>,
    active_sheet: Arc<Mutex<String>>,
    events: Rc<EventManager>,
    batch_manager: Arc<Mutex<BatchManager>>,
    /// Addresses touched since the outermost batch began, for the single
    /// flush of events at outermost commit.
    batch_touched: Arc<Mutex<HashSet<CellAddress>>>,
    undo_stack: Arc<Mutex<VecDeque<Snapshot>>>,
    redo_stack: Arc<Mutex<VecDeque<Snapshot>>>,
    max_undo_stack_size: usize,
}

impl SpreadsheetFacade {
    /// Create a new facade with a single default sheet.
    pub fn new() -> Self {
        let workbook = Workbook::with_sheet("Sheet1");
        Self::with_workbook(workbook, "Sheet1")
    }

    /// Create a facade around an existing workbook.
    pub fn with_workbook(workbook: Workbook, active_sheet: impl Into<String>) -> Self {
        Self {
            sheet_manager: Arc::new(Mutex::new(SheetManager::with_workbook(workbook))),
            active_sheet: Arc::new(Mutex::new(active_sheet.into())),
            events: Rc::new(EventManager::new()),
            batch_manager: Arc::new(Mutex::new(BatchManager::new())),
            batch_touched: Arc::new(Mutex::new(HashSet::new())),
            undo_stack: Arc::new(Mutex::new(VecDeque::new())),
            redo_stack: Arc::new(Mutex::new(VecDeque::new())),
            max_undo_stack_size: DEFAULT_UNDO_STACK_SIZE,
        }
    }

    /// Register a callback to receive every emitted [`SpreadsheetEvent`].
    pub fn add_event_callback(&self, callback: Box<dyn EventCallback>) {
        self.events.add_callback(callback);
    }

    fn emit(&self, event: SpreadsheetEvent) {
        self.events.emit(event);
    }

    fn active_sheet_name(&self) -> String {
        self.active_sheet.lock().unwrap().clone()
    }

    /// Repository and dependency graph for the currently active sheet.
    fn active_store(&self) -> (Arc<Mutex<CellRepository>>, Arc<Mutex<DependencyGraph>>) {
        let manager = self.sheet_manager.lock().unwrap();
        let name = self.active_sheet_name();
        let sheet = manager
            .workbook()
            .get_sheet(&name)
            .expect("active sheet always exists");
        (sheet.repository(), sheet.dependencies())
    }

    fn sheet_snapshot(&self, sheet_name: &str) -> Option<Snapshot> {
        let manager = self.sheet_manager.lock().unwrap();
        let sheet = manager.workbook().get_sheet(sheet_name)?;
        let cells = sheet.repository().lock().unwrap().clone();
        let graph = sheet.dependencies().lock().unwrap().clone();
        Some(Snapshot {
            sheet_name: sheet_name.to_string(),
            cells,
            graph,
        })
    }

    fn restore_snapshot(&self, snapshot: &Snapshot) -> bool {
        let manager = self.sheet_manager.lock().unwrap();
        let Some(sheet) = manager.workbook().get_sheet(&snapshot.sheet_name) else {
            return false;
        };
        *sheet.repository().lock().unwrap() = snapshot.cells.clone();
        *sheet.dependencies().lock().unwrap() = snapshot.graph.clone();
        true
    }

    fn push_bounded(stack: &Mutex<VecDeque<Snapshot>>, item: Snapshot, max: usize) {
        let mut s = stack.lock().unwrap();
        s.push_back(item);
        while s.len() > max {
            s.pop_front();
        }
    }

    /// Snapshot the active sheet for undo, and drop the redo stack: a new
    /// operation discards whatever was available to redo.
    fn push_undo(&self) {
        let name = self.active_sheet_name();
        if let Some(snap) = self.sheet_snapshot(&name) {
            Self::push_bounded(&self.undo_stack, snap, self.max_undo_stack_size);
            self.redo_stack.lock().unwrap().clear();
        }
    }

    fn in_batch(&self) -> bool {
        self.batch_manager.lock().unwrap().has_active_batches()
    }

    fn refresh_dependencies(graph: &mut DependencyGraph, address: &CellAddress, cell: &Cell) {
        graph.remove_dependencies_for(address);
        if cell.has_formula() {
            if let CellValue::String(s) = &cell.raw_value {
                if let Some(body) = s.strip_prefix('=') {
                    if let Ok(ast) = FormulaParser::parse(body) {
                        for dep in DependencyAnalyzer::extract_dependencies(&ast) {
                            graph.add_dependency(*address, dep);
                        }
                    }
                }
            }
        }
    }

    fn rebuild_dependency_graph(repo: &CellRepository, graph: &mut DependencyGraph) {
        graph.clear();
        for (address, cell) in repo.get_all() {
            Self::refresh_dependencies(graph, &address, &cell);
        }
    }

    // ---- Core cell operations ----

    /// Get a cell from the active sheet.
    pub fn get_cell(&self, address: &CellAddress) -> Option<Cell> {
        let (repo, _graph) = self.active_store();
        repo.lock().unwrap().get(address).cloned()
    }

    /// Set a cell value (formula or literal) on the active sheet, recalculating
    /// it and its dependents.
    pub fn set_cell_value(&self, address: &CellAddress, value: &str) -> Result<()> {
        let (repo, graph) = self.active_store();
        let old_cell = repo.lock().unwrap().get(address).cloned();

        let batched = self.in_batch();
        if batched {
            self.batch_manager
                .lock()
                .unwrap()
                .record_change(*address, old_cell.clone());
            self.batch_touched.lock().unwrap().insert(*address);
        } else {
            self.push_undo();
        }

        let affected: Vec<CellAddress> = {
            let g = graph.lock().unwrap();
            let mut set = g.get_all_dependents(address);
            set.insert(*address);
            set.into_iter().collect()
        };

        let cell_ops = CellOperationsServiceImpl::new(repo.clone(), graph.clone());
        cell_ops.set_cell(address, value)?;

        let calc = CalculationServiceImpl::new(repo.clone(), graph.clone());
        calc.recalculate_cells(&affected)?;

        if !batched {
            let new_value = repo
                .lock()
                .unwrap()
                .get(address)
                .map(|c| c.get_computed_value())
                .unwrap_or(CellValue::Empty);
            self.emit(SpreadsheetEvent::cell_updated(
                address,
                old_cell.map(|c| c.get_computed_value()),
                new_value,
                Some(value.to_string()),
            ));

            if affected.len() > 1 {
                let repo_guard = repo.lock().unwrap();
                let mut cells = std::collections::HashMap::new();
                for addr in &affected {
                    if addr == address {
                        continue;
                    }
                    if let Some(cell) = repo_guard.get(addr) {
                        cells.insert(addr.to_string(), cell.get_computed_value());
                    }
                }
                drop(repo_guard);
                if !cells.is_empty() {
                    self.emit(SpreadsheetEvent::cells_updated(cells));
                }
            }
        }

        Ok(())
    }

    /// Delete a cell on the active sheet, recalculating anything that depended on it.
    pub fn delete_cell(&self, address: &CellAddress) -> Result<()> {
        let (repo, graph) = self.active_store();
        let old_cell = repo.lock().unwrap().get(address).cloned();
        if old_cell.is_none() {
            return Ok(());
        }

        let batched = self.in_batch();
        if batched {
            self.batch_manager
                .lock()
                .unwrap()
                .record_change(*address, old_cell.clone());
            self.batch_touched.lock().unwrap().insert(*address);
        } else {
            self.push_undo();
        }

        let affected: Vec<CellAddress> = {
            let g = graph.lock().unwrap();
            g.get_all_dependents(address).into_iter().collect()
        };

        let cell_ops = CellOperationsServiceImpl::new(repo.clone(), graph.clone());
        cell_ops.delete_cell(address)?;

        if !affected.is_empty() {
            let calc = CalculationServiceImpl::new(repo.clone(), graph.clone());
            calc.recalculate_cells(&affected)?;
        }

        if !batched {
            self.emit(SpreadsheetEvent::cell_deleted(address));
        }

        Ok(())
    }

    /// Get a cell's computed value formatted for display.
    pub fn get_cell_value(&self, address: &CellAddress) -> Option<String> {
        self.get_cell(address)
            .map(|cell| format_cell_value(cell.get_computed_value()))
    }

    /// Get a cell's computed value.
    pub fn get_cell_raw_value(&self, address: &CellAddress) -> Option<CellValue> {
        self.get_cell(address).map(|cell| cell.get_computed_value())
    }

    /// Every cell in the active sheet.
    pub fn get_all_cells(&self) -> Vec<(CellAddress, Cell)> {
        let (repo, _graph) = self.active_store();
        repo.lock().unwrap().get_all()
    }

    /// Number of cells in the active sheet.
    pub fn cell_count(&self) -> usize {
        let (repo, _graph) = self.active_store();
        repo.lock().unwrap().len()
    }

    /// Force a full recalculation of the active sheet.
    pub fn recalculate(&self) -> Result<()> {
        let (repo, graph) = self.active_store();
        CalculationServiceImpl::new(repo, graph).recalculate()
    }

    // ---- Batches ----

    /// Begin a (possibly nested) batch. The outermost `begin_batch` snapshots
    /// the sheet for undo and suppresses per-mutation events until the
    /// matching outermost commit.
    pub fn begin_batch(&self) -> String {
        let was_outer = !self.in_batch();
        if was_outer {
            self.push_undo();
            self.batch_touched.lock().unwrap().clear();
        }
        let id = self
            .batch_manager
            .lock()
            .unwrap()
            .begin_batch(Some(format!("batch-{:x}", self.batch_id_seed())));
        if was_outer {
            self.emit(SpreadsheetEvent::batch_started(id.clone()));
        }
        id
    }

    fn batch_id_seed(&self) -> usize {
        // Not a real clock: the batch manager only needs a unique label,
        // and its own internal counter already guarantees that. This just
        // gives begin_batch() something deterministic to format.
        self.batch_manager.lock().unwrap().active_batch_ids().len()
    }

    /// Commit a batch. Only the outermost commit flushes buffered events.
    pub fn commit_batch(&self, batch_id: &str) -> Result<()> {
        {
            let mut manager = self.batch_manager.lock().unwrap();
            manager.commit_batch(batch_id)?;
        }

        if !self.in_batch() {
            let touched: Vec<CellAddress> = self.batch_touched.lock().unwrap().drain().collect();
            let (repo, _graph) = self.active_store();
            for addr in &touched {
                let value = repo
                    .lock()
                    .unwrap()
                    .get(addr)
                    .map(|c| c.get_computed_value())
                    .unwrap_or(CellValue::Empty);
                self.emit(SpreadsheetEvent::cell_updated(addr, None, value, None));
            }
            self.emit(SpreadsheetEvent::batch_completed(
                batch_id.to_string(),
                touched.len(),
            ));
        }

        Ok(())
    }

    /// Roll back a batch, restoring every address it touched to its
    /// pre-batch state. Emits no observer events: the store must look
    /// bit-identical to before the batch began.
    pub fn rollback_batch(&self, batch_id: &str) -> Result<()> {
        let (repo, graph) = self.active_store();
        let journal = self.batch_manager.lock().unwrap().rollback_batch(batch_id)?;

        let mut touched = Vec::with_capacity(journal.len());
        {
            let mut repo_guard = repo.lock().unwrap();
            let mut graph_guard = graph.lock().unwrap();
            for (address, previous) in &journal {
                touched.push(*address);
                match previous {
                    Some(cell) => {
                        repo_guard.set(address, cell.clone());
                        Self::refresh_dependencies(&mut graph_guard, address, cell);
                    }
                    None => {
                        repo_guard.delete(address);
                        graph_guard.remove_dependencies_for(address);
                        graph_guard.remove_cell(address);
                    }
                }
            }
        }

        if !touched.is_empty() {
            CalculationServiceImpl::new(repo, graph).recalculate_cells(&touched)?;
        }

        let mut batch_touched = self.batch_touched.lock().unwrap();
        for addr in &touched {
            batch_touched.remove(addr);
        }

        Ok(())
    }

    /// Whether a batch is currently open.
    pub fn has_active_batch(&self) -> bool {
        self.in_batch()
    }

    // ---- Undo / redo ----

    /// Undo the last recorded operation (a single edit, or an entire batch),
    /// returning `false` if there was nothing to undo.
    pub fn undo(&self) -> bool {
        let Some(snapshot) = self.undo_stack.lock().unwrap().pop_back() else {
            return false;
        };
        if let Some(redo_snapshot) = self.sheet_snapshot(&snapshot.sheet_name) {
            Self::push_bounded(&self.redo_stack, redo_snapshot, self.max_undo_stack_size);
        }
        self.restore_snapshot(&snapshot)
    }

    /// Redo the last undone operation, returning `false` if there was nothing to redo.
    pub fn redo(&self) -> bool {
        let Some(snapshot) = self.redo_stack.lock().unwrap().pop_back() else {
            return false;
        };
        if let Some(undo_snapshot) = self.sheet_snapshot(&snapshot.sheet_name) {
            Self::push_bounded(&self.undo_stack, undo_snapshot, self.max_undo_stack_size);
        }
        self.restore_snapshot(&snapshot)
    }

    /// Whether `undo()` would do anything.
    pub fn can_undo(&self) -> bool {
        !self.undo_stack.lock().unwrap().is_empty()
    }

    /// Whether `redo()` would do anything.
    pub fn can_redo(&self) -> bool {
        !self.redo_stack.lock().unwrap().is_empty()
    }

    // ---- Structural operations ----

    /// Dry-run query: would `operation` change `formula`'s references at all,
    /// without applying anything?
    pub fn would_be_affected(&self, formula: &str, operation: &StructuralOperation) -> bool {
        SheetManager::would_be_affected(formula, operation)
    }

    /// Validate a requested structural change against the sheet's current
    /// size/memory as well as the per-operation extent being requested.
    fn validate_structural_limits(&self, axis_count: u32, extent: u32) -> Result<()> {
        let (repo, _graph) = self.active_store();
        let repo = repo.lock().unwrap();
        if repo.is_at_memory_limit() {
            return Err(SpreadsheetError::LimitExceeded(
                "sheet is at its memory limit".to_string(),
            ));
        }
        if repo.size() > MAX_STRUCTURAL_CELLS {
            return Err(SpreadsheetError::LimitExceeded(format!(
                "structural operation would touch more than {} cells",
                MAX_STRUCTURAL_CELLS
            )));
        }

        let touched = (extent as usize).saturating_mul(axis_count.max(1) as usize);
        if touched > MAX_STRUCTURAL_CELLS {
            return Err(SpreadsheetError::LimitExceeded(format!(
                "requested structural operation would touch more than {} cells",
                MAX_STRUCTURAL_CELLS
            )));
        }

        Ok(())
    }

    fn apply_structural(&self, operation: StructuralOperation) -> Result<Analysis> {
        self.push_undo();

        let analysis = {
            let manager = self.sheet_manager.lock().unwrap();
            manager.analyze_structural_operation(&operation)
        };

        {
            let mut manager = self.sheet_manager.lock().unwrap();
            manager.apply_structural_operation_to_all(operation)?;
        }

        let (repo, graph) = self.active_store();
        match operation {
            StructuralOperation::InsertRows { before_row, count } => {
                StructuralOperationsServiceImpl::new(repo.clone(), graph.clone())
                    .insert_rows(before_row, count)?;
            }
            StructuralOperation::InsertColumns { before_col, count } => {
                StructuralOperationsServiceImpl::new(repo.clone(), graph.clone())
                    .insert_columns(before_col, count)?;
            }
            StructuralOperation::DeleteRows { start_row, count } => {
                StructuralOperationsServiceImpl::new(repo.clone(), graph.clone())
                    .delete_rows(start_row, count)?;
            }
            StructuralOperation::DeleteColumns { start_col, count } => {
                StructuralOperationsServiceImpl::new(repo.clone(), graph.clone())
                    .delete_columns(start_col, count)?;
            }
        }

        {
            let repo_guard = repo.lock().unwrap();
            let mut graph_guard = graph.lock().unwrap();
            Self::rebuild_dependency_graph(&repo_guard, &mut graph_guard);
        }

        CalculationServiceImpl::new(repo.clone(), graph).recalculate()?;

        let affected_cells = repo.lock().unwrap().len();
        self.emit(SpreadsheetEvent::range_updated(
            &CellAddress::new(0, 0),
            &CellAddress::new(MAX_COLS - 1, MAX_ROWS - 1),
            affected_cells,
        ));

        Ok(analysis)
    }

    /// Insert `count` rows before `before_row`, shifting formula references.
    pub fn insert_rows(&self, before_row: u32, count: u32) -> Result<Analysis> {
        if before_row.saturating_add(count) > MAX_ROWS {
            return Err(SpreadsheetError::OutOfBounds(format!(
                "row {} is beyond the maximum of {} rows",
                before_row, MAX_ROWS
            )));
        }
        self.validate_structural_limits(count, before_row)?;
        self.apply_structural(StructuralOperation::InsertRows { before_row, count })
    }

    /// Delete `count` rows starting at `start_row`, shifting formula references.
    pub fn delete_rows(&self, start_row: u32, count: u32) -> Result<Analysis> {
        self.validate_structural_limits(count, start_row)?;
        self.apply_structural(StructuralOperation::DeleteRows { start_row, count })
    }

    /// Insert `count` columns before `before_col`, shifting formula references.
    pub fn insert_columns(&self, before_col: u32, count: u32) -> Result<Analysis> {
        if before_col.saturating_add(count) > MAX_COLS {
            return Err(SpreadsheetError::OutOfBounds(format!(
                "column {} is beyond the maximum of {} columns",
                before_col, MAX_COLS
            )));
        }
        self.validate_structural_limits(count, before_col)?;
        self.apply_structural(StructuralOperation::InsertColumns { before_col, count })
    }

    /// Delete `count` columns starting at `start_col`, shifting formula references.
    pub fn delete_columns(&self, start_col: u32, count: u32) -> Result<Analysis> {
        self.validate_structural_limits(count, start_col)?;
        self.apply_structural(StructuralOperation::DeleteColumns { start_col, count })
    }

    /// Begin queuing structural changes for a batched apply instead of
    /// applying each one immediately. See [`SheetManager::start_batch`].
    pub fn start_structural_batch(&self) {
        self.sheet_manager.lock().unwrap().start_batch();
    }

    /// Queue a structural change onto the active batch started by
    /// [`Self::start_structural_batch`].
    pub fn add_structural_change(&self, change: StructuralOperation) -> Result<()> {
        self.sheet_manager.lock().unwrap().add_to_batch(change)
    }

    /// Discard the active structural batch without applying any of its
    /// queued changes.
    pub fn cancel_structural_batch(&self) {
        self.sheet_manager.lock().unwrap().cancel_batch();
    }

    /// Apply every queued structural change (sorted for minimal redundant
    /// rewriting - see [`SheetManager::execute_batch`]) and clear the batch.
    pub fn execute_structural_batch(&self) -> Result<Analysis> {
        self.push_undo();

        let (repo, graph) = self.active_store();
        let analysis = self.sheet_manager.lock().unwrap().execute_batch()?;

        {
            let repo_guard = repo.lock().unwrap();
            let mut graph_guard = graph.lock().unwrap();
            Self::rebuild_dependency_graph(&repo_guard, &mut graph_guard);
        }

        CalculationServiceImpl::new(repo.clone(), graph).recalculate()?;

        let affected_cells = repo.lock().unwrap().len();
        self.emit(SpreadsheetEvent::range_updated(
            &CellAddress::new(0, 0),
            &CellAddress::new(MAX_COLS - 1, MAX_ROWS - 1),
            affected_cells,
        ));

        Ok(analysis)
    }

    // ---- Sheet management ----

    /// List of all sheets, in order, as (name, index).
    pub fn get_sheets(&self) -> Vec<(String, usize)> {
        let manager = self.sheet_manager.lock().unwrap();
        manager
            .workbook()
            .sheet_names()
            .iter()
            .enumerate()
            .map(|(idx, name)| (name.clone(), idx))
            .collect()
    }

    /// Name of the active sheet.
    pub fn get_active_sheet(&self) -> String {
        self.active_sheet_name()
    }

    /// Switch the active sheet.
    pub fn set_active_sheet(&self, sheet_name: &str) -> Result<()> {
        let manager = self.sheet_manager.lock().unwrap();
        if manager.workbook().get_sheet(sheet_name).is_some() {
            *self.active_sheet.lock().unwrap() = sheet_name.to_string();
            Ok(())
        } else {
            Err(SpreadsheetError::InvalidOperation(format!(
                "Sheet '{}' does not exist",
                sheet_name
            )))
        }
    }

    /// Add a new empty sheet.
    pub fn add_sheet(&self, name: &str) -> Result<()> {
        let mut manager = self.sheet_manager.lock().unwrap();
        let sheet = Sheet::new(name);
        manager.workbook_mut().add_sheet(sheet)
    }

    /// Remove a sheet, switching the active sheet away from it first if needed.
    pub fn remove_sheet(&self, name: &str) -> Result<()> {
        let mut manager = self.sheet_manager.lock().unwrap();

        if manager.workbook().sheet_count() <= 1 {
            return Err(SpreadsheetError::InvalidOperation(
                "Cannot remove the last sheet".to_string(),
            ));
        }

        if self.active_sheet_name() == name {
            let fallback = manager
                .workbook()
                .sheet_names()
                .iter()
                .find(|n| n.as_str() != name)
                .cloned();
            if let Some(fallback) = fallback {
                *self.active_sheet.lock().unwrap() = fallback;
            }
        }

        manager.workbook_mut().remove_sheet(name)?;
        Ok(())
    }

    /// Rename a sheet, updating the active sheet pointer if it was renamed.
    pub fn rename_sheet(&self, old_name: &str, new_name: &str) -> Result<()> {
        let mut manager = self.sheet_manager.lock().unwrap();
        manager.workbook_mut().rename_sheet(old_name, new_name)?;

        if self.active_sheet_name() == old_name {
            *self.active_sheet.lock().unwrap() = new_name.to_string();
        }

        Ok(())
    }

    /// Number of sheets in the workbook.
    pub fn sheet_count(&self) -> usize {
        let manager = self.sheet_manager.lock().unwrap();
        manager.workbook().sheet_count()
    }

    // ---- Command-system compatibility ----
    // Thin wrappers so crate::command::CommandExecutorImpl can drive the
    // facade without going through undo/redo itself (the command layer has
    // its own undo stack built from the `Vec<(CellAddress, Cell)>` these
    // return via CommandExecutor::*_direct).

    /// Set a cell's value without pushing an undo snapshot (the caller -
    /// typically a `Command` - manages undo itself).
    pub fn set_cell_value_without_command(&self, address: &CellAddress, value: &str) -> Result<()> {
        self.set_cell_value(address, value)
    }

    /// Delete a cell without pushing an undo snapshot.
    pub fn delete_cell_without_command(&self, address: &CellAddress) -> Result<()> {
        self.delete_cell(address)
    }

    /// Insert a single row without pushing an undo snapshot.
    pub fn insert_row_without_command(&self, index: u32) -> Result<Analysis> {
        self.insert_rows(index, 1)
    }

    /// Delete a single row without pushing an undo snapshot.
    pub fn delete_row_without_command(&self, index: u32) -> Result<Analysis> {
        self.delete_rows(index, 1)
    }

    /// Insert a single column without pushing an undo snapshot.
    pub fn insert_column_without_command(&self, index: u32) -> Result<Analysis> {
        self.insert_columns(index, 1)
    }

    /// Delete a single column without pushing an undo snapshot.
    pub fn delete_column_without_command(&self, index: u32) -> Result<Analysis> {
        self.delete_columns(index, 1)
    }
}

impl Default for SpreadsheetFacade {
    fn default() -> Self {
        Self::new()
    }
}
