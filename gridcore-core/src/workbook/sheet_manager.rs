use super::Workbook;
use crate::types::{CellAddress, CellValue};
use crate::domain::Cell;
use crate::formula::ast::Expr;
use crate::formula::{FormulaParser, FormulaPrinter, FormulaTransformer};
use crate::{Result, SpreadsheetError};

/// A structural edit that may require adjusting formula references across a workbook.
#[derive(Debug, Clone, Copy)]
pub enum StructuralOperation {
    InsertRows { before_row: u32, count: u32 },
    InsertColumns { before_col: u32, count: u32 },
    DeleteRows { start_row: u32, count: u32 },
    DeleteColumns { start_col: u32, count: u32 },
}

impl StructuralOperation {
    /// Whether this operation removes cells (as opposed to only shifting them).
    fn is_delete(&self) -> bool {
        matches!(
            self,
            StructuralOperation::DeleteRows { .. } | StructuralOperation::DeleteColumns { .. }
        )
    }

    /// Number of rows/columns this operation inserts or deletes, for sorting
    /// batched changes by axis index.
    fn axis_index(&self) -> u32 {
        match *self {
            StructuralOperation::InsertRows { before_row, .. } => before_row,
            StructuralOperation::DeleteRows { start_row, .. } => start_row,
            StructuralOperation::InsertColumns { before_col, .. } => before_col,
            StructuralOperation::DeleteColumns { start_col, .. } => start_col,
        }
    }

    fn is_row_axis(&self) -> bool {
        matches!(
            self,
            StructuralOperation::InsertRows { .. } | StructuralOperation::DeleteRows { .. }
        )
    }
}

/// Severity of a single [`StructuralWarning`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum WarningSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl WarningSeverity {
    fn weight(self) -> u32 {
        match self {
            WarningSeverity::Low => 1,
            WarningSeverity::Medium => 3,
            WarningSeverity::High => 7,
            WarningSeverity::Critical => 15,
        }
    }
}

/// What kind of risk a [`StructuralWarning`] flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StructuralWarningKind {
    /// A formula reference would be rewritten or turned into `#REF!`.
    FormulaReference,
    /// Cells with data sit inside a deleted region and will be dropped.
    DataLoss,
    /// The number of cells touched by the operation is large.
    Performance,
}

/// One issue surfaced while analyzing a structural change before it is applied.
#[derive(Debug, Clone)]
pub struct StructuralWarning {
    pub kind: StructuralWarningKind,
    pub severity: WarningSeverity,
    pub sheet: String,
    pub address: Option<CellAddress>,
    pub message: String,
}

/// Overall risk grade for a structural change, derived from its aggregated
/// warning severities.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub enum RiskGrade {
    #[default]
    Low,
    Medium,
    High,
    Critical,
}

/// Number of affected formula cells past which an operation earns a
/// `Performance` warning.
const PERFORMANCE_WARNING_THRESHOLD: usize = 1_000;

/// Result of analyzing a structural change before it mutates the workbook:
/// every warning surfaced, an aggregated risk score, and a threshold-based
/// grade derived from it.
#[derive(Debug, Clone, Default)]
pub struct Analysis {
    pub warnings: Vec<StructuralWarning>,
    pub risk_score: u32,
    pub grade: RiskGrade,
}

impl Analysis {
    fn from_warnings(warnings: Vec<StructuralWarning>) -> Self {
        let risk_score: u32 = warnings.iter().map(|w| w.severity.weight()).sum();
        let grade = match risk_score {
            0..=3 => RiskGrade::Low,
            4..=10 => RiskGrade::Medium,
            11..=25 => RiskGrade::High,
            _ => RiskGrade::Critical,
        };
        Analysis {
            warnings,
            risk_score,
            grade,
        }
    }
}

/// Manages operations across multiple sheets
pub struct SheetManager {
    workbook: Workbook,
    /// Queued structural changes, accumulated between `start_batch` and
    /// `execute_batch`/`cancel_batch`.
    pending_batch: Option<Vec<StructuralOperation>>,
}

impl SheetManager {
    /// Create a new sheet manager with an empty workbook
    pub fn new() -> Self {
        Self {
            workbook: Workbook::default(),
            pending_batch: None,
        }
    }

    /// Create a sheet manager with an existing workbook
    pub fn with_workbook(workbook: Workbook) -> Self {
        Self {
            workbook,
            pending_batch: None,
        }
    }

    /// Get the workbook
    pub fn workbook(&self) -> &Workbook {
        &self.workbook
    }

    /// Get the workbook mutably
    pub fn workbook_mut(&mut self) -> &mut Workbook {
        &mut self.workbook
    }

    /// Evaluate a cross-sheet formula
    pub fn evaluate_cross_sheet_formula(&self, formula: &str) -> Result<CellValue> {
        // Parse the formula
        let expr = FormulaParser::parse(formula)?;
        
        // This would need to be extended to handle cross-sheet references
        // For now, return a placeholder
        Ok(CellValue::Empty)
    }

    /// Copy cells from one sheet to another
    pub fn copy_cells(
        &mut self,
        source_sheet: &str,
        source_range: &[(CellAddress, CellAddress)],
        target_sheet: &str,
        target_start: &CellAddress,
    ) -> Result<()> {
        // Get source cells
        let mut cells_to_copy = Vec::new();
        
        let source = self.workbook.get_sheet(source_sheet)
            .ok_or_else(|| SpreadsheetError::InvalidOperation(format!("Source sheet '{}' not found", source_sheet)))?;
        
        for (start, end) in source_range {
            for row in start.row..=end.row {
                for col in start.col..=end.col {
                    let addr = CellAddress::new(col, row);
                    if let Some(cell) = source.get_cell(&addr) {
                        let offset_row = row - start.row;
                        let offset_col = col - start.col;
                        cells_to_copy.push((offset_row, offset_col, cell));
                    }
                }
            }
        }
        
        // Set cells in target sheet
        let target = self.workbook.get_sheet(target_sheet)
            .ok_or_else(|| SpreadsheetError::InvalidOperation(format!("Target sheet '{}' not found", target_sheet)))?;
        
        for (offset_row, offset_col, cell) in cells_to_copy {
            let target_addr = CellAddress::new(
                target_start.col + offset_col,
                target_start.row + offset_row,
            );
            target.set_cell(&target_addr, cell)?;
        }
        
        Ok(())
    }

    /// Move cells from one sheet to another
    pub fn move_cells(
        &mut self,
        source_sheet: &str,
        source_range: &[(CellAddress, CellAddress)],
        target_sheet: &str,
        target_start: &CellAddress,
    ) -> Result<()> {
        // Copy cells first
        self.copy_cells(source_sheet, source_range, target_sheet, target_start)?;
        
        // Then clear source cells
        let source = self.workbook.get_sheet(source_sheet)
            .ok_or_else(|| SpreadsheetError::InvalidOperation(format!("Source sheet '{}' not found", source_sheet)))?;
        
        for (start, end) in source_range {
            for row in start.row..=end.row {
                for col in start.col..=end.col {
                    let addr = CellAddress::new(col, row);
                    source.set_cell(&addr, Cell::empty())?;
                }
            }
        }
        
        Ok(())
    }

    /// Apply a structural operation to all sheets, rewriting formula references that
    /// point at cells shifted or removed by the operation.
    pub fn apply_structural_operation_to_all(&mut self, operation: StructuralOperation) -> Result<()> {
        let transformer = FormulaTransformer::new();

        for sheet_name in self.workbook.sheet_names().to_vec() {
            if let Some(sheet) = self.workbook.get_sheet(&sheet_name) {
                let repository = sheet.repository();
                let mut adjusted_cells = Vec::new();

                // Collect cells that need adjustment
                for (address, cell) in repository.lock().unwrap().iter() {
                    if cell.has_formula() {
                        if let CellValue::String(formula_str) = &cell.raw_value {
                            if let Some(body) = formula_str.strip_prefix('=') {
                                if let Ok(ast) = FormulaParser::parse(body) {
                                    let adjusted_ast = Self::apply_transform(&transformer, ast, &operation);
                                    let adjusted_text = format!("={}", FormulaPrinter::print(&adjusted_ast));
                                    if adjusted_text != *formula_str {
                                        adjusted_cells.push((address, adjusted_text, adjusted_ast));
                                    }
                                }
                            }
                        }
                    }
                }

                for (address, adjusted_formula, _adjusted_ast) in adjusted_cells {
                    let body = adjusted_formula.trim_start_matches('=');
                    // Re-parse the printed formula so formula_text and the stored AST stay in sync.
                    let new_cell = if FormulaParser::parse(body).is_ok() {
                        Cell::with_formula(CellValue::from_string(adjusted_formula.clone()), adjusted_formula)
                    } else {
                        Cell::with_error(CellValue::from_string(adjusted_formula.clone()), "#REF!".to_string())
                    };

                    if let Some(sheet) = self.workbook.get_sheet(&sheet_name) {
                        sheet.set_cell(&address, new_cell)?;
                    }
                }
            }
        }

        Ok(())
    }

    fn apply_transform(
        transformer: &FormulaTransformer,
        ast: crate::formula::Expr,
        operation: &StructuralOperation,
    ) -> crate::formula::Expr {
        match *operation {
            StructuralOperation::InsertRows { before_row, count } => (0..count)
                .fold(ast, |acc, _| transformer.adjust_for_row_insert(acc, before_row)),
            StructuralOperation::InsertColumns { before_col, count } => (0..count)
                .fold(ast, |acc, _| transformer.adjust_for_column_insert(acc, before_col)),
            StructuralOperation::DeleteRows { start_row, count } => (0..count)
                .fold(ast, |acc, _| transformer.adjust_for_row_delete(acc, start_row)),
            StructuralOperation::DeleteColumns { start_col, count } => (0..count)
                .fold(ast, |acc, _| transformer.adjust_for_column_delete(acc, start_col)),
        }
    }

    /// Dry-run query: would `operation` change `formula`'s references at all?
    /// Compares the rewritten tree's printed text against the original rather
    /// than inspecting individual reference nodes, so it stays correct as the
    /// rewrite rules evolve.
    pub fn would_be_affected(formula: &str, operation: &StructuralOperation) -> bool {
        let Some(body) = formula.strip_prefix('=') else {
            return false;
        };
        let Ok(ast) = FormulaParser::parse(body) else {
            return false;
        };
        Self::would_ast_be_affected(&ast, operation)
    }

    fn would_ast_be_affected(ast: &Expr, operation: &StructuralOperation) -> bool {
        let transformer = FormulaTransformer::new();
        let adjusted = Self::apply_transform(&transformer, ast.clone(), operation);
        FormulaPrinter::print(&adjusted) != FormulaPrinter::print(ast)
    }

    /// Scan every formula cell across every sheet and classify the risk of
    /// applying `operation`, without mutating anything. Mirrors the rewrite
    /// `apply_structural_operation_to_all` will perform.
    pub fn analyze_structural_operation(&self, operation: &StructuralOperation) -> Analysis {
        let mut warnings = Vec::new();
        let mut affected_formulas = 0usize;

        for sheet_name in self.workbook.sheet_names() {
            let Some(sheet) = self.workbook.get_sheet(sheet_name) else {
                continue;
            };
            let repository = sheet.repository();
            let guard = repository.lock().unwrap();
            let mut data_loss_cells = 0usize;

            for (address, cell) in guard.iter() {
                if operation.is_delete() && Self::address_in_deleted_region(&address, operation) {
                    data_loss_cells += 1;
                }

                if !cell.has_formula() {
                    continue;
                }
                let CellValue::String(formula_str) = &cell.raw_value else {
                    continue;
                };
                let Some(body) = formula_str.strip_prefix('=') else {
                    continue;
                };
                let Ok(ast) = FormulaParser::parse(body) else {
                    continue;
                };
                if !Self::would_ast_be_affected(&ast, operation) {
                    continue;
                }

                affected_formulas += 1;

                let transformer = FormulaTransformer::new();
                let adjusted = Self::apply_transform(&transformer, ast, operation);
                let becomes_ref_error = matches!(
                    &adjusted,
                    Expr::Literal { value: CellValue::Error(e) } if e.excel_code() == "#REF!"
                );

                warnings.push(StructuralWarning {
                    kind: StructuralWarningKind::FormulaReference,
                    severity: if becomes_ref_error {
                        WarningSeverity::High
                    } else {
                        WarningSeverity::Low
                    },
                    sheet: sheet_name.clone(),
                    address: Some(address),
                    message: if becomes_ref_error {
                        format!("{} would become #REF!", formula_str)
                    } else {
                        format!("{} references would shift", formula_str)
                    },
                });
            }

            if data_loss_cells > 0 {
                warnings.push(StructuralWarning {
                    kind: StructuralWarningKind::DataLoss,
                    severity: if data_loss_cells > 100 {
                        WarningSeverity::Critical
                    } else if data_loss_cells > 10 {
                        WarningSeverity::High
                    } else {
                        WarningSeverity::Medium
                    },
                    sheet: sheet_name.clone(),
                    address: None,
                    message: format!("{} cell(s) would be deleted", data_loss_cells),
                });
            }
        }

        if affected_formulas > PERFORMANCE_WARNING_THRESHOLD {
            warnings.push(StructuralWarning {
                kind: StructuralWarningKind::Performance,
                severity: WarningSeverity::Medium,
                sheet: self.workbook.active_sheet_name().unwrap_or_default().to_string(),
                address: None,
                message: format!(
                    "{} formulas would need to be rewritten",
                    affected_formulas
                ),
            });
        }

        Analysis::from_warnings(warnings)
    }

    fn address_in_deleted_region(address: &CellAddress, operation: &StructuralOperation) -> bool {
        match *operation {
            StructuralOperation::DeleteRows { start_row, count } => {
                address.row >= start_row && address.row < start_row + count
            }
            StructuralOperation::DeleteColumns { start_col, count } => {
                address.col >= start_col && address.col < start_col + count
            }
            _ => false,
        }
    }

    /// Begin queuing structural changes instead of applying them immediately.
    /// Replaces any previously pending (uncommitted) batch.
    pub fn start_batch(&mut self) {
        self.pending_batch = Some(Vec::new());
    }

    /// Queue a structural change onto the active batch.
    ///
    /// # Errors
    /// Returns `BatchStateError` if no batch is active.
    pub fn add_to_batch(&mut self, change: StructuralOperation) -> Result<()> {
        match &mut self.pending_batch {
            Some(queue) => {
                queue.push(change);
                Ok(())
            }
            None => Err(SpreadsheetError::BatchStateError(
                "no structural batch is active".to_string(),
            )),
        }
    }

    /// Discard the active batch without applying any of its queued changes.
    pub fn cancel_batch(&mut self) {
        self.pending_batch = None;
    }

    /// Apply every queued change and clear the batch.
    ///
    /// Changes are sorted within their axis so deletes apply in ascending
    /// index and inserts in descending index: applying them in that order
    /// means an earlier change never shifts the index a later one targets,
    /// so each change can be applied against its original coordinates.
    ///
    /// # Errors
    /// Returns `BatchStateError` if no batch is active.
    pub fn execute_batch(&mut self) -> Result<Analysis> {
        let Some(mut queue) = self.pending_batch.take() else {
            return Err(SpreadsheetError::BatchStateError(
                "no structural batch is active".to_string(),
            ));
        };

        queue.sort_by_key(|op| {
            let axis = if op.is_row_axis() { 0 } else { 1 };
            let index = op.axis_index();
            // Deletes ascending, inserts descending, per axis.
            let order_key = if op.is_delete() {
                index as i64
            } else {
                -(index as i64)
            };
            (axis, order_key)
        });

        let mut combined_warnings = Vec::new();
        for operation in &queue {
            let analysis = self.analyze_structural_operation(operation);
            combined_warnings.extend(analysis.warnings);
        }

        for operation in queue {
            self.apply_structural_operation_to_all(operation)?;
        }

        Ok(Analysis::from_warnings(combined_warnings))
    }

    /// Find all cells that reference a specific cell across all sheets
    pub fn find_references_to(&self, target_sheet: &str, target_address: &CellAddress) -> Vec<(String, CellAddress)> {
        let mut references = Vec::new();
        
        for sheet_name in self.workbook.sheet_names() {
            if let Some(sheet) = self.workbook.get_sheet(sheet_name) {
                let repository = sheet.repository();
                for (address, cell) in repository.lock().unwrap().iter() {
                    if cell.has_formula() {
                        if let CellValue::String(formula) = &cell.raw_value {
                            let target_ref = format!("{}!{}", target_sheet, target_address.to_a1());
                            if formula.contains(&target_ref) {
                                references.push((sheet_name.clone(), address));
                            }
                        }
                    }
                }
            }
        }
        
        references
    }

    /// Validate all formulas across all sheets
    pub fn validate_all_formulas(&self) -> Vec<(String, CellAddress, String)> {
        let mut errors = Vec::new();
        
        for sheet_name in self.workbook.sheet_names() {
            if let Some(sheet) = self.workbook.get_sheet(sheet_name) {
                let repository = sheet.repository();
                for (address, cell) in repository.lock().unwrap().iter() {
                    if cell.has_formula() {
                        if let CellValue::String(formula) = &cell.raw_value {
                            if formula.starts_with('=') {
                                if let Err(e) = FormulaParser::parse(&formula[1..]) {
                                    errors.push((
                                        sheet_name.clone(),
                                        address,
                                        format!("Parse error: {:?}", e),
                                    ));
                                }
                            }
                        }
                    }
                }
            }
        }
        
        errors
    }

    /// Get statistics about the workbook
    pub fn get_statistics(&self) -> WorkbookStatistics {
        let mut stats = WorkbookStatistics::default();
        
        stats.sheet_count = self.workbook.sheet_count();
        
        for sheet_name in self.workbook.sheet_names() {
            if let Some(sheet) = self.workbook.get_sheet(sheet_name) {
                let cell_count = sheet.cell_count();
                stats.total_cells += cell_count;
                
                let repository = sheet.repository();
                for (_, cell) in repository.lock().unwrap().iter() {
                    if cell.has_formula() {
                        stats.formula_cells += 1;
                    }
                    if cell.has_error() {
                        stats.error_cells += 1;
                    }
                }
            }
        }
        
        stats
    }
}

/// Statistics about a workbook
#[derive(Debug, Default, Clone)]
pub struct WorkbookStatistics {
    pub sheet_count: usize,
    pub total_cells: usize,
    pub formula_cells: usize,
    pub error_cells: usize,
}

impl Default for SheetManager {
    fn default() -> Self {
        Self::new()
    }
}
