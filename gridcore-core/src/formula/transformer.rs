use crate::SpreadsheetError;
use crate::formula::ast::{CellRange, Expr};
use crate::types::{CellAddress, CellValue, ErrorType};

/// Transformer for adjusting formulas during structural operations
#[derive(Debug, Clone)]
pub struct FormulaTransformer;

impl FormulaTransformer {
    /// Create a new formula transformer
    pub fn new() -> Self {
        FormulaTransformer
    }

    /// Adjust formula references when a row is inserted
    pub fn adjust_for_row_insert(&self, ast: Expr, inserted_row: u32) -> Expr {
        self.transform_expr(ast, |addr, abs_col, abs_row| {
            let mut new_addr = *addr;
            // An absolute row reference never shifts.
            if !abs_row && addr.row >= inserted_row {
                new_addr.row += 1;
            }
            Ok((new_addr, abs_col, abs_row))
        })
    }

    /// Adjust formula references when a row is deleted
    pub fn adjust_for_row_delete(&self, ast: Expr, deleted_row: u32) -> Expr {
        self.transform_expr(ast, |addr, abs_col, abs_row| {
            let mut new_addr = *addr;

            // An absolute row reference is never shifted or invalidated.
            if abs_row {
                return Ok((new_addr, abs_col, abs_row));
            }

            // If the reference is to the deleted row, return #REF! error
            if addr.row == deleted_row {
                return Err(SpreadsheetError::RefError);
            }

            // Adjust references beyond the deleted row
            if addr.row > deleted_row {
                new_addr.row -= 1;
            }

            Ok((new_addr, abs_col, abs_row))
        })
    }

    /// Adjust formula references when a column is inserted
    pub fn adjust_for_column_insert(&self, ast: Expr, inserted_col: u32) -> Expr {
        self.transform_expr(ast, |addr, abs_col, abs_row| {
            let mut new_addr = *addr;
            // An absolute column reference never shifts.
            if !abs_col && addr.col >= inserted_col {
                new_addr.col += 1;
            }
            Ok((new_addr, abs_col, abs_row))
        })
    }

    /// Adjust formula references when a column is deleted
    pub fn adjust_for_column_delete(&self, ast: Expr, deleted_col: u32) -> Expr {
        self.transform_expr(ast, |addr, abs_col, abs_row| {
            let mut new_addr = *addr;

            // An absolute column reference is never shifted or invalidated.
            if abs_col {
                return Ok((new_addr, abs_col, abs_row));
            }

            // If the reference is to the deleted column, return #REF! error
            if addr.col == deleted_col {
                return Err(SpreadsheetError::RefError);
            }

            // Adjust references beyond the deleted column
            if addr.col > deleted_col {
                new_addr.col -= 1;
            }

            Ok((new_addr, abs_col, abs_row))
        })
    }

    /// Adjust formula references when a range of cells is moved
    pub fn adjust_for_range_move(
        &self,
        ast: Expr,
        from_start: &CellAddress,
        from_end: &CellAddress,
        to_start: &CellAddress,
    ) -> Expr {
        let row_delta = to_start.row as i32 - from_start.row as i32;
        let col_delta = to_start.col as i32 - from_start.col as i32;

        self.transform_expr(ast, |addr, abs_col, abs_row| {
            let mut new_addr = *addr;

            // Check if the address is within the moved range
            if addr.col >= from_start.col
                && addr.col <= from_end.col
                && addr.row >= from_start.row
                && addr.row <= from_end.row
            {
                // Move the reference with the range
                new_addr.col = ((addr.col as i32) + col_delta) as u32;
                new_addr.row = ((addr.row as i32) + row_delta) as u32;
            }

            Ok((new_addr, abs_col, abs_row))
        })
    }

    /// Transform an expression by applying a transformation function to all cell references
    #[allow(clippy::only_used_in_recursion)]
    fn transform_expr<F>(&self, expr: Expr, transform: F) -> Expr
    where
        F: Fn(&CellAddress, bool, bool) -> Result<(CellAddress, bool, bool), SpreadsheetError>
            + Clone,
    {
        match expr {
            Expr::Literal { value } => Expr::Literal { value },

            Expr::Reference {
                address,
                absolute_col,
                absolute_row,
            } => match transform(&address, absolute_col, absolute_row) {
                Ok((new_addr, new_abs_col, new_abs_row)) => Expr::Reference {
                    address: new_addr,
                    absolute_col: new_abs_col,
                    absolute_row: new_abs_row,
                },
                Err(_) => Expr::Literal {
                    value: CellValue::from_error(ErrorType::InvalidRef {
                        reference: "deleted".to_string(),
                    }),
                },
            },

            Expr::Range {
                range,
                absolute_start_col,
                absolute_start_row,
                absolute_end_col,
                absolute_end_row,
            } => {
                let start_result = transform(&range.start, absolute_start_col, absolute_start_row);
                let end_result = transform(&range.end, absolute_end_col, absolute_end_row);

                match (start_result, end_result) {
                    (
                        Ok((new_start, start_abs_col, start_abs_row)),
                        Ok((new_end, end_abs_col, end_abs_row)),
                    ) => Expr::Range {
                        range: CellRange::new(new_start, new_end),
                        absolute_start_col: start_abs_col,
                        absolute_start_row: start_abs_row,
                        absolute_end_col: end_abs_col,
                        absolute_end_row: end_abs_row,
                    },
                    _ => Expr::Literal {
                        value: CellValue::from_error(ErrorType::InvalidRef {
                            reference: "deleted".to_string(),
                        }),
                    },
                }
            }

            Expr::FunctionCall { name, args } => {
                let new_args = args
                    .into_iter()
                    .map(|arg| self.transform_expr(arg, transform.clone()))
                    .collect();
                Expr::FunctionCall {
                    name,
                    args: new_args,
                }
            }

            Expr::UnaryOp { op, expr } => Expr::UnaryOp {
                op,
                expr: Box::new(self.transform_expr(*expr, transform)),
            },

            Expr::BinaryOp { op, left, right } => Expr::BinaryOp {
                op,
                left: Box::new(self.transform_expr(*left, transform.clone())),
                right: Box::new(self.transform_expr(*right, transform)),
            },
        }
    }

    /// Shift all references in a formula by the given row and column deltas
    pub fn shift_references(&self, ast: Expr, row_delta: i32, col_delta: i32) -> Expr {
        self.transform_expr(ast, |addr, abs_col, abs_row| {
            let new_col = (addr.col as i32 + col_delta).max(0) as u32;
            let new_row = (addr.row as i32 + row_delta).max(0) as u32;
            Ok((CellAddress::new(new_col, new_row), abs_col, abs_row))
        })
    }
}

impl Default for FormulaTransformer {
    fn default() -> Self {
        Self::new()
    }
}
