//! Serializes a formula AST back into formula text.
//!
//! Used to re-stringify expressions produced by [`super::transformer::FormulaTransformer`]
//! so a rewritten AST can be stored back as `Cell::formula_text`.

use super::ast::{BinaryOperator, Expr, UnaryOperator};
use crate::types::{CellAddress, CellValue};

pub struct FormulaPrinter;

impl FormulaPrinter {
    /// Render an expression as a formula string, without the leading `=`.
    pub fn print(expr: &Expr) -> String {
        Self::print_expr(expr, 0)
    }

    fn print_address(address: &CellAddress, absolute_col: bool, absolute_row: bool) -> String {
        let col = CellAddress::column_number_to_label(address.col);
        format!(
            "{}{}{}{}",
            if absolute_col { "$" } else { "" },
            col,
            if absolute_row { "$" } else { "" },
            address.row + 1
        )
    }

    fn print_binary_op(op: BinaryOperator) -> &'static str {
        match op {
            BinaryOperator::Add => "+",
            BinaryOperator::Subtract => "-",
            BinaryOperator::Multiply => "*",
            BinaryOperator::Divide => "/",
            BinaryOperator::Power => "^",
            BinaryOperator::Equal => "=",
            BinaryOperator::NotEqual => "<>",
            BinaryOperator::LessThan => "<",
            BinaryOperator::LessThanOrEqual => "<=",
            BinaryOperator::GreaterThan => ">",
            BinaryOperator::GreaterThanOrEqual => ">=",
            BinaryOperator::Concat => "&",
        }
    }

    fn print_literal(value: &CellValue) -> String {
        match value {
            CellValue::String(s) => format!("\"{}\"", s.replace('"', "\"\"")),
            other => other.to_display_string(),
        }
    }

    /// `parent_precedence` is the precedence of the enclosing binary operator, used to
    /// decide whether this subexpression needs parentheses.
    fn print_expr(expr: &Expr, parent_precedence: u8) -> String {
        match expr {
            Expr::Literal { value } => Self::print_literal(value),

            Expr::Reference {
                address,
                absolute_col,
                absolute_row,
            } => Self::print_address(address, *absolute_col, *absolute_row),

            Expr::Range {
                range,
                absolute_start_col,
                absolute_start_row,
                absolute_end_col,
                absolute_end_row,
            } => format!(
                "{}:{}",
                Self::print_address(&range.start, *absolute_start_col, *absolute_start_row),
                Self::print_address(&range.end, *absolute_end_col, *absolute_end_row),
            ),

            Expr::FunctionCall { name, args } => {
                let rendered_args: Vec<String> =
                    args.iter().map(|arg| Self::print_expr(arg, 0)).collect();
                format!("{}({})", name, rendered_args.join(", "))
            }

            Expr::UnaryOp { op, expr } => match op {
                UnaryOperator::Negate => format!("-{}", Self::print_expr(expr, 10)),
                UnaryOperator::Percent => format!("{}%", Self::print_expr(expr, 10)),
            },

            Expr::BinaryOp { op, left, right } => {
                let precedence = op.precedence();
                let left_str = Self::print_expr(left, precedence);
                // The right operand of a left-associative operator needs parens at
                // equal precedence to preserve evaluation order; right-associative
                // (Power) doesn't.
                let right_min_precedence = if op.is_left_associative() {
                    precedence + 1
                } else {
                    precedence
                };
                let right_str = Self::print_expr(right, right_min_precedence);

                let rendered = format!(
                    "{} {} {}",
                    left_str,
                    Self::print_binary_op(*op),
                    right_str
                );

                if precedence < parent_precedence {
                    format!("({})", rendered)
                } else {
                    rendered
                }
            }
        }
    }
}
