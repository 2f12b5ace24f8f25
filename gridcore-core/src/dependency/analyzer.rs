use std::collections::HashSet;
use crate::formula::ast::{Expr, CellRange};
use crate::types::CellAddress;

/// Analyzes formula ASTs to extract cell dependencies
pub struct DependencyAnalyzer;

impl DependencyAnalyzer {
    /// Extract all cell addresses referenced in a formula expression
    pub fn extract_dependencies(expr: &Expr) -> HashSet<CellAddress> {
        let mut dependencies = HashSet::new();
        Self::extract_from_expr(expr, &mut dependencies);
        dependencies
    }
    
    /// Recursively extract dependencies from an expression
    fn extract_from_expr(expr: &Expr, dependencies: &mut HashSet<CellAddress>) {
        match expr {
            Expr::Reference { address, .. } => {
                dependencies.insert(address.clone());
            }
            
            Expr::Range { range, .. } => {
                // Add all cells in the range
                for cell in range.cells() {
                    dependencies.insert(cell);
                }
            }
            
            Expr::FunctionCall { args, .. } => {
                // Recursively check all function arguments
                for arg in args {
                    Self::extract_from_expr(arg, dependencies);
                }
            }
            
            Expr::UnaryOp { expr, .. } => {
                Self::extract_from_expr(expr, dependencies);
            }
            
            Expr::BinaryOp { left, right, .. } => {
                Self::extract_from_expr(left, dependencies);
                Self::extract_from_expr(right, dependencies);
            }
            
            Expr::Literal { .. } => {
                // Literals don't have dependencies
            }
        }
    }
    
    /// Check if an expression contains any cell references
    pub fn has_dependencies(expr: &Expr) -> bool {
        match expr {
            Expr::Reference { .. } | Expr::Range { .. } => true,
            
            Expr::FunctionCall { args, .. } => {
                args.iter().any(Self::has_dependencies)
            }
            
            Expr::UnaryOp { expr, .. } => Self::has_dependencies(expr),
            
            Expr::BinaryOp { left, right, .. } => {
                Self::has_dependencies(left) || Self::has_dependencies(right)
            }
            
            Expr::Literal { .. } => false,
        }
    }
    
    /// Count the number of unique cell references in an expression
    pub fn count_dependencies(expr: &Expr) -> usize {
        Self::extract_dependencies(expr).len()
    }
    
    /// Check if an expression references a specific cell
    pub fn references_cell(expr: &Expr, target: &CellAddress) -> bool {
        match expr {
            Expr::Reference { address, .. } => address == target,
            
            Expr::Range { range, .. } => range.contains(target),
            
            Expr::FunctionCall { args, .. } => {
                args.iter().any(|arg| Self::references_cell(arg, target))
            }
            
            Expr::UnaryOp { expr, .. } => Self::references_cell(expr, target),
            
            Expr::BinaryOp { left, right, .. } => {
                Self::references_cell(left, target) || Self::references_cell(right, target)
            }
            
            Expr::Literal { .. } => false,
        }
    }
    
    /// Check if an expression references any cell in a range
    pub fn references_range(expr: &Expr, range: &CellRange) -> bool {
        let dependencies = Self::extract_dependencies(expr);
        dependencies.iter().any(|addr| range.contains(addr))
    }
}
