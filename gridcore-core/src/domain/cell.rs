use crate::constants::*;
use crate::types::{CellValue, ErrorType};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Represents a spreadsheet cell with its value and optional formula
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Cell {
    /// The raw value entered by the user (could be a formula string)
    pub raw_value: CellValue,

    /// The computed value after formula evaluation
    pub computed_value: CellValue,

    /// The formula text if this cell contains a formula (without the leading '=')
    pub formula_text: Option<Arc<str>>,

    /// Any error that occurred during parsing or evaluation
    pub error: Option<Arc<str>>,
}

impl Cell {
    /// Create a new cell with a value
    pub fn new(value: CellValue) -> Self {
        let computed = value.clone();
        Cell {
            raw_value: value,
            computed_value: computed,
            formula_text: None,
            error: None,
        }
    }

    /// Create a cell with a formula
    pub fn with_formula(raw_value: CellValue, formula_text: String) -> Self {
        Cell {
            raw_value,
            computed_value: CellValue::Empty, // Will be computed later
            formula_text: Some(Arc::from(formula_text.as_str())),
            error: None,
        }
    }

    /// Create a cell with an error
    pub fn with_error(raw_value: CellValue, error: String) -> Self {
        // Parse the error string to determine the appropriate ErrorType
        let error_arc = Arc::from(error.as_str());
        let error_type = if error.contains(ERROR_DIV_ZERO) || error.contains(DESC_DIVISION_BY_ZERO)
        {
            ErrorType::DivideByZero
        } else if error.contains(ERROR_REF) || error.contains(DESC_INVALID_REFERENCE) {
            ErrorType::InvalidRef {
                reference: error.clone(),
            }
        } else if error.contains(ERROR_NAME) || error.contains(DESC_UNKNOWN_FUNCTION) {
            ErrorType::NameError {
                name: error.clone(),
            }
        } else if error.contains(ERROR_VALUE) || error.contains(DESC_TYPE_MISMATCH) {
            ErrorType::ValueError {
                expected: ERROR_VALID_VALUE.to_string(),
                actual: error.clone(),
            }
        } else if error.contains(ERROR_CIRC) || error.contains(DESC_CIRCULAR_REFERENCE) {
            ErrorType::CircularDependency { cells: Vec::new() }
        } else if error.contains(ERROR_NUM) {
            ErrorType::NumError
        } else {
            ErrorType::ParseError {
                message: error.clone(),
            }
        };

        Cell {
            raw_value,
            computed_value: CellValue::from_error(error_type),
            formula_text: None,
            error: Some(error_arc),
        }
    }

    /// Create an empty cell
    pub fn empty() -> Self {
        Cell {
            raw_value: CellValue::Empty,
            computed_value: CellValue::Empty,
            formula_text: None,
            error: None,
        }
    }

    /// Check if the cell contains a formula
    pub fn has_formula(&self) -> bool {
        self.formula_text.is_some()
    }

    /// Check if the cell has an error
    pub fn has_error(&self) -> bool {
        self.error.is_some()
    }

    /// Check if the cell is empty
    pub fn is_empty(&self) -> bool {
        matches!(self.raw_value, CellValue::Empty)
    }

    /// Get the display value (computed value or error)
    pub fn get_display_value(&self) -> &CellValue {
        &self.computed_value
    }

    /// Get the computed value
    pub fn get_computed_value(&self) -> CellValue {
        self.computed_value.clone()
    }

    /// Update the computed value
    pub fn set_computed_value(&mut self, value: CellValue) {
        self.computed_value = value;
        self.error = None;
    }

    /// Set an error on the cell
    pub fn set_error(&mut self, error: String) {
        // Convert to Arc for storage
        let error_arc = Arc::from(error.as_str());
        self.error = Some(Arc::clone(&error_arc));

        // Parse the error string to determine the appropriate ErrorType
        let error_type = if error.contains("#DIV/0!") || error.contains("Division by zero") {
            ErrorType::DivideByZero
        } else if error.contains("#REF!") || error.contains("Invalid reference") {
            ErrorType::InvalidRef {
                reference: error.clone(),
            }
        } else if error.contains("#NAME?") || error.contains("Unknown function") {
            ErrorType::NameError {
                name: error.clone(),
            }
        } else if error.contains("#VALUE!") || error.contains("Type mismatch") {
            ErrorType::ValueError {
                expected: "valid".to_string(),
                actual: error.clone(),
            }
        } else if error.contains("#CIRC!") || error.contains("Circular") {
            ErrorType::CircularDependency { cells: Vec::new() }
        } else if error.contains("#NUM!") {
            ErrorType::NumError
        } else {
            ErrorType::ParseError {
                message: error.clone(),
            }
        };

        self.computed_value = CellValue::from_error(error_type);
    }
}
