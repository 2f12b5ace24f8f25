use super::ErrorType;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum CellValue {
    Empty,
    Number(f64),
    String(String),
    Boolean(bool),
    Error(Arc<ErrorType>),
    Array(Vec<CellValue>),
}

impl CellValue {
    /// Build a string value
    pub fn from_string(value: String) -> Self {
        CellValue::String(value)
    }

    /// Build an error value from an ErrorType
    pub fn from_error(error_type: ErrorType) -> Self {
        CellValue::Error(Arc::new(error_type))
    }

    /// Build an array value
    pub fn from_array(values: Vec<CellValue>) -> Self {
        CellValue::Array(values)
    }

    /// Check if the value is numeric
    pub fn is_number(&self) -> bool {
        matches!(self, CellValue::Number(_))
    }

    /// Check if the value is a string
    pub fn is_string(&self) -> bool {
        matches!(self, CellValue::String(_))
    }

    /// Check if the value is a boolean
    pub fn is_boolean(&self) -> bool {
        matches!(self, CellValue::Boolean(_))
    }

    /// Check if the value is empty
    pub fn is_empty(&self) -> bool {
        matches!(self, CellValue::Empty)
    }

    /// Check if the value is an error
    pub fn is_error(&self) -> bool {
        matches!(self, CellValue::Error(_))
    }

    /// Check if the value is an array
    pub fn is_array(&self) -> bool {
        matches!(self, CellValue::Array(_))
    }

    /// Try to get the numeric value
    pub fn as_number(&self) -> Option<f64> {
        match self {
            CellValue::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// Try to get the string value
    pub fn as_string(&self) -> Option<&str> {
        match self {
            CellValue::String(s) => Some(s),
            _ => None,
        }
    }

    /// Try to get the boolean value
    pub fn as_boolean(&self) -> Option<bool> {
        match self {
            CellValue::Boolean(b) => Some(*b),
            _ => None,
        }
    }

    /// Try to get the error type
    pub fn as_error(&self) -> Option<&ErrorType> {
        match self {
            CellValue::Error(e) => Some(e),
            _ => None,
        }
    }

    /// Name of the variant, used in type-mismatch error messages
    pub fn type_name(&self) -> &'static str {
        match self {
            CellValue::Empty => "empty",
            CellValue::Number(_) => "number",
            CellValue::String(_) => "string",
            CellValue::Boolean(_) => "boolean",
            CellValue::Error(_) => "error",
            CellValue::Array(_) => "array",
        }
    }

    /// Convert to a display string (what the grid renders in a cell)
    pub fn to_display_string(&self) -> String {
        match self {
            CellValue::Number(n) => {
                if n.fract() == 0.0 && n.abs() < 1e15 {
                    format!("{:.0}", n)
                } else {
                    n.to_string()
                }
            }
            CellValue::String(s) => s.clone(),
            CellValue::Boolean(b) => if *b { "TRUE" } else { "FALSE" }.to_string(),
            CellValue::Empty => String::new(),
            CellValue::Error(e) => e.to_string(),
            CellValue::Array(arr) => {
                let values: Vec<String> = arr.iter().map(|v| v.to_display_string()).collect();
                format!("{{{}}}", values.join(", "))
            }
        }
    }
}

impl Default for CellValue {
    fn default() -> Self {
        CellValue::Empty
    }
}

impl std::fmt::Display for CellValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_display_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constructors() {
        assert_eq!(
            CellValue::from_string("hi".to_string()),
            CellValue::String("hi".to_string())
        );
        assert!(CellValue::from_error(ErrorType::DivideByZero).is_error());
        assert!(CellValue::from_array(vec![CellValue::Number(1.0)]).is_array());
    }

    #[test]
    fn test_type_checks() {
        assert!(CellValue::Number(1.0).is_number());
        assert!(CellValue::String("x".to_string()).is_string());
        assert!(CellValue::Boolean(true).is_boolean());
        assert!(CellValue::Empty.is_empty());
    }

    #[test]
    fn test_display_numbers() {
        assert_eq!(CellValue::Number(42.0).to_display_string(), "42");
        assert_eq!(CellValue::Number(42.5).to_display_string(), "42.5");
    }

    #[test]
    fn test_display_error() {
        let v = CellValue::from_error(ErrorType::DivideByZero);
        assert_eq!(v.to_display_string(), "#DIV/0!");
    }
}
