use super::{FillDirection, FormulaAdjuster};
use crate::types::CellAddress;
use crate::{Result, SpreadsheetError};
use regex::Regex;

pub struct DefaultFormulaAdjuster;

impl DefaultFormulaAdjuster {
    pub fn new() -> Self {
        Self
    }

    fn parse_cell_reference(&self, reference: &str) -> Option<(bool, u32, bool, u32)> {
        let re = Regex::new(r"^(\$?)([A-Z]+)(\$?)(\d+)$").ok()?;

        if let Some(captures) = re.captures(reference) {
            let col_absolute = !captures.get(1)?.as_str().is_empty();
            let col_str = captures.get(2)?.as_str();
            let row_absolute = !captures.get(3)?.as_str().is_empty();
            let row_str = captures.get(4)?.as_str();

            let col = self.column_to_number(col_str)?;
            let row = row_str.parse::<u32>().ok()?;

            Some((col_absolute, col, row_absolute, row))
        } else {
            None
        }
    }

    fn column_to_number(&self, col_str: &str) -> Option<u32> {
        let mut result = 0u32;
        for c in col_str.chars() {
            result = result * 26 + (c as u32 - 'A' as u32 + 1);
        }
        Some(result - 1) // Convert to 0-based
    }

    fn number_to_column(&self, mut col: u32) -> String {
        let mut result = String::new();
        col += 1; // Convert to 1-based

        while col > 0 {
            col -= 1;
            result = format!("{}{}", (b'A' + (col % 26) as u8) as char, result);
            col /= 26;
        }

        result
    }

    fn adjust_reference(&self, reference: &str, from: &CellAddress, to: &CellAddress) -> String {
        if let Some((col_abs, col, row_abs, row)) = self.parse_cell_reference(reference) {
            let mut new_col = col;
            let mut new_row = row - 1; // Convert to 0-based for calculation

            // Adjust relative references
            if !col_abs {
                let col_diff = to.col as i32 - from.col as i32;
                new_col = ((col as i32) + col_diff).max(0) as u32;
            }

            if !row_abs {
                let row_diff = to.row as i32 - from.row as i32;
                new_row = ((new_row as i32) + row_diff).max(0) as u32;
            }

            // Reconstruct the reference
            format!(
                "{}{}{}{}",
                if col_abs { "$" } else { "" },
                self.number_to_column(new_col),
                if row_abs { "$" } else { "" },
                new_row + 1 // Convert back to 1-based
            )
        } else {
            reference.to_string()
        }
    }
}

impl FormulaAdjuster for DefaultFormulaAdjuster {
    fn adjust_formula(
        &self,
        formula: &str,
        from: &CellAddress,
        to: &CellAddress,
        _direction: FillDirection,
    ) -> Result<String> {
        if !formula.starts_with('=') {
            return Err(SpreadsheetError::InvalidOperation(
                "Not a formula".to_string(),
            ));
        }

        let formula_content = &formula[1..];

        // Simple regex to find cell references
        // This is a simplified version - a real implementation would use the formula parser
        let re = Regex::new(r"\$?[A-Z]+\$?\d+")
            .map_err(|e| SpreadsheetError::InvalidOperation(format!("Regex error: {}", e)))?;

        let mut result = String::from("=");
        let mut last_end = 0;

        for mat in re.find_iter(formula_content) {
            // Add the text before the match
            result.push_str(&formula_content[last_end..mat.start()]);

            // Adjust the reference
            let adjusted = self.adjust_reference(mat.as_str(), from, to);
            result.push_str(&adjusted);

            last_end = mat.end();
        }

        // Add any remaining text
        result.push_str(&formula_content[last_end..]);

        Ok(result)
    }
}
