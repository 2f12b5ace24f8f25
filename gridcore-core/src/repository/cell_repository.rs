use crate::Result;
use crate::domain::Cell;
use crate::types::CellAddress;
use std::collections::{HashMap, HashSet};

/// Maximum row/column a shift operation will place a cell at, mirroring
/// `CellAddress`'s own address-space limits.
const MAX_ROW: u32 = 1_048_576;
const MAX_COL: u32 = 16_384;

/// Repository for storing and managing spreadsheet cells
#[derive(Debug, Clone, Default)]
pub struct CellRepository {
    /// Cells keyed directly by address; `CellAddress` is `Hash + Eq`,
    /// so there is no need to format to and re-parse from a string key.
    cells: HashMap<CellAddress, Cell>,
}

impl CellRepository {
    /// Create a new empty repository
    pub fn new() -> Self {
        CellRepository {
            cells: HashMap::new(),
        }
    }

    /// Get a cell by its address
    pub fn get(&self, address: &CellAddress) -> Option<&Cell> {
        self.cells.get(address)
    }

    /// Get a mutable reference to a cell
    pub fn get_mut(&mut self, address: &CellAddress) -> Option<&mut Cell> {
        self.cells.get_mut(address)
    }

    /// Set a cell at the given address
    pub fn set(&mut self, address: &CellAddress, cell: Cell) {
        self.cells.insert(*address, cell);
    }

    /// Delete a cell at the given address
    pub fn delete(&mut self, address: &CellAddress) -> Option<Cell> {
        self.cells.remove(address)
    }

    /// Clear all cells from the repository
    pub fn clear(&mut self) {
        self.cells.clear();
    }

    /// Get all cells as a vector of (address, cell) pairs
    pub fn get_all(&self) -> Vec<(CellAddress, Cell)> {
        self.cells.iter().map(|(a, c)| (*a, c.clone())).collect()
    }

    /// Get all non-empty cells
    pub fn get_non_empty(&self) -> Vec<(CellAddress, Cell)> {
        self.cells
            .iter()
            .filter(|(_, cell)| !cell.is_empty())
            .map(|(a, c)| (*a, c.clone()))
            .collect()
    }

    /// Check if a cell exists at the given address
    pub fn contains(&self, address: &CellAddress) -> bool {
        self.cells.contains_key(address)
    }

    /// Get the number of cells in the repository
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Iterate over all cells in the repository
    pub fn iter(&self) -> impl Iterator<Item = (CellAddress, &Cell)> + '_ {
        self.cells.iter().map(|(a, c)| (*a, c))
    }

    /// Check if the repository is empty
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Get all cell addresses
    pub fn get_addresses(&self) -> Vec<CellAddress> {
        self.cells.keys().copied().collect()
    }

    /// Get all cell addresses as a HashSet
    pub fn get_all_addresses(&self) -> HashSet<CellAddress> {
        self.cells.keys().copied().collect()
    }

    /// Shift rows by the specified amount
    pub fn shift_rows(&mut self, start_row: u32, shift_amount: i32) -> Result<Vec<CellAddress>> {
        let cell_count = self.cells.len();
        let mut affected = Vec::with_capacity(cell_count);
        let mut updates = Vec::with_capacity(cell_count);

        // Collect cells that need to be shifted
        for (address, cell) in self.cells.iter() {
            if address.row >= start_row {
                let new_row = (address.row as i32 + shift_amount) as u32;
                if new_row < MAX_ROW {
                    let new_address = CellAddress::new(address.col, new_row);
                    updates.push((*address, new_address, cell.clone()));
                    affected.push(*address);
                }
            }
        }

        // Apply updates
        for (old_addr, new_addr, cell) in updates {
            self.cells.remove(&old_addr);
            self.cells.insert(new_addr, cell);
        }

        Ok(affected)
    }

    /// Smallest bounding box (maxRow, maxCol) enclosing every stored cell, as
    /// (count, count) rather than max index — empty repository is (0, 0).
    pub fn bounds(&self) -> (u32, u32) {
        let max_row = self.cells.keys().map(|a| a.row).max().map_or(0, |r| r + 1);
        let max_col = self.cells.keys().map(|a| a.col).max().map_or(0, |c| c + 1);
        (max_row, max_col)
    }

    /// Number of cells stored, an alias for [`Self::len`] matching the §4.E vocabulary.
    pub fn size(&self) -> usize {
        self.len()
    }

    /// Cells whose row falls in `[lo, hi]` inclusive.
    pub fn cells_in_row_range(&self, lo: u32, hi: u32) -> Vec<(CellAddress, Cell)> {
        self.cells
            .iter()
            .filter(|(a, _)| a.row >= lo && a.row <= hi)
            .map(|(a, c)| (*a, c.clone()))
            .collect()
    }

    /// Cells in a single row.
    pub fn cells_in_row(&self, row: u32) -> Vec<(CellAddress, Cell)> {
        self.cells_in_row_range(row, row)
    }

    /// Cells in a single column.
    pub fn cells_in_column(&self, col: u32) -> Vec<(CellAddress, Cell)> {
        self.cells
            .iter()
            .filter(|(a, _)| a.col == col)
            .map(|(a, c)| (*a, c.clone()))
            .collect()
    }

    /// Rough memory footprint, used for back-pressure decisions rather than exact accounting.
    pub fn estimated_bytes(&self) -> usize {
        const PER_CELL_ESTIMATE: usize = 128;
        self.cells.len() * PER_CELL_ESTIMATE
    }

    /// Whether the repository has crossed the configured soft memory ceiling.
    pub fn is_at_memory_limit(&self) -> bool {
        const MEMORY_LIMIT_BYTES: usize = 256 * 1024 * 1024;
        self.estimated_bytes() >= MEMORY_LIMIT_BYTES
    }

    /// Shift columns by the specified amount
    pub fn shift_columns(&mut self, start_col: u32, shift_amount: i32) -> Result<Vec<CellAddress>> {
        let cell_count = self.cells.len();
        let mut affected = Vec::with_capacity(cell_count);
        let mut updates = Vec::with_capacity(cell_count);

        // Collect cells that need to be shifted
        for (address, cell) in self.cells.iter() {
            if address.col >= start_col {
                let new_col = (address.col as i32 + shift_amount) as u32;
                if new_col < MAX_COL {
                    let new_address = CellAddress::new(new_col, address.row);
                    updates.push((*address, new_address, cell.clone()));
                    affected.push(*address);
                }
            }
        }

        // Apply updates
        for (old_addr, new_addr, cell) in updates {
            self.cells.remove(&old_addr);
            self.cells.insert(new_addr, cell);
        }

        Ok(affected)
    }
}
