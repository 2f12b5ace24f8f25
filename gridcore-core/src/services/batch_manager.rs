use crate::domain::Cell;
use crate::types::CellAddress;
use crate::Result;
use std::collections::HashMap;

/// Tracks, per open batch, the pre-mutation state of every address touched
/// while that batch was active. Only the first write to an address within a
/// batch is recorded, so rollback always restores the state from before the
/// batch began, even if the address was written to more than once.
#[derive(Debug, Default)]
struct BatchJournal {
    entries: HashMap<CellAddress, Option<Cell>>,
    /// Insertion order, so replay can restore cells in a stable order.
    order: Vec<CellAddress>,
}

impl BatchJournal {
    fn record(&mut self, address: CellAddress, previous: Option<Cell>) {
        if !self.entries.contains_key(&address) {
            self.order.push(address);
            self.entries.insert(address, previous);
        }
    }
}

/// Manages nested batches of cell mutations for transactional commit/rollback.
///
/// Batches nest LIFO: the most recently begun batch must be the next one
/// committed or rolled back. Every mutation made while one or more batches
/// are open is journaled into *all* currently open batches, so rolling back
/// an inner batch restores exactly what that batch changed, and rolling back
/// an outer batch restores everything since it began.
#[derive(Debug, Default)]
pub struct BatchManager {
    /// Open batches, outermost first; the last entry is the innermost/active one.
    stack: Vec<String>,
    journals: HashMap<String, BatchJournal>,
    batch_counter: usize,
}

impl BatchManager {
    /// Create a new batch manager
    pub fn new() -> Self {
        Self::default()
    }

    /// Begin a new (possibly nested) batch, returning its id.
    pub fn begin_batch(&mut self, batch_id: Option<String>) -> String {
        let id = batch_id.unwrap_or_else(|| {
            self.batch_counter += 1;
            format!("batch_{}", self.batch_counter)
        });

        self.journals.insert(id.clone(), BatchJournal::default());
        self.stack.push(id.clone());
        id
    }

    /// Record the pre-mutation state of `address` into every currently open batch.
    pub fn record_change(&mut self, address: CellAddress, previous: Option<Cell>) {
        for batch_id in &self.stack {
            if let Some(journal) = self.journals.get_mut(batch_id) {
                journal.record(address, previous.clone());
            }
        }
    }

    /// Commit a batch. Must be the innermost open batch (LIFO).
    pub fn commit_batch(&mut self, batch_id: &str) -> Result<()> {
        self.require_innermost(batch_id)?;
        self.stack.pop();
        self.journals.remove(batch_id);
        Ok(())
    }

    /// Roll back a batch, returning the (address, previous state) journal to replay
    /// against the repository in insertion order. Must be the innermost open batch.
    pub fn rollback_batch(&mut self, batch_id: &str) -> Result<Vec<(CellAddress, Option<Cell>)>> {
        self.require_innermost(batch_id)?;
        self.stack.pop();
        let journal = self.journals.remove(batch_id).unwrap_or_default();
        Ok(journal
            .order
            .into_iter()
            .rev()
            .map(|addr| {
                let previous = journal.entries.get(&addr).cloned().flatten();
                (addr, previous)
            })
            .collect())
    }

    fn require_innermost(&self, batch_id: &str) -> Result<()> {
        match self.stack.last() {
            Some(innermost) if innermost == batch_id => Ok(()),
            Some(_) => Err(crate::SpreadsheetError::BatchStateError(format!(
                "batch '{}' is not the innermost open batch; batches must commit/rollback in LIFO order",
                batch_id
            ))),
            None => Err(crate::SpreadsheetError::BatchNotFound(batch_id.to_string())),
        }
    }

    /// Check if a batch is currently open
    pub fn has_batch(&self, batch_id: &str) -> bool {
        self.journals.contains_key(batch_id)
    }

    /// Check if any batch is open
    pub fn has_active_batches(&self) -> bool {
        !self.stack.is_empty()
    }

    /// The innermost currently open batch, if any.
    pub fn current_batch(&self) -> Option<&str> {
        self.stack.last().map(String::as_str)
    }

    /// Get all open batch ids, outermost first.
    pub fn active_batch_ids(&self) -> Vec<String> {
        self.stack.clone()
    }

    /// Clear all batches without replaying any journal.
    pub fn clear(&mut self) {
        self.stack.clear();
        self.journals.clear();
    }
}
