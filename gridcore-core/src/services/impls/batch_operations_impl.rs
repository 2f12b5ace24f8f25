//! Implementation of BatchOperationsService trait
//!
//! Thin wrapper around [`crate::services::batch_manager::BatchManager`]. Callers that need
//! the rolled-back journal to actually restore cell state (the facade does) use
//! `BatchManager` directly instead of this trait object, since the trait's
//! `rollback_batch` signature has no way to return the journal.

use crate::services::batch_manager::BatchManager;
use crate::traits::BatchOperationsService;
use crate::{Result, SpreadsheetError};
use std::sync::{Arc, Mutex};

/// Concrete implementation of BatchOperationsService
pub struct BatchOperationsServiceImpl {
    batch_manager: Arc<Mutex<BatchManager>>,
}

impl BatchOperationsServiceImpl {
    /// Create a new BatchOperationsServiceImpl
    pub fn new() -> Self {
        Self {
            batch_manager: Arc::new(Mutex::new(BatchManager::new())),
        }
    }
}

impl BatchOperationsService for BatchOperationsServiceImpl {
    fn start_batch(&self, description: Option<String>) -> String {
        let mut manager = match self.batch_manager.lock() {
            Ok(m) => m,
            Err(_) => return String::new(),
        };

        manager.begin_batch(description)
    }

    fn commit_batch(&self, batch_id: &str) -> Result<()> {
        let mut manager = self.batch_manager.lock().map_err(|_| {
            SpreadsheetError::LockError("Failed to acquire batch manager lock".to_string())
        })?;

        manager.commit_batch(batch_id)
    }

    fn rollback_batch(&self, batch_id: &str) -> Result<()> {
        let mut manager = self.batch_manager.lock().map_err(|_| {
            SpreadsheetError::LockError("Failed to acquire batch manager lock".to_string())
        })?;

        manager.rollback_batch(batch_id)?;
        Ok(())
    }

    fn has_active_batch(&self) -> bool {
        match self.batch_manager.lock() {
            Ok(manager) => manager.has_active_batches(),
            Err(_) => false,
        }
    }
}

impl Default for BatchOperationsServiceImpl {
    fn default() -> Self {
        Self::new()
    }
}
