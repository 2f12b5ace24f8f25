use crate::controller::events::ErrorSeverity;
use chrono::{DateTime, Duration, Utc};
use std::collections::VecDeque;

/// An error message with metadata
#[derive(Debug, Clone)]
pub struct ErrorEntry {
    pub id: usize,
    pub message: String,
    pub severity: ErrorSeverity,
    pub timestamp: DateTime<Utc>,
    pub auto_dismiss_after: Option<Duration>,
}

/// Manages application errors with queue and auto-dismiss functionality
pub struct ErrorManager {
    errors: VecDeque<ErrorEntry>,
    next_id: usize,
    max_errors: usize,
}

impl ErrorManager {
    /// Create a new ErrorManager with default capacity
    pub fn new() -> Self {
        Self {
            errors: VecDeque::new(),
            next_id: 0,
            max_errors: 100, // Keep max 100 errors in memory
        }
    }

    /// Create an ErrorManager with specified max capacity
    pub fn with_capacity(max_errors: usize) -> Self {
        Self {
            errors: VecDeque::with_capacity(max_errors),
            next_id: 0,
            max_errors,
        }
    }

    /// Add a new error to the queue
    pub fn add_error(&mut self, message: String, severity: ErrorSeverity) -> usize {
        let auto_dismiss_after = match severity {
            ErrorSeverity::Info => Some(Duration::seconds(5)),
            ErrorSeverity::Warning => Some(Duration::seconds(10)),
            ErrorSeverity::Error => None, // Errors don't auto-dismiss
        };

        let error = ErrorEntry {
            id: self.next_id,
            message,
            severity,
            timestamp: Utc::now(),
            auto_dismiss_after,
        };

        let id = error.id;
        self.next_id += 1;

        // Remove oldest errors if we're at capacity
        while self.errors.len() >= self.max_errors {
            self.errors.pop_front();
        }

        self.errors.push_back(error);
        id
    }

    /// Remove an error by ID
    pub fn remove_error(&mut self, id: usize) -> bool {
        if let Some(pos) = self.errors.iter().position(|e| e.id == id) {
            self.errors.remove(pos);
            true
        } else {
            false
        }
    }

    /// Get all current errors
    pub fn get_errors(&self) -> Vec<ErrorEntry> {
        self.errors.iter().cloned().collect()
    }

    /// Get errors that should still be displayed (not auto-dismissed)
    pub fn get_active_errors(&self) -> Vec<ErrorEntry> {
        let now = Utc::now();
        self.errors
            .iter()
            .filter(|error| {
                if let Some(dismiss_after) = error.auto_dismiss_after {
                    now.signed_duration_since(error.timestamp) < dismiss_after
                } else {
                    true // No auto-dismiss, always active
                }
            })
            .cloned()
            .collect()
    }

    /// Clear all errors
    pub fn clear_all(&mut self) {
        self.errors.clear();
    }

    /// Clean up expired errors (should be called periodically)
    pub fn cleanup_expired(&mut self) {
        let now = Utc::now();
        self.errors.retain(|error| {
            if let Some(dismiss_after) = error.auto_dismiss_after {
                now.signed_duration_since(error.timestamp) < dismiss_after
            } else {
                true
            }
        });
    }

    /// Get the count of active errors
    pub fn error_count(&self) -> usize {
        self.get_active_errors().len()
    }

    /// Check if there are any errors
    pub fn has_errors(&self) -> bool {
        !self.get_active_errors().is_empty()
    }
}

impl Default for ErrorManager {
    fn default() -> Self {
        Self::new()
    }
}
