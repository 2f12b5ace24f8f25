pub mod event;
pub mod spreadsheet_facade;

// Re-export main types
pub use crate::services::batch_manager::BatchManager;
pub use event::{EventCallback, EventType, SpreadsheetEvent};
pub use spreadsheet_facade::SpreadsheetFacade;
