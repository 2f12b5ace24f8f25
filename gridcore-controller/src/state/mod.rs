pub mod actions;
pub mod context;
pub mod diff;
pub mod machine;
pub mod spreadsheet;
pub mod transitions;

#[cfg(test)]
mod edge_case_tests;
#[cfg(test)]
mod performance_tests;
#[cfg(test)]
mod tests;

pub use actions::Action;
pub use context::StateContext;
pub use machine::UIStateMachine;
pub use spreadsheet::{
    BulkOperationStatus, CellMode, DeleteType, InsertMode, InsertPosition, InsertType,
    ParsedBulkCommand, ResizeMoveDirection, ResizeTarget, Selection, SelectionType,
    SpreadsheetMode, SpreadsheetVisualMode, UIState, ViewportInfo, VisualMode,
};
