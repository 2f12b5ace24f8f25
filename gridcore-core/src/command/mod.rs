mod command;
mod execution;
mod undo_redo_manager;


pub use command::{Command, CommandExecutor, CommandMetadata, SpreadsheetCommand};
pub use execution::CommandExecutorImpl;
pub use undo_redo_manager::{UndoRedoConfig, UndoRedoManager};
