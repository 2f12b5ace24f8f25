pub mod sheet;
pub mod sheet_manager;
pub mod workbook;

pub use self::sheet::{Sheet, SheetProperties};
pub use self::sheet_manager::{
    Analysis, RiskGrade, SheetManager, StructuralOperation, StructuralWarning,
    StructuralWarningKind, WarningSeverity,
};
pub use self::workbook::{Workbook, WorkbookMetadata};

#[cfg(test)]
mod tests;
