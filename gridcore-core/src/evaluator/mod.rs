pub mod context;
pub mod engine;
pub mod functions;
pub mod helpers;
pub mod operators;

pub use context::{EvaluationContext, PortContext, RepositoryContext};
pub use engine::Evaluator;
pub use functions::FunctionLibrary;
pub use helpers::{evaluate_cell_formula, parse_cell_value};
