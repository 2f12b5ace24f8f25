pub mod selection_stats;
pub mod shared;
pub mod vim;
