//! Concrete implementations of service traits

pub mod batch_operations_impl;
pub mod calculation_service_impl;
pub mod cell_operations_impl;
pub mod event_service_impl;
pub mod structural_operations_impl;

pub use batch_operations_impl::BatchOperationsServiceImpl;
pub use calculation_service_impl::CalculationServiceImpl;
pub use cell_operations_impl::CellOperationsServiceImpl;
pub use event_service_impl::EventServiceImpl;
pub use structural_operations_impl::StructuralOperationsServiceImpl;
