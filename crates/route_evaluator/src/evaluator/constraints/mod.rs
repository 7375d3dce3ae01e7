pub mod constraint;
pub mod constraint_registry;
pub mod overtime_constraint;
pub mod time_window_constraint;
