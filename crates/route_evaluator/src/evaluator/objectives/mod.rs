pub mod objective;
pub mod objective_registry;
pub mod overtime_objective;
pub mod travel_time_objective;
pub mod weighted_objective;
