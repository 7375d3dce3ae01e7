pub mod location;
pub mod shift;
pub mod time_window;
pub mod travel_time_matrix;
pub mod vehicle_profile;
pub mod visit;
