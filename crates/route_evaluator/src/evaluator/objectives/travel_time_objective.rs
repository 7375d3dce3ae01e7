use super::objective::{IntraRouteObjective, ObjectiveInfo};

/// Seconds spent travelling.
#[derive(Clone, Debug, Default)]
pub struct TravelTimeObjective;

impl IntraRouteObjective for TravelTimeObjective {
    fn objective_value(&self, info: &ObjectiveInfo) -> f64 {
        info.travel_time.as_secs_f64()
    }
}
