use crate::evaluator::overtime::overtime;

use super::objective::{IntraRouteObjective, ObjectiveInfo};

/// Seconds the worker is back at the office after the end of the shift.
/// Charged once, when the route reaches the destination.
#[derive(Clone, Debug, Default)]
pub struct OvertimeObjective;

impl IntraRouteObjective for OvertimeObjective {
    fn objective_value(&self, info: &ObjectiveInfo) -> f64 {
        if !info.to.is_destination() {
            return 0.0;
        }

        overtime(info.shift.end(), info.arrival_time).as_secs_f64()
    }
}
