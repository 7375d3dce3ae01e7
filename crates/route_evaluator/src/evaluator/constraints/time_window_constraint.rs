use super::constraint::{ConstraintInfo, IntraRouteConstraint};

/// A visit must start no later than the end of its time window. Depot nodes
/// and visits without a window end always pass.
#[derive(Clone, Debug, Default)]
pub struct TimeWindowConstraint;

impl IntraRouteConstraint for TimeWindowConstraint {
    fn is_feasible(&self, info: &ConstraintInfo) -> bool {
        info.node
            .visit()
            .is_none_or(|visit| visit.time_window().is_satisfied(info.start_time))
    }
}
