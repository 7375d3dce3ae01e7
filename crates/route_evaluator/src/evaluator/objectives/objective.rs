use jiff::{SignedDuration, Timestamp};

use crate::{evaluator::search_graph::Node, problem::shift::Shift};

/// A partial route ending at `from`, extended by one node `to`.
pub struct ObjectiveInfo<'a> {
    pub shift: &'a Shift,
    pub from: &'a Node,
    pub to: &'a Node,
    pub departure_time: Timestamp,
    pub travel_time: SignedDuration,
    pub arrival_time: Timestamp,
    pub start_time: Timestamp,
    pub end_time: Timestamp,
    pub earliest_office_return: Timestamp,
}

/// Cost term charged on every label extension.
///
/// Terms must be pure and must not decrease when the extension happens
/// later, otherwise dominance may prune the optimal route.
pub trait IntraRouteObjective: Send + Sync {
    fn objective_value(&self, info: &ObjectiveInfo) -> f64;
}
