use jiff::Timestamp;

use crate::define_index_newtype;

use super::{
    extend_info::ExtendPosition, objectives::weighted_objective::WeightedObjective,
    search_graph::NodeIdx,
};

define_index_newtype!(LabelIdx, Label);

/// A partial route. The path is recovered by following `parent` back to the
/// origin label.
#[derive(Debug, Clone)]
pub struct Label {
    pub(crate) node: NodeIdx,
    pub(crate) position: ExtendPosition,
    pub(crate) parent: Option<LabelIdx>,
    pub(crate) is_inserted: bool,
    pub(crate) arrival_time: Timestamp,
    pub(crate) start_time: Timestamp,
    /// Time the worker leaves the node, the time resource used for dominance.
    pub(crate) end_time: Timestamp,
    pub(crate) objective: WeightedObjective,
}

impl Label {
    pub fn node(&self) -> NodeIdx {
        self.node
    }

    pub fn position(&self) -> ExtendPosition {
        self.position
    }

    pub fn parent(&self) -> Option<LabelIdx> {
        self.parent
    }

    pub fn arrival_time(&self) -> Timestamp {
        self.arrival_time
    }

    pub fn start_time(&self) -> Timestamp {
        self.start_time
    }

    pub fn end_time(&self) -> Timestamp {
        self.end_time
    }

    pub fn objective(&self) -> &WeightedObjective {
        &self.objective
    }

    pub fn objective_value(&self) -> f64 {
        self.objective.objective_value()
    }

    /// No later and no more expensive than `other`. Equal labels cover each
    /// other, so the first one found is kept.
    pub fn covers(&self, other: &Label) -> bool {
        self.end_time <= other.end_time && self.objective_value() <= other.objective_value()
    }
}
