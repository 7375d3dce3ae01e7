use jiff::Timestamp;

use crate::{
    evaluator::search_graph::Node,
    problem::shift::{Shift, ShiftIdx},
    utils::type_name::short_type_name,
};

/// Resources of a partial route right after it has been extended to `node`.
pub struct ConstraintInfo<'a> {
    pub shift: &'a Shift,
    pub node: &'a Node,
    pub arrival_time: Timestamp,
    pub start_time: Timestamp,
    pub end_time: Timestamp,
    /// Earliest time the worker can be back at the destination depot.
    pub earliest_office_return: Timestamp,
}

impl ConstraintInfo<'_> {
    pub fn shift_id(&self) -> ShiftIdx {
        self.shift.id()
    }
}

/// Hard, intra-route feasibility rule checked on every label extension.
///
/// Constraints must be monotone in time: if an extension is infeasible, the
/// same extension starting later must be infeasible too. Label dominance
/// relies on it.
pub trait IntraRouteConstraint: Send + Sync {
    fn is_feasible(&self, info: &ConstraintInfo) -> bool;

    /// Name used when the constraint is registered without one.
    fn constraint_name(&self) -> &'static str {
        short_type_name::<Self>()
    }
}
