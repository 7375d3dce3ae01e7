use fxhash::FxHashMap;
use jiff::Timestamp;

use crate::{
    evaluator::overtime::{is_overtime, latest_allowed_end_of_shift},
    problem::shift::{Shift, ShiftIdx},
};

use super::constraint::{ConstraintInfo, IntraRouteConstraint};

/// Rejects routes whose worker cannot be back at the office before the end
/// of the shift plus the shift's overtime allowance.
///
/// The latest allowed return is precomputed per shift, so a check is a
/// single comparison. Shifts not known at construction fall back to their
/// own allowance.
#[derive(Clone, Debug)]
pub struct OvertimeConstraint {
    latest_allowed_ends: FxHashMap<ShiftIdx, Timestamp>,
}

impl OvertimeConstraint {
    pub fn new<'a>(shifts: impl IntoIterator<Item = &'a Shift>) -> Self {
        OvertimeConstraint {
            latest_allowed_ends: shifts
                .into_iter()
                .map(|shift| (shift.id(), latest_allowed_end_of_shift(shift)))
                .collect(),
        }
    }

    pub fn latest_allowed_end(&self, shift: &Shift) -> Timestamp {
        self.latest_allowed_ends
            .get(&shift.id())
            .copied()
            .unwrap_or_else(|| latest_allowed_end_of_shift(shift))
    }
}

impl IntraRouteConstraint for OvertimeConstraint {
    fn is_feasible(&self, info: &ConstraintInfo) -> bool {
        !is_overtime(
            self.latest_allowed_end(info.shift),
            info.earliest_office_return,
        )
    }
}

#[cfg(test)]
mod tests {
    use crate::{
        evaluator::search_graph::NodeIdx,
        test_utils::{self, ts},
    };

    use super::*;

    fn is_feasible(constraint: &OvertimeConstraint, shift: &Shift, office_return: i64) -> bool {
        let visits = test_utils::create_basic_visits(vec![1]);
        let graph = test_utils::create_test_graph(2, &visits);
        constraint.is_feasible(&ConstraintInfo {
            shift,
            node: graph.node(NodeIdx::new(1)),
            arrival_time: ts(office_return),
            start_time: ts(office_return),
            end_time: ts(office_return),
            earliest_office_return: ts(office_return),
        })
    }

    #[test]
    fn test_boundary_without_allowance() {
        let shift = test_utils::create_shift(0, 0, 1000);
        let constraint = OvertimeConstraint::new([&shift]);

        assert!(is_feasible(&constraint, &shift, 1000));
        assert!(!is_feasible(&constraint, &shift, 1001));
    }

    #[test]
    fn test_boundary_with_allowance() {
        let shift = test_utils::create_shift_with_overtime(3, 0, 1000, 300);
        let constraint = OvertimeConstraint::new([&shift]);

        assert_eq!(constraint.latest_allowed_end(&shift), ts(1300));
        assert!(is_feasible(&constraint, &shift, 1300));
        assert!(!is_feasible(&constraint, &shift, 1301));
    }

    #[test]
    fn test_unknown_shift_uses_its_own_allowance() {
        let known = test_utils::create_shift(0, 0, 1000);
        let unknown = test_utils::create_shift_with_overtime(1, 0, 500, 60);
        let constraint = OvertimeConstraint::new([&known]);

        assert_eq!(constraint.latest_allowed_end(&unknown), ts(560));
        assert_eq!(constraint.constraint_name(), "OvertimeConstraint");
    }
}
