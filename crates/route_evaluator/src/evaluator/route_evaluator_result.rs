use fxhash::FxHashMap;
use jiff::Timestamp;
use schemars::JsonSchema;
use serde::Serialize;

use crate::problem::visit::VisitIdx;

#[derive(Debug, Clone, PartialEq, Serialize, JsonSchema)]
pub struct ScheduledVisit {
    pub visit_id: VisitIdx,
    pub arrival_time: Timestamp,
    pub start_time: Timestamp,
    pub end_time: Timestamp,
    /// The visit was placed by an insertion search.
    pub is_inserted: bool,
}

/// Outcome of evaluating one route for one shift.
#[derive(Debug, Clone, PartialEq, Serialize, JsonSchema)]
pub struct RouteEvaluatorResult {
    pub is_feasible: bool,
    pub objective_value: Option<f64>,
    pub visits: Vec<ScheduledVisit>,
    pub office_return: Option<Timestamp>,
    /// Unweighted total of each objective term, keyed by objective id.
    pub objective_values: Option<FxHashMap<String, f64>>,
}

impl RouteEvaluatorResult {
    pub fn infeasible() -> Self {
        RouteEvaluatorResult {
            is_feasible: false,
            objective_value: None,
            visits: Vec::new(),
            office_return: None,
            objective_values: None,
        }
    }

    pub fn visit_ids(&self) -> impl Iterator<Item = VisitIdx> {
        self.visits.iter().map(|visit| visit.visit_id)
    }

    pub fn inserted_positions(&self) -> impl Iterator<Item = usize> {
        self.visits
            .iter()
            .enumerate()
            .filter(|(_, visit)| visit.is_inserted)
            .map(|(position, _)| position)
    }
}

#[cfg(test)]
mod tests {
    use crate::test_utils::ts;

    use super::*;

    fn create_result() -> RouteEvaluatorResult {
        let visit = |id: usize, time: i64, is_inserted: bool| ScheduledVisit {
            visit_id: VisitIdx::new(id),
            arrival_time: ts(time),
            start_time: ts(time),
            end_time: ts(time + 10),
            is_inserted,
        };

        RouteEvaluatorResult {
            is_feasible: true,
            objective_value: Some(42.0),
            visits: vec![visit(3, 10, false), visit(1, 30, true), visit(2, 50, true)],
            office_return: Some(ts(80)),
            objective_values: None,
        }
    }

    #[test]
    fn test_visit_order() {
        let result = create_result();

        assert_eq!(
            result.visit_ids().collect::<Vec<_>>(),
            vec![VisitIdx::new(3), VisitIdx::new(1), VisitIdx::new(2)]
        );
        assert_eq!(result.inserted_positions().collect::<Vec<_>>(), vec![1, 2]);
    }

    #[test]
    fn test_serialize() {
        let json = serde_json::to_value(create_result()).unwrap();

        assert_eq!(json["is_feasible"], true);
        assert_eq!(json["objective_value"], 42.0);
        assert_eq!(json["visits"][1]["visit_id"], 1);
        assert_eq!(json["office_return"], "1970-01-01T00:01:20Z");
        assert!(json["objective_values"].is_null());

        let infeasible = serde_json::to_value(RouteEvaluatorResult::infeasible()).unwrap();
        assert_eq!(infeasible["is_feasible"], false);
        assert!(infeasible["objective_value"].is_null());
    }

    #[test]
    fn test_json_schema() {
        let schema = schemars::schema_for!(RouteEvaluatorResult);
        let json = serde_json::to_value(&schema).unwrap();

        assert!(json["properties"]["visits"].is_object());
        assert!(json["properties"]["office_return"].is_object());
    }
}
