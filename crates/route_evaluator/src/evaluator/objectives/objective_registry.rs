use std::sync::Arc;

use crate::{error::RouteEvaluatorError, utils::type_name::short_type_name};

use super::objective::IntraRouteObjective;

#[derive(Clone)]
pub struct WeightedObjectiveTerm {
    id: String,
    weight: f64,
    objective: Arc<dyn IntraRouteObjective>,
}

impl WeightedObjectiveTerm {
    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn weight(&self) -> f64 {
        self.weight
    }

    pub fn objective(&self) -> &dyn IntraRouteObjective {
        self.objective.as_ref()
    }
}

/// Weighted objective terms in insertion order.
#[derive(Clone, Default)]
pub struct ObjectiveRegistry {
    objectives: Vec<WeightedObjectiveTerm>,
}

impl ObjectiveRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_objective<O>(
        &mut self,
        id: impl Into<String>,
        weight: f64,
        objective: O,
    ) -> Result<(), RouteEvaluatorError>
    where
        O: IntraRouteObjective + 'static,
    {
        let id = id.into();
        if self.has_objective(&id) {
            return Err(RouteEvaluatorError::DuplicateObjective(id));
        }

        self.objectives.push(WeightedObjectiveTerm {
            id,
            weight,
            objective: Arc::new(objective),
        });

        Ok(())
    }

    /// Registers the objective with weight one under its type name.
    pub fn add_default_objective<O>(&mut self, objective: O) -> Result<(), RouteEvaluatorError>
    where
        O: IntraRouteObjective + 'static,
    {
        self.add_objective(short_type_name::<O>(), 1.0, objective)
    }

    pub fn remove_objective(&mut self, id: &str) -> bool {
        let len = self.objectives.len();
        self.objectives.retain(|objective| objective.id != id);
        self.objectives.len() != len
    }

    pub fn has_objective(&self, id: &str) -> bool {
        self.objectives.iter().any(|objective| objective.id == id)
    }

    pub fn weight(&self, id: &str) -> Option<f64> {
        self.objectives
            .iter()
            .find(|objective| objective.id == id)
            .map(|objective| objective.weight)
    }

    pub fn iter(&self) -> impl Iterator<Item = &WeightedObjectiveTerm> {
        self.objectives.iter()
    }

    pub fn len(&self) -> usize {
        self.objectives.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objectives.is_empty()
    }

    /// Replaces the registered objectives with the ones of `other`.
    pub fn update(&mut self, other: &ObjectiveRegistry) {
        self.objectives.clone_from(&other.objectives);
    }
}
