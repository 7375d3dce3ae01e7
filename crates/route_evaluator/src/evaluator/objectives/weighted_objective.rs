use smallvec::SmallVec;

use super::{objective::ObjectiveInfo, objective_registry::ObjectiveRegistry};

/// Accumulated cost of a partial route: the linear sum of
/// `weight * value` over every registered term, and optionally each term's
/// unweighted total.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct WeightedObjective {
    objective_value: f64,
    objective_values: Option<SmallVec<[f64; 4]>>,
}

impl WeightedObjective {
    pub fn new() -> Self {
        Self::default()
    }

    /// Also keeps the unweighted total of every term, in registry order.
    pub fn with_objective_values(objectives: &ObjectiveRegistry) -> Self {
        WeightedObjective {
            objective_value: 0.0,
            objective_values: Some(SmallVec::from_elem(0.0, objectives.len())),
        }
    }

    #[cfg(test)]
    pub(crate) fn from_value(objective_value: f64) -> Self {
        WeightedObjective {
            objective_value,
            objective_values: None,
        }
    }

    pub fn objective_value(&self) -> f64 {
        self.objective_value
    }

    pub fn objective_values(&self) -> Option<&[f64]> {
        self.objective_values.as_deref()
    }

    pub(crate) fn extend(&self, objectives: &ObjectiveRegistry, info: &ObjectiveInfo) -> Self {
        let mut extended = self.clone();

        for (index, term) in objectives.iter().enumerate() {
            let value = term.objective().objective_value(info);
            extended.objective_value += term.weight() * value;

            if let Some(total) = extended
                .objective_values
                .as_mut()
                .and_then(|values| values.get_mut(index))
            {
                *total += value;
            }
        }

        extended
    }
}
