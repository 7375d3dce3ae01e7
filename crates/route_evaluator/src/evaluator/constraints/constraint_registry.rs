use std::{ops::Deref, sync::Arc};

use tracing::warn;

use crate::error::RouteEvaluatorError;

use super::constraint::{ConstraintInfo, IntraRouteConstraint};

#[derive(Clone)]
struct RegisteredConstraint {
    name: String,
    is_active: bool,
    constraint: Arc<dyn IntraRouteConstraint>,
}

/// Named constraints, each either active or inactive. Registration order is
/// the evaluation order.
///
/// Cloning a registry shares the (immutable) constraints but not the
/// activation state.
#[derive(Clone, Default)]
pub struct ConstraintRegistry {
    constraints: Vec<RegisteredConstraint>,
    check_all: bool,
}

impl ConstraintRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers an active constraint under its default name.
    pub fn add_constraint<C>(&mut self, constraint: C) -> Result<(), RouteEvaluatorError>
    where
        C: IntraRouteConstraint + 'static,
    {
        let name = constraint.constraint_name().to_owned();
        self.add_named_constraint(name, constraint)
    }

    pub fn add_named_constraint<C>(
        &mut self,
        name: impl Into<String>,
        constraint: C,
    ) -> Result<(), RouteEvaluatorError>
    where
        C: IntraRouteConstraint + 'static,
    {
        let name = name.into();
        if self.has_constraint(&name) {
            return Err(RouteEvaluatorError::DuplicateConstraint(name));
        }

        self.constraints.push(RegisteredConstraint {
            name,
            is_active: true,
            constraint: Arc::new(constraint),
        });

        Ok(())
    }

    pub fn remove_constraint(&mut self, name: &str) -> bool {
        let len = self.constraints.len();
        self.constraints.retain(|constraint| constraint.name != name);
        self.constraints.len() != len
    }

    pub fn has_constraint(&self, name: &str) -> bool {
        self.constraints
            .iter()
            .any(|constraint| constraint.name == name)
    }

    pub fn is_active(&self, name: &str) -> Option<bool> {
        self.constraints
            .iter()
            .find(|constraint| constraint.name == name)
            .map(|constraint| constraint.is_active)
    }

    /// Moves an inactive constraint to the active set. Returns whether a
    /// constraint with this name exists.
    pub fn activate_constraint(&mut self, name: &str) -> bool {
        self.set_active(name, true)
    }

    pub fn deactivate_constraint(&mut self, name: &str) -> bool {
        self.set_active(name, false)
    }

    fn set_active(&mut self, name: &str, is_active: bool) -> bool {
        match self
            .constraints
            .iter_mut()
            .find(|constraint| constraint.name == name)
        {
            Some(constraint) => {
                constraint.is_active = is_active;
                true
            }
            None => {
                warn!(name, "Unknown constraint");
                false
            }
        }
    }

    pub fn active_constraint_names(&self) -> impl Iterator<Item = &str> {
        self.constraints
            .iter()
            .filter(|constraint| constraint.is_active)
            .map(|constraint| constraint.name.as_str())
    }

    pub fn inactive_constraint_names(&self) -> impl Iterator<Item = &str> {
        self.constraints
            .iter()
            .filter(|constraint| !constraint.is_active)
            .map(|constraint| constraint.name.as_str())
    }

    pub fn len(&self) -> usize {
        self.constraints.len()
    }

    pub fn is_empty(&self) -> bool {
        self.constraints.is_empty()
    }

    /// Copies the activation state of the constraints both registries know.
    pub fn update(&mut self, other: &ConstraintRegistry) {
        for constraint in &mut self.constraints {
            if let Some(is_active) = other.is_active(&constraint.name) {
                constraint.is_active = is_active;
            }
        }
    }

    /// Treats every constraint as active until the returned guard is dropped.
    /// The activation state itself is left untouched.
    pub fn check_all(&mut self) -> CheckAllConstraintsGuard<'_> {
        self.check_all = true;
        CheckAllConstraintsGuard { registry: self }
    }

    pub fn is_checking_all(&self) -> bool {
        self.check_all
    }

    /// Stops at the first constraint that rejects the extension.
    pub fn is_feasible(&self, info: &ConstraintInfo) -> bool {
        self.constraints
            .iter()
            .filter(|constraint| self.check_all || constraint.is_active)
            .all(|constraint| constraint.constraint.is_feasible(info))
    }
}

pub struct CheckAllConstraintsGuard<'a> {
    registry: &'a mut ConstraintRegistry,
}

impl Deref for CheckAllConstraintsGuard<'_> {
    type Target = ConstraintRegistry;

    fn deref(&self) -> &Self::Target {
        self.registry
    }
}

impl Drop for CheckAllConstraintsGuard<'_> {
    fn drop(&mut self) {
        self.registry.check_all = false;
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use crate::{evaluator::search_graph::NodeIdx, test_utils};

    use super::*;

    struct Reject;

    impl IntraRouteConstraint for Reject {
        fn is_feasible(&self, _info: &ConstraintInfo) -> bool {
            false
        }
    }

    struct Counting(Arc<AtomicUsize>);

    impl IntraRouteConstraint for Counting {
        fn is_feasible(&self, _info: &ConstraintInfo) -> bool {
            self.0.fetch_add(1, Ordering::Relaxed);
            true
        }
    }

    fn check(registry: &ConstraintRegistry) -> bool {
        let visits = test_utils::create_basic_visits(vec![1]);
        let graph = test_utils::create_test_graph(2, &visits);
        let shift = test_utils::create_shift(0, 0, 100);
        let info = ConstraintInfo {
            shift: &shift,
            node: graph.node(NodeIdx::new(2)),
            arrival_time: test_utils::ts(0),
            start_time: test_utils::ts(0),
            end_time: test_utils::ts(0),
            earliest_office_return: test_utils::ts(0),
        };
        registry.is_feasible(&info)
    }

    #[test]
    fn test_default_name_is_type_name() {
        let mut registry = ConstraintRegistry::new();
        registry.add_constraint(Reject).unwrap();

        assert!(registry.has_constraint("Reject"));
        assert_eq!(
            registry.add_constraint(Reject),
            Err(RouteEvaluatorError::DuplicateConstraint("Reject".to_owned()))
        );
        registry.add_named_constraint("reject_again", Reject).unwrap();
        assert_eq!(registry.len(), 2);
    }

    #[test]
    fn test_activate_and_deactivate() {
        let mut registry = ConstraintRegistry::new();
        registry.add_constraint(Reject).unwrap();

        assert!(!check(&registry));
        assert!(registry.deactivate_constraint("Reject"));
        assert_eq!(registry.is_active("Reject"), Some(false));
        assert!(check(&registry));
        assert!(registry.activate_constraint("Reject"));
        assert!(!check(&registry));

        assert!(!registry.activate_constraint("Missing"));
        assert!(!registry.deactivate_constraint("Missing"));
        assert_eq!(registry.is_active("Missing"), None);
    }

    #[test]
    fn test_check_all_restores_partition() {
        let mut registry = ConstraintRegistry::new();
        registry.add_constraint(Reject).unwrap();
        registry.deactivate_constraint("Reject");

        {
            let guard = registry.check_all();
            assert!(guard.is_checking_all());
            assert!(!check(&guard));
        }

        assert!(!registry.is_checking_all());
        assert_eq!(registry.inactive_constraint_names().collect::<Vec<_>>(), vec!["Reject"]);
        assert!(check(&registry));
    }

    #[test]
    fn test_short_circuits_on_first_failure() {
        let calls = Arc::new(AtomicUsize::new(0));
        let mut registry = ConstraintRegistry::new();
        registry.add_constraint(Reject).unwrap();
        registry
            .add_constraint(Counting(Arc::clone(&calls)))
            .unwrap();

        assert!(!check(&registry));
        assert_eq!(calls.load(Ordering::Relaxed), 0);

        registry.deactivate_constraint("Reject");
        assert!(check(&registry));
        assert_eq!(calls.load(Ordering::Relaxed), 1);
    }

    #[test]
    fn test_update_copies_activation_by_name() {
        let mut registry = ConstraintRegistry::new();
        registry.add_constraint(Reject).unwrap();
        let mut other = registry.clone();

        other.deactivate_constraint("Reject");
        assert_eq!(registry.is_active("Reject"), Some(true));

        registry.update(&other);
        assert_eq!(registry.is_active("Reject"), Some(false));
    }

    #[test]
    fn test_remove_constraint() {
        let mut registry = ConstraintRegistry::new();
        registry.add_constraint(Reject).unwrap();

        assert!(registry.remove_constraint("Reject"));
        assert!(!registry.remove_constraint("Reject"));
        assert!(registry.is_empty());
    }
}
