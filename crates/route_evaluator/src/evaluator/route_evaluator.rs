use fxhash::FxHashMap;
use tracing::instrument;

use crate::{
    error::RouteEvaluatorError,
    problem::{
        location::LocationIdx,
        shift::Shift,
        vehicle_profile::{VehicleProfile, VehicleProfileIdx},
        visit::Visit,
    },
};

use super::{
    constraints::{constraint::IntraRouteConstraint, constraint_registry::ConstraintRegistry},
    extend_info::{ExtendInfoOneElement, ExtendInfoTwoElements},
    labelling_algorithm::{
        LabellingAlgorithm, LabellingContext, LabellingParams, LabellingStatistics,
    },
    node_list::NodeList,
    objectives::{
        objective::IntraRouteObjective, objective_registry::ObjectiveRegistry,
        weighted_objective::WeightedObjective,
    },
    route_evaluator_result::RouteEvaluatorResult,
    search_graph::SearchGraph,
};

/// Computes the cost and feasibility of a single route, and finds the best
/// positions to insert new visits into it.
///
/// Only intra-route concerns are evaluated: travel, time windows, overtime
/// and whatever constraints and objectives are registered. Rules spanning
/// several routes are the caller's responsibility.
///
/// An evaluator reuses internal buffers on every call and is therefore not
/// meant to be shared between threads. Give every worker its own clone.
pub struct RouteEvaluator {
    graph: SearchGraph,
    objectives: ObjectiveRegistry,
    constraints: ConstraintRegistry,
    algorithm: LabellingAlgorithm,
    first_node_list: NodeList,
    second_node_list: NodeList,
}

impl RouteEvaluator {
    /// Origin and destination are both the depot.
    pub fn new(
        vehicle_profiles: FxHashMap<VehicleProfileIdx, VehicleProfile>,
        visits: &[Visit],
        depot_location_id: LocationIdx,
    ) -> Result<Self, RouteEvaluatorError> {
        let graph = SearchGraph::new(vehicle_profiles, visits, depot_location_id, depot_location_id)?;
        Ok(Self::from_graph(graph, LabellingParams::default()))
    }

    fn from_graph(graph: SearchGraph, params: LabellingParams) -> Self {
        let num_nodes = graph.num_nodes();
        RouteEvaluator {
            graph,
            objectives: ObjectiveRegistry::new(),
            constraints: ConstraintRegistry::new(),
            algorithm: LabellingAlgorithm::new(params),
            first_node_list: NodeList::new(num_nodes),
            second_node_list: NodeList::new(num_nodes),
        }
    }

    /// Copies the constraint activation state and the objectives of `other`.
    pub fn update(&mut self, other: &RouteEvaluator) {
        self.objectives.update(&other.objectives);
        self.constraints.update(&other.constraints);
    }

    /// Objective value of the route in the given order, `None` if infeasible.
    #[instrument(skip_all, level = "trace", fields(shift = %shift.id(), visits = visits.len()))]
    pub fn evaluate_route_objective(
        &mut self,
        visits: &[Visit],
        shift: &Shift,
    ) -> Result<Option<f64>, RouteEvaluatorError> {
        self.first_node_list
            .initialize_with_nodes(&self.graph, visits)?;
        self.solve_one_element_objective(shift)
    }

    /// Whether the route is feasible when every constraint, active or not,
    /// is enforced. The activation state is the same afterwards.
    #[instrument(skip_all, level = "trace", fields(shift = %shift.id(), visits = visits.len()))]
    pub fn evaluate_route_feasibility_for_all_constraints(
        &mut self,
        visits: &[Visit],
        shift: &Shift,
    ) -> Result<bool, RouteEvaluatorError> {
        self.first_node_list
            .initialize_with_nodes(&self.graph, visits)?;

        let constraints = self.constraints.check_all();
        let extend_info = ExtendInfoOneElement::new(&self.first_node_list);
        let context = LabellingContext {
            graph: &self.graph,
            objectives: &self.objectives,
            constraints: &*constraints,
            extend_info: &extend_info,
            shift,
        };

        let objective = self
            .algorithm
            .solve_route_evaluator_objective(&context, WeightedObjective::new())?;

        Ok(objective.is_some())
    }

    /// Objective value of the route without the visit at `skip_visit_at_index`.
    #[instrument(skip_all, level = "trace", fields(shift = %shift.id(), visits = visits.len()))]
    pub fn evaluate_route_remove_visit_objective(
        &mut self,
        visits: &[Visit],
        skip_visit_at_index: usize,
        shift: &Shift,
    ) -> Result<Option<f64>, RouteEvaluatorError> {
        self.first_node_list
            .initialize_with_nodes_skipping(&self.graph, visits, skip_visit_at_index)?;
        self.solve_one_element_objective(shift)
    }

    /// Objective value of the route without the visits at the given indices.
    #[instrument(skip_all, level = "trace", fields(shift = %shift.id(), visits = visits.len()))]
    pub fn evaluate_route_remove_visits_objective(
        &mut self,
        visits: &[Visit],
        skip_visits_at_indices: &[usize],
        shift: &Shift,
    ) -> Result<Option<f64>, RouteEvaluatorError> {
        self.first_node_list.initialize_with_nodes_skipping_indices(
            &self.graph,
            visits,
            skip_visits_at_indices,
        )?;
        self.solve_one_element_objective(shift)
    }

    /// Schedule and objective value of the route in the given order.
    #[instrument(skip_all, level = "trace", fields(shift = %shift.id(), visits = visits.len()))]
    pub fn evaluate_route_by_the_order_of_visits(
        &mut self,
        visits: &[Visit],
        shift: &Shift,
    ) -> Result<RouteEvaluatorResult, RouteEvaluatorError> {
        self.first_node_list
            .initialize_with_nodes(&self.graph, visits)?;
        self.solve_one_element_result(shift, WeightedObjective::new())
    }

    /// Like [`RouteEvaluator::evaluate_route_by_the_order_of_visits`], with the
    /// unweighted value of every objective term in the result.
    #[instrument(skip_all, level = "trace", fields(shift = %shift.id(), visits = visits.len()))]
    pub fn evaluate_route_with_objective_values(
        &mut self,
        visits: &[Visit],
        shift: &Shift,
    ) -> Result<RouteEvaluatorResult, RouteEvaluatorError> {
        self.first_node_list
            .initialize_with_nodes(&self.graph, visits)?;
        let objective = WeightedObjective::with_objective_values(&self.objectives);
        self.solve_one_element_result(shift, objective)
    }

    /// Evaluates the route with `insert_visit` placed at its best position.
    /// The order of the route's visits is kept.
    #[instrument(skip_all, level = "trace", fields(shift = %shift.id(), visits = visits.len()))]
    pub fn evaluate_route_insert_visit(
        &mut self,
        visits: &[Visit],
        insert_visit: &Visit,
        shift: &Shift,
    ) -> Result<RouteEvaluatorResult, RouteEvaluatorError> {
        self.first_node_list
            .initialize_with_nodes(&self.graph, visits)?;
        self.second_node_list
            .initialize_with_node(&self.graph, insert_visit)?;
        self.solve_two_elements_result(shift)
    }

    /// Evaluates the best merge of the route and `insert_visits`. Both lists
    /// keep their own order, but may be interleaved in any way.
    #[instrument(skip_all, level = "trace", fields(shift = %shift.id(), visits = visits.len(), insert = insert_visits.len()))]
    pub fn evaluate_route_insert_visits(
        &mut self,
        visits: &[Visit],
        insert_visits: &[Visit],
        shift: &Shift,
    ) -> Result<RouteEvaluatorResult, RouteEvaluatorError> {
        self.first_node_list
            .initialize_with_nodes(&self.graph, visits)?;
        self.second_node_list
            .initialize_with_nodes(&self.graph, insert_visits)?;
        self.solve_two_elements_result(shift)
    }

    /// Objective value of the best merge of the route and `insert_visits`.
    #[instrument(skip_all, level = "trace", fields(shift = %shift.id(), visits = visits.len(), insert = insert_visits.len()))]
    pub fn evaluate_route_insert_visits_objective(
        &mut self,
        visits: &[Visit],
        insert_visits: &[Visit],
        shift: &Shift,
    ) -> Result<Option<f64>, RouteEvaluatorError> {
        self.first_node_list
            .initialize_with_nodes(&self.graph, visits)?;
        self.second_node_list
            .initialize_with_nodes(&self.graph, insert_visits)?;

        let extend_info = ExtendInfoTwoElements::new(&self.first_node_list, &self.second_node_list);
        let context = LabellingContext {
            graph: &self.graph,
            objectives: &self.objectives,
            constraints: &self.constraints,
            extend_info: &extend_info,
            shift,
        };

        self.algorithm
            .solve_route_evaluator_objective(&context, WeightedObjective::new())
    }

    fn solve_one_element_objective(
        &mut self,
        shift: &Shift,
    ) -> Result<Option<f64>, RouteEvaluatorError> {
        let extend_info = ExtendInfoOneElement::new(&self.first_node_list);
        let context = LabellingContext {
            graph: &self.graph,
            objectives: &self.objectives,
            constraints: &self.constraints,
            extend_info: &extend_info,
            shift,
        };

        self.algorithm
            .solve_route_evaluator_objective(&context, WeightedObjective::new())
    }

    fn solve_one_element_result(
        &mut self,
        shift: &Shift,
        objective: WeightedObjective,
    ) -> Result<RouteEvaluatorResult, RouteEvaluatorError> {
        let extend_info = ExtendInfoOneElement::new(&self.first_node_list);
        let context = LabellingContext {
            graph: &self.graph,
            objectives: &self.objectives,
            constraints: &self.constraints,
            extend_info: &extend_info,
            shift,
        };

        self.algorithm
            .solve_route_evaluator_result(&context, objective)
    }

    fn solve_two_elements_result(
        &mut self,
        shift: &Shift,
    ) -> Result<RouteEvaluatorResult, RouteEvaluatorError> {
        let extend_info = ExtendInfoTwoElements::new(&self.first_node_list, &self.second_node_list);
        let context = LabellingContext {
            graph: &self.graph,
            objectives: &self.objectives,
            constraints: &self.constraints,
            extend_info: &extend_info,
            shift,
        };

        self.algorithm
            .solve_route_evaluator_result(&context, WeightedObjective::new())
    }

    pub fn add_objective<O>(
        &mut self,
        objective_id: impl Into<String>,
        weight: f64,
        objective: O,
    ) -> Result<(), RouteEvaluatorError>
    where
        O: IntraRouteObjective + 'static,
    {
        self.objectives.add_objective(objective_id, weight, objective)
    }

    /// Adds the objective with weight one, named after its type.
    pub fn add_default_objective<O>(&mut self, objective: O) -> Result<(), RouteEvaluatorError>
    where
        O: IntraRouteObjective + 'static,
    {
        self.objectives.add_default_objective(objective)
    }

    pub fn remove_objective(&mut self, objective_id: &str) -> bool {
        self.objectives.remove_objective(objective_id)
    }

    pub fn has_objective(&self, objective_id: &str) -> bool {
        self.objectives.has_objective(objective_id)
    }

    /// Adds an active constraint, named after its type.
    pub fn add_constraint<C>(&mut self, constraint: C) -> Result<(), RouteEvaluatorError>
    where
        C: IntraRouteConstraint + 'static,
    {
        self.constraints.add_constraint(constraint)
    }

    pub fn add_named_constraint<C>(
        &mut self,
        name: impl Into<String>,
        constraint: C,
    ) -> Result<(), RouteEvaluatorError>
    where
        C: IntraRouteConstraint + 'static,
    {
        self.constraints.add_named_constraint(name, constraint)
    }

    pub fn remove_constraint(&mut self, name: &str) -> bool {
        self.constraints.remove_constraint(name)
    }

    pub fn has_constraint(&self, name: &str) -> bool {
        self.constraints.has_constraint(name)
    }

    /// Returns whether a constraint with this name exists.
    pub fn activate_constraint(&mut self, name: &str) -> bool {
        self.constraints.activate_constraint(name)
    }

    /// Returns whether a constraint with this name exists.
    pub fn deactivate_constraint(&mut self, name: &str) -> bool {
        self.constraints.deactivate_constraint(name)
    }

    pub fn objectives(&self) -> &ObjectiveRegistry {
        &self.objectives
    }

    pub fn constraints(&self) -> &ConstraintRegistry {
        &self.constraints
    }

    pub fn graph(&self) -> &SearchGraph {
        &self.graph
    }

    /// Statistics of the last evaluation.
    pub fn statistics(&self) -> &LabellingStatistics {
        self.algorithm.statistics()
    }
}

impl Clone for RouteEvaluator {
    /// Same graph, constraints and objectives; fresh evaluation buffers.
    fn clone(&self) -> Self {
        let num_nodes = self.graph.num_nodes();
        RouteEvaluator {
            graph: self.graph.clone(),
            objectives: self.objectives.clone(),
            constraints: self.constraints.clone(),
            algorithm: self.algorithm.clone(),
            first_node_list: NodeList::new(num_nodes),
            second_node_list: NodeList::new(num_nodes),
        }
    }
}

pub struct RouteEvaluatorBuilder {
    depot_location_id: LocationIdx,
    vehicle_profiles: FxHashMap<VehicleProfileIdx, VehicleProfile>,
    visits: Vec<Visit>,
    origin_location_id: Option<LocationIdx>,
    destination_location_id: Option<LocationIdx>,
    labelling_params: Option<LabellingParams>,
}

impl RouteEvaluatorBuilder {
    pub fn new(depot_location_id: usize) -> Self {
        RouteEvaluatorBuilder {
            depot_location_id: depot_location_id.into(),
            vehicle_profiles: FxHashMap::default(),
            visits: Vec::new(),
            origin_location_id: None,
            destination_location_id: None,
            labelling_params: None,
        }
    }

    pub fn add_vehicle_profile(
        &mut self,
        vehicle_profile_id: usize,
        vehicle_profile: VehicleProfile,
    ) -> &mut RouteEvaluatorBuilder {
        self.vehicle_profiles
            .insert(vehicle_profile_id.into(), vehicle_profile);
        self
    }

    pub fn set_visits(&mut self, visits: Vec<Visit>) -> &mut RouteEvaluatorBuilder {
        self.visits = visits;
        self
    }

    pub fn set_origin_location_id(&mut self, location_id: usize) -> &mut RouteEvaluatorBuilder {
        self.origin_location_id = Some(location_id.into());
        self
    }

    pub fn set_destination_location_id(
        &mut self,
        location_id: usize,
    ) -> &mut RouteEvaluatorBuilder {
        self.destination_location_id = Some(location_id.into());
        self
    }

    pub fn set_labelling_params(&mut self, params: LabellingParams) -> &mut RouteEvaluatorBuilder {
        self.labelling_params = Some(params);
        self
    }

    pub fn build(self) -> Result<RouteEvaluator, RouteEvaluatorError> {
        let graph = SearchGraph::new(
            self.vehicle_profiles,
            &self.visits,
            self.origin_location_id.unwrap_or(self.depot_location_id),
            self.destination_location_id
                .unwrap_or(self.depot_location_id),
        )?;

        Ok(RouteEvaluator::from_graph(
            graph,
            self.labelling_params.unwrap_or_default(),
        ))
    }
}
