use fxhash::FxHashMap;
use tracing::{debug, trace};

use crate::{
    error::RouteEvaluatorError,
    problem::{shift::Shift, vehicle_profile::VehicleProfile},
};

use super::{
    constraints::{constraint::ConstraintInfo, constraint_registry::ConstraintRegistry},
    extend_info::{ExtendInfo, ExtendPosition, Extension, Extensions},
    label::{Label, LabelIdx},
    objectives::{
        objective::ObjectiveInfo, objective_registry::ObjectiveRegistry,
        weighted_objective::WeightedObjective,
    },
    route_evaluator_result::{RouteEvaluatorResult, ScheduledVisit},
    search_graph::SearchGraph,
};

#[derive(Clone, Debug)]
pub struct LabellingParams {
    /// Discard labels that are both later and more expensive than another
    /// label at the same node and position.
    pub enable_dominance: bool,
    /// Keep only the cheapest labels of a position before extending them.
    /// Turns the search into a beam search, so optimality is lost.
    pub max_labels_per_position: Option<usize>,
}

impl Default for LabellingParams {
    fn default() -> Self {
        LabellingParams {
            enable_dominance: true,
            max_labels_per_position: None,
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LabellingStatistics {
    pub labels_created: usize,
    pub labels_dominated: usize,
    pub infeasible_extensions: usize,
}

/// Everything a run needs besides the algorithm's own scratch space.
pub struct LabellingContext<'a, E: ExtendInfo> {
    pub graph: &'a SearchGraph,
    pub objectives: &'a ObjectiveRegistry,
    pub constraints: &'a ConstraintRegistry,
    pub extend_info: &'a E,
    pub shift: &'a Shift,
}

/// Dynamic programming over partial routes.
///
/// Labels live in an arena that is reused between runs. Positions of the
/// node sequencing are processed in increasing index order, which is a
/// topological order of the search graph, so every label is final before it
/// is extended.
#[derive(Debug)]
pub struct LabellingAlgorithm {
    params: LabellingParams,
    labels: Vec<Label>,
    buckets: Vec<Vec<LabelIdx>>,
    extensions: Extensions,
    statistics: LabellingStatistics,
}

impl LabellingAlgorithm {
    pub fn new(params: LabellingParams) -> Self {
        LabellingAlgorithm {
            params,
            labels: Vec::new(),
            buckets: Vec::new(),
            extensions: Extensions::new(),
            statistics: LabellingStatistics::default(),
        }
    }

    pub fn params(&self) -> &LabellingParams {
        &self.params
    }

    /// Statistics of the last run.
    pub fn statistics(&self) -> &LabellingStatistics {
        &self.statistics
    }

    pub fn label(&self, label_id: LabelIdx) -> &Label {
        &self.labels[label_id]
    }

    /// Returns the cheapest label that reached the destination, `None` when
    /// no route satisfies the constraints.
    pub fn run<E: ExtendInfo>(
        &mut self,
        context: &LabellingContext<E>,
        objective: WeightedObjective,
    ) -> Result<Option<LabelIdx>, RouteEvaluatorError> {
        let LabellingContext {
            graph,
            extend_info,
            shift,
            ..
        } = *context;
        let profile = graph.vehicle_profile(shift.vehicle_profile_id())?;

        self.reset(extend_info.num_positions());

        let origin = self.push_label(Label {
            node: graph.origin(),
            position: ExtendPosition::START,
            parent: None,
            is_inserted: false,
            arrival_time: shift.start(),
            start_time: shift.start(),
            end_time: shift.start(),
            objective,
        });
        self.buckets[extend_info.position_index(ExtendPosition::START)].push(origin);

        let mut best: Option<LabelIdx> = None;

        for bucket_index in 0..self.buckets.len() {
            let mut bucket = std::mem::take(&mut self.buckets[bucket_index]);

            if let Some(max_labels) = self.params.max_labels_per_position
                && bucket.len() > max_labels
            {
                let labels = &self.labels;
                bucket.sort_by(|&a, &b| {
                    labels[a]
                        .objective_value()
                        .total_cmp(&labels[b].objective_value())
                });
                bucket.truncate(max_labels);
            }

            for &label_id in &bucket {
                let position = self.labels[label_id].position;

                if extend_info.is_complete(position) {
                    let destination = Extension {
                        node: graph.destination(),
                        position,
                        is_inserted: false,
                        completes: true,
                    };

                    if let Some(candidate) =
                        self.extend(context, profile, label_id, &destination)
                    {
                        let is_better = best.is_none_or(|best| {
                            candidate.objective_value() < self.labels[best].objective_value()
                        });
                        if is_better {
                            best = Some(self.push_label(candidate));
                        }
                    }
                    continue;
                }

                extend_info.extensions(position, &mut self.extensions);

                for index in 0..self.extensions.len() {
                    let extension = self.extensions[index];
                    if let Some(label) = self.extend(context, profile, label_id, &extension) {
                        self.insert_label(extend_info.position_index(extension.position), label);
                    }
                }
            }

            bucket.clear();
            self.buckets[bucket_index] = bucket;
        }

        debug!(
            labels_created = self.statistics.labels_created,
            labels_dominated = self.statistics.labels_dominated,
            infeasible_extensions = self.statistics.infeasible_extensions,
            feasible = best.is_some(),
            "Labelling finished"
        );

        Ok(best)
    }

    pub fn solve_route_evaluator_objective<E: ExtendInfo>(
        &mut self,
        context: &LabellingContext<E>,
        objective: WeightedObjective,
    ) -> Result<Option<f64>, RouteEvaluatorError> {
        Ok(self
            .run(context, objective)?
            .map(|best| self.labels[best].objective_value()))
    }

    pub fn solve_route_evaluator_result<E: ExtendInfo>(
        &mut self,
        context: &LabellingContext<E>,
        objective: WeightedObjective,
    ) -> Result<RouteEvaluatorResult, RouteEvaluatorError> {
        Ok(match self.run(context, objective)? {
            Some(best) => self.build_result(context, best),
            None => RouteEvaluatorResult::infeasible(),
        })
    }

    fn build_result<E: ExtendInfo>(
        &self,
        context: &LabellingContext<E>,
        best: LabelIdx,
    ) -> RouteEvaluatorResult {
        let destination = &self.labels[best];

        let mut visits = self
            .path(best)
            .filter_map(|label| {
                context
                    .graph
                    .node(label.node)
                    .visit()
                    .map(|visit| ScheduledVisit {
                        visit_id: visit.id(),
                        arrival_time: label.arrival_time,
                        start_time: label.start_time,
                        end_time: label.end_time,
                        is_inserted: label.is_inserted,
                    })
            })
            .collect::<Vec<_>>();
        visits.reverse();

        let objective_values = destination.objective.objective_values().map(|values| {
            context
                .objectives
                .iter()
                .zip(values)
                .map(|(term, &value)| (term.id().to_owned(), value))
                .collect::<FxHashMap<_, _>>()
        });

        RouteEvaluatorResult {
            is_feasible: true,
            objective_value: Some(destination.objective_value()),
            visits,
            office_return: Some(destination.arrival_time),
            objective_values,
        }
    }

    /// Labels from `label_id` back to the origin.
    pub fn path(&self, label_id: LabelIdx) -> impl Iterator<Item = &Label> {
        std::iter::successors(Some(&self.labels[label_id]), |label| {
            label.parent.map(|parent| &self.labels[parent])
        })
    }

    fn reset(&mut self, num_positions: usize) {
        self.labels.clear();
        self.statistics = LabellingStatistics::default();

        for bucket in &mut self.buckets {
            bucket.clear();
        }
        self.buckets.resize_with(num_positions, Vec::new);
    }

    fn push_label(&mut self, label: Label) -> LabelIdx {
        let id = LabelIdx::new(self.labels.len());
        self.labels.push(label);
        self.statistics.labels_created += 1;
        id
    }

    fn insert_label(&mut self, bucket_index: usize, label: Label) {
        if self.params.enable_dominance {
            let labels = &self.labels;
            let bucket = &mut self.buckets[bucket_index];

            if bucket
                .iter()
                .any(|&other| labels[other].node == label.node && labels[other].covers(&label))
            {
                self.statistics.labels_dominated += 1;
                return;
            }

            let len = bucket.len();
            bucket.retain(|&other| {
                !(labels[other].node == label.node && label.covers(&labels[other]))
            });
            self.statistics.labels_dominated += len - bucket.len();
        }

        let id = self.push_label(label);
        self.buckets[bucket_index].push(id);
    }

    /// Resource extension of `parent` along `extension`, `None` when a
    /// constraint rejects it.
    fn extend<E: ExtendInfo>(
        &mut self,
        context: &LabellingContext<E>,
        profile: &VehicleProfile,
        parent: LabelIdx,
        extension: &Extension,
    ) -> Option<Label> {
        let graph = context.graph;
        let label = &self.labels[parent];
        let from = graph.node(label.node);
        let to = graph.node(extension.node);

        let travel_time = graph.travel_time(profile, label.node, extension.node);
        let arrival_time = label.end_time + travel_time;

        let (start_time, end_time, earliest_office_return) = match to.visit() {
            Some(visit) => {
                let start_time = visit.time_window().service_start(arrival_time);
                let end_time = start_time + visit.duration();
                let return_travel_time =
                    graph.travel_time(profile, extension.node, graph.destination());
                (start_time, end_time, end_time + return_travel_time)
            }
            None => (arrival_time, arrival_time, arrival_time),
        };

        let constraint_info = ConstraintInfo {
            shift: context.shift,
            node: to,
            arrival_time,
            start_time,
            end_time,
            earliest_office_return,
        };

        if !context.constraints.is_feasible(&constraint_info) {
            trace!(from = %from.id(), to = %to.id(), "Infeasible extension");
            self.statistics.infeasible_extensions += 1;
            return None;
        }

        let objective = label.objective.extend(
            context.objectives,
            &ObjectiveInfo {
                shift: context.shift,
                from,
                to,
                departure_time: label.end_time,
                travel_time,
                arrival_time,
                start_time,
                end_time,
                earliest_office_return,
            },
        );

        Some(Label {
            node: extension.node,
            position: extension.position,
            parent: Some(parent),
            is_inserted: extension.is_inserted,
            arrival_time,
            start_time,
            end_time,
            objective,
        })
    }
}

impl Clone for LabellingAlgorithm {
    /// Copies the parameters only, the scratch space starts empty.
    fn clone(&self) -> Self {
        LabellingAlgorithm::new(self.params.clone())
    }
}
