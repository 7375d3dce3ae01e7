use crate::{error::RouteEvaluatorError, problem::visit::Visit};

use super::search_graph::{NodeIdx, SearchGraph};

/// Reusable buffer of graph nodes in route order.
///
/// A route evaluator keeps two of these and refills them on every call, so
/// an evaluator must not be shared between threads; clone it instead.
#[derive(Debug)]
pub struct NodeList {
    nodes: Vec<NodeIdx>,
}

impl NodeList {
    pub fn new(capacity: usize) -> Self {
        NodeList {
            nodes: Vec::with_capacity(capacity),
        }
    }

    pub fn nodes(&self) -> &[NodeIdx] {
        &self.nodes
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<NodeIdx> {
        self.nodes.get(index).copied()
    }

    pub fn initialize_with_nodes(
        &mut self,
        graph: &SearchGraph,
        visits: &[Visit],
    ) -> Result<(), RouteEvaluatorError> {
        self.fill(graph, visits.iter())
    }

    pub fn initialize_with_node(
        &mut self,
        graph: &SearchGraph,
        visit: &Visit,
    ) -> Result<(), RouteEvaluatorError> {
        self.fill(graph, std::iter::once(visit))
    }

    pub fn initialize_with_nodes_skipping(
        &mut self,
        graph: &SearchGraph,
        visits: &[Visit],
        skip_index: usize,
    ) -> Result<(), RouteEvaluatorError> {
        self.initialize_with_nodes_skipping_indices(graph, visits, &[skip_index])
    }

    /// Fills the list with the route, leaving out the visits at the given
    /// positions. Every index is checked before the list is touched.
    pub fn initialize_with_nodes_skipping_indices(
        &mut self,
        graph: &SearchGraph,
        visits: &[Visit],
        skip_indices: &[usize],
    ) -> Result<(), RouteEvaluatorError> {
        if let Some(&index) = skip_indices.iter().find(|&&index| index >= visits.len()) {
            return Err(RouteEvaluatorError::SkipIndexOutOfRange {
                index,
                len: visits.len(),
            });
        }

        self.fill(
            graph,
            visits
                .iter()
                .enumerate()
                .filter(|(index, _)| !skip_indices.contains(index))
                .map(|(_, visit)| visit),
        )
    }

    fn fill<'a>(
        &mut self,
        graph: &SearchGraph,
        visits: impl Iterator<Item = &'a Visit>,
    ) -> Result<(), RouteEvaluatorError> {
        self.nodes.clear();

        for visit in visits {
            match graph.node_of_visit(visit.id()) {
                Ok(node) => self.nodes.push(node),
                Err(error) => {
                    self.nodes.clear();
                    return Err(error);
                }
            }
        }

        Ok(())
    }
}
