use fxhash::FxHashMap;
use jiff::SignedDuration;

use crate::{
    define_index_newtype,
    error::RouteEvaluatorError,
    problem::{
        location::LocationIdx,
        vehicle_profile::{VehicleProfile, VehicleProfileIdx},
        visit::{Visit, VisitIdx},
    },
};

define_index_newtype!(NodeIdx, Node);

#[derive(Debug, Clone)]
pub enum NodeKind {
    Origin,
    Destination,
    Visit(Visit),
}

#[derive(Debug, Clone)]
pub struct Node {
    id: NodeIdx,
    location_id: LocationIdx,
    kind: NodeKind,
}

impl Node {
    pub fn id(&self) -> NodeIdx {
        self.id
    }

    pub fn location_id(&self) -> LocationIdx {
        self.location_id
    }

    pub fn kind(&self) -> &NodeKind {
        &self.kind
    }

    pub fn visit(&self) -> Option<&Visit> {
        match &self.kind {
            NodeKind::Visit(visit) => Some(visit),
            _ => None,
        }
    }

    pub fn is_destination(&self) -> bool {
        matches!(self.kind, NodeKind::Destination)
    }
}

/// One node per visit plus the origin and destination depots. Edges are
/// implicit: the travel time between two nodes is read from the travel times
/// of the vehicle profile a shift travels with.
///
/// The graph never changes after construction.
#[derive(Debug, Clone)]
pub struct SearchGraph {
    nodes: Vec<Node>,
    visit_nodes: FxHashMap<VisitIdx, NodeIdx>,
    vehicle_profiles: FxHashMap<VehicleProfileIdx, VehicleProfile>,
    origin: NodeIdx,
    destination: NodeIdx,
}

impl SearchGraph {
    pub fn new(
        vehicle_profiles: FxHashMap<VehicleProfileIdx, VehicleProfile>,
        visits: &[Visit],
        origin: LocationIdx,
        destination: LocationIdx,
    ) -> Result<Self, RouteEvaluatorError> {
        let mut nodes = Vec::with_capacity(visits.len() + 2);
        let mut visit_nodes =
            FxHashMap::with_capacity_and_hasher(visits.len(), Default::default());

        nodes.push(Node {
            id: NodeIdx::new(0),
            location_id: origin,
            kind: NodeKind::Origin,
        });
        nodes.push(Node {
            id: NodeIdx::new(1),
            location_id: destination,
            kind: NodeKind::Destination,
        });

        for visit in visits {
            let id = NodeIdx::new(nodes.len());
            visit_nodes.insert(visit.id(), id);
            nodes.push(Node {
                id,
                location_id: visit.location_id(),
                kind: NodeKind::Visit(visit.clone()),
            });
        }

        for (&vehicle_profile_id, profile) in &vehicle_profiles {
            if let Some(node) = nodes
                .iter()
                .find(|node| !profile.travel_times().contains(node.location_id))
            {
                return Err(RouteEvaluatorError::UnknownLocation {
                    location_id: node.location_id,
                    vehicle_profile_id,
                });
            }
        }

        Ok(SearchGraph {
            nodes,
            visit_nodes,
            vehicle_profiles,
            origin: NodeIdx::new(0),
            destination: NodeIdx::new(1),
        })
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn num_nodes(&self) -> usize {
        self.nodes.len()
    }

    #[inline(always)]
    pub fn node(&self, id: NodeIdx) -> &Node {
        &self.nodes[id]
    }

    pub fn origin(&self) -> NodeIdx {
        self.origin
    }

    pub fn destination(&self) -> NodeIdx {
        self.destination
    }

    pub fn node_of_visit(&self, visit_id: VisitIdx) -> Result<NodeIdx, RouteEvaluatorError> {
        self.visit_nodes
            .get(&visit_id)
            .copied()
            .ok_or(RouteEvaluatorError::UnknownVisit(visit_id))
    }

    pub fn vehicle_profile(
        &self,
        vehicle_profile_id: VehicleProfileIdx,
    ) -> Result<&VehicleProfile, RouteEvaluatorError> {
        self.vehicle_profiles
            .get(&vehicle_profile_id)
            .ok_or(RouteEvaluatorError::UnknownVehicleProfile(vehicle_profile_id))
    }

    #[inline(always)]
    pub fn travel_time(
        &self,
        profile: &VehicleProfile,
        from: NodeIdx,
        to: NodeIdx,
    ) -> SignedDuration {
        profile.travel_time(self.nodes[from].location_id, self.nodes[to].location_id)
    }
}
