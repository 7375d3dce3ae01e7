use thiserror::Error;

use crate::problem::{
    location::LocationIdx, vehicle_profile::VehicleProfileIdx, visit::VisitIdx,
};

/// Malformed input. An unsatisfiable route is not an error: evaluations
/// report it as `None` or as an infeasible result.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RouteEvaluatorError {
    #[error("Visit {0} is not part of the search graph")]
    UnknownVisit(VisitIdx),

    #[error("Skip index {index} is out of range for a route of {len} visits")]
    SkipIndexOutOfRange { index: usize, len: usize },

    #[error("Time window start of visit {0} is not initialized")]
    MissingTimeWindowStart(VisitIdx),

    #[error("Time window end of visit {0} is not initialized")]
    MissingTimeWindowEnd(VisitIdx),

    #[error("Visit {0} is not in the route")]
    VisitNotInRoute(VisitIdx),

    #[error("Route is empty")]
    EmptyRoute,

    #[error("No travel times for vehicle profile {0}")]
    UnknownVehicleProfile(VehicleProfileIdx),

    #[error("Location {location_id} is missing from the travel times of vehicle profile {vehicle_profile_id}")]
    UnknownLocation {
        location_id: LocationIdx,
        vehicle_profile_id: VehicleProfileIdx,
    },

    #[error("Travel time matrix row {row} has {len} entries, expected {expected}")]
    NonSquareTravelTimeMatrix {
        row: usize,
        len: usize,
        expected: usize,
    },

    #[error("An objective with id '{0}' is already registered")]
    DuplicateObjective(String),

    #[error("A constraint named '{0}' is already registered")]
    DuplicateConstraint(String),
}
