use fxhash::FxHashMap;
use jiff::{SignedDuration, Timestamp};

use crate::{
    evaluator::{route_evaluator::RouteEvaluator, search_graph::SearchGraph},
    problem::{
        location::{Location, LocationIdx},
        shift::{Shift, ShiftBuilder},
        time_window::TimeWindow,
        travel_time_matrix::{Time, TravelTimeMatrix},
        vehicle_profile::{VehicleProfile, VehicleProfileIdx},
        visit::{Visit, VisitBuilder},
    },
};

/// Seconds since the Unix epoch.
pub fn ts(seconds: i64) -> Timestamp {
    Timestamp::from_second(seconds).unwrap()
}

pub fn create_locations(locations: Vec<(f64, f64)>) -> Vec<Location> {
    locations
        .iter()
        .map(|&(x, y)| Location::from_cartesian(x, y))
        .collect()
}

/// Locations on the x axis, so travel times are the differences of the coordinates.
pub fn create_line_locations(xs: Vec<f64>) -> Vec<Location> {
    create_locations(xs.into_iter().map(|x| (x, 0.0)).collect())
}

/// Visit `i` is at `location_ids[i]` and has id `i`.
pub fn create_basic_visits(location_ids: Vec<usize>) -> Vec<Visit> {
    location_ids
        .iter()
        .enumerate()
        .map(|(index, &location_id)| VisitBuilder::new(index, location_id).build())
        .collect()
}

pub fn create_visit(
    id: usize,
    location_id: usize,
    duration: i64,
    time_window: Option<(i64, i64)>,
) -> Visit {
    let mut builder = VisitBuilder::new(id, location_id);
    builder.set_duration(SignedDuration::from_secs(duration));
    if let Some((start, end)) = time_window {
        builder.set_time_window(TimeWindow::new(Some(ts(start)), Some(ts(end))));
    }
    builder.build()
}

pub fn create_constant_profiles(
    num_locations: usize,
    time: Time,
) -> FxHashMap<VehicleProfileIdx, VehicleProfile> {
    let mut profiles = FxHashMap::default();
    profiles.insert(
        VehicleProfileIdx::new(0),
        VehicleProfile::new(
            "constant".to_owned(),
            TravelTimeMatrix::from_constant(num_locations, time),
        ),
    );
    profiles
}

pub fn create_euclidean_profiles(
    locations: &[Location],
) -> FxHashMap<VehicleProfileIdx, VehicleProfile> {
    let mut profiles = FxHashMap::default();
    profiles.insert(
        VehicleProfileIdx::new(0),
        VehicleProfile::new(
            "test_profile".to_owned(),
            TravelTimeMatrix::from_euclidean(locations, false),
        ),
    );
    profiles
}

/// Depot at location 0, one minute between any two locations.
pub fn create_test_graph(num_locations: usize, visits: &[Visit]) -> SearchGraph {
    SearchGraph::new(
        create_constant_profiles(num_locations, 60.0),
        visits,
        LocationIdx::new(0),
        LocationIdx::new(0),
    )
    .unwrap()
}

/// Evaluator without objectives or constraints, depot at location 0.
pub fn create_test_evaluator(locations: &[Location], visits: &[Visit]) -> RouteEvaluator {
    RouteEvaluator::new(
        create_euclidean_profiles(locations),
        visits,
        LocationIdx::new(0),
    )
    .unwrap()
}

pub fn create_shift(id: usize, start: i64, end: i64) -> Shift {
    ShiftBuilder::new(id, 0, ts(start), ts(end)).build()
}

pub fn create_shift_with_overtime(id: usize, start: i64, end: i64, overtime: i64) -> Shift {
    let mut builder = ShiftBuilder::new(id, 0, ts(start), ts(end));
    builder.set_maximum_overtime(SignedDuration::from_secs(overtime));
    builder.build()
}
