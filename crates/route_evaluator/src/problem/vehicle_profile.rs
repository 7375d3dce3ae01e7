use jiff::SignedDuration;

use crate::define_index_newtype;

use super::{location::LocationIdx, travel_time_matrix::TravelTimeMatrix};

define_index_newtype!(VehicleProfileIdx, VehicleProfile);

/// A mode of transport (car, bike, walk, ...) and its travel times. Shifts
/// refer to the profile their worker travels with.
#[derive(Debug, Clone)]
pub struct VehicleProfile {
    external_id: String,
    travel_times: TravelTimeMatrix,
}

impl VehicleProfile {
    pub fn new(external_id: String, travel_times: TravelTimeMatrix) -> Self {
        Self {
            external_id,
            travel_times,
        }
    }

    pub fn external_id(&self) -> &str {
        &self.external_id
    }

    #[inline(always)]
    pub fn travel_time(&self, from: LocationIdx, to: LocationIdx) -> SignedDuration {
        self.travel_times.travel_time(from, to)
    }

    pub fn travel_times(&self) -> &TravelTimeMatrix {
        &self.travel_times
    }
}
