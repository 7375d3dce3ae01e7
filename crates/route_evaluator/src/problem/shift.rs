use jiff::{SignedDuration, Timestamp};
use serde::Serialize;

use crate::define_index_newtype;

use super::vehicle_profile::VehicleProfileIdx;

define_index_newtype!(ShiftIdx, Shift);

#[derive(Serialize, Debug, Clone)]
pub struct Shift {
    id: ShiftIdx,
    vehicle_profile_id: VehicleProfileIdx,
    start: Timestamp,
    end: Timestamp,
    maximum_overtime: Option<SignedDuration>,
}

impl Shift {
    pub fn id(&self) -> ShiftIdx {
        self.id
    }

    pub fn vehicle_profile_id(&self) -> VehicleProfileIdx {
        self.vehicle_profile_id
    }

    pub fn start(&self) -> Timestamp {
        self.start
    }

    pub fn end(&self) -> Timestamp {
        self.end
    }

    /// Overtime allowance for this shift, `None` when the default applies.
    pub fn maximum_overtime(&self) -> Option<SignedDuration> {
        self.maximum_overtime
    }
}

pub struct ShiftBuilder {
    id: ShiftIdx,
    start: Timestamp,
    end: Timestamp,
    vehicle_profile_id: VehicleProfileIdx,
    maximum_overtime: Option<SignedDuration>,
}

impl ShiftBuilder {
    pub fn new(id: usize, vehicle_profile_id: usize, start: Timestamp, end: Timestamp) -> Self {
        ShiftBuilder {
            id: id.into(),
            start,
            end,
            vehicle_profile_id: vehicle_profile_id.into(),
            maximum_overtime: None,
        }
    }

    pub fn set_maximum_overtime(&mut self, maximum_overtime: SignedDuration) -> &mut ShiftBuilder {
        self.maximum_overtime = Some(maximum_overtime);
        self
    }

    pub fn build(self) -> Shift {
        Shift {
            id: self.id,
            vehicle_profile_id: self.vehicle_profile_id,
            start: self.start,
            end: self.end,
            maximum_overtime: self.maximum_overtime,
        }
    }
}
