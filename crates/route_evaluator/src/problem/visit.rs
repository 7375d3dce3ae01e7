use jiff::{SignedDuration, Timestamp};
use serde::Serialize;

use crate::define_index_newtype;

use super::{location::LocationIdx, time_window::TimeWindow};

define_index_newtype!(VisitIdx, Visit);

#[derive(Serialize, Debug, Clone)]
pub struct Visit {
    id: VisitIdx,
    location_id: LocationIdx,
    /// Travel time from the visit's predecessor in the route it was scheduled in.
    travel_time: SignedDuration,
    duration: SignedDuration,
    time_window: TimeWindow,
    /// How far past its synced start time the visit may begin.
    time_dependent_offset_interval: SignedDuration,
}

impl Visit {
    pub fn id(&self) -> VisitIdx {
        self.id
    }

    pub fn location_id(&self) -> LocationIdx {
        self.location_id
    }

    pub fn travel_time(&self) -> SignedDuration {
        self.travel_time
    }

    pub fn duration(&self) -> SignedDuration {
        self.duration
    }

    pub fn time_window(&self) -> &TimeWindow {
        &self.time_window
    }

    pub fn time_window_start(&self) -> Option<Timestamp> {
        self.time_window.start()
    }

    pub fn time_window_end(&self) -> Option<Timestamp> {
        self.time_window.end()
    }

    pub fn time_dependent_offset_interval(&self) -> SignedDuration {
        self.time_dependent_offset_interval
    }
}

pub struct VisitBuilder {
    id: VisitIdx,
    location_id: LocationIdx,
    travel_time: Option<SignedDuration>,
    duration: Option<SignedDuration>,
    time_window: Option<TimeWindow>,
    time_dependent_offset_interval: Option<SignedDuration>,
}

impl VisitBuilder {
    pub fn new(id: usize, location_id: usize) -> Self {
        VisitBuilder {
            id: id.into(),
            location_id: location_id.into(),
            travel_time: None,
            duration: None,
            time_window: None,
            time_dependent_offset_interval: None,
        }
    }

    pub fn set_travel_time(&mut self, travel_time: SignedDuration) -> &mut VisitBuilder {
        self.travel_time = Some(travel_time);
        self
    }

    pub fn set_duration(&mut self, duration: SignedDuration) -> &mut VisitBuilder {
        self.duration = Some(duration);
        self
    }

    pub fn set_time_window(&mut self, time_window: TimeWindow) -> &mut VisitBuilder {
        self.time_window = Some(time_window);
        self
    }

    pub fn set_time_dependent_offset_interval(
        &mut self,
        offset: SignedDuration,
    ) -> &mut VisitBuilder {
        self.time_dependent_offset_interval = Some(offset);
        self
    }

    pub fn build(self) -> Visit {
        Visit {
            id: self.id,
            location_id: self.location_id,
            travel_time: self.travel_time.unwrap_or(SignedDuration::ZERO),
            duration: self.duration.unwrap_or(SignedDuration::ZERO),
            time_window: self.time_window.unwrap_or_default(),
            time_dependent_offset_interval: self
                .time_dependent_offset_interval
                .unwrap_or(SignedDuration::ZERO),
        }
    }
}
