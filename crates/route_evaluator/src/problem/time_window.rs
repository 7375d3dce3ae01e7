use jiff::Timestamp;
use serde::{Deserialize, Serialize};

/// Earliest and latest permissible start of a visit. Either bound may be absent.
#[derive(Deserialize, Debug, Serialize, Clone, Copy, Default, PartialEq, Eq)]
pub struct TimeWindow {
    start: Option<Timestamp>,
    end: Option<Timestamp>,
}

impl TimeWindow {
    pub fn new(start: Option<Timestamp>, end: Option<Timestamp>) -> Self {
        TimeWindow { start, end }
    }

    pub fn start(&self) -> Option<Timestamp> {
        self.start
    }

    pub fn end(&self) -> Option<Timestamp> {
        self.end
    }

    pub fn is_empty(&self) -> bool {
        self.start.is_none() && self.end.is_none()
    }
}

impl TimeWindow {
    pub fn is_satisfied(&self, start: Timestamp) -> bool {
        match self.end {
            Some(end) => start <= end,
            None => true,
        }
    }

    /// Service starts on arrival, or when the window opens if the worker is early.
    pub fn service_start(&self, arrival: Timestamp) -> Timestamp {
        match self.start {
            Some(start) => arrival.max(start),
            None => arrival,
        }
    }
}

#[derive(Default)]
pub struct TimeWindowBuilder {
    start: Option<Timestamp>,
    end: Option<Timestamp>,
}

impl TimeWindowBuilder {
    pub fn with_start(mut self, start: Timestamp) -> Self {
        self.start = Some(start);
        self
    }

    pub fn with_iso_start(mut self, start: &str) -> Result<Self, jiff::Error> {
        self.start = Some(start.parse()?);
        Ok(self)
    }

    pub fn with_end(mut self, end: Timestamp) -> Self {
        self.end = Some(end);
        self
    }

    pub fn with_iso_end(mut self, end: &str) -> Result<Self, jiff::Error> {
        self.end = Some(end.parse()?);
        Ok(self)
    }

    pub fn build(self) -> TimeWindow {
        TimeWindow {
            start: self.start,
            end: self.end,
        }
    }
}
