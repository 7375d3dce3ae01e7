use std::sync::Arc;

use jiff::SignedDuration;

use crate::error::RouteEvaluatorError;

use super::location::{Location, LocationIdx};

pub type Time = f64;

/// Average speed used when deriving travel times from haversine distances, in m/s.
const HAVERSINE_SPEED: f64 = 50.0 / 3.6;

/// Travel times in seconds between every pair of locations.
///
/// The matrix uses a flat row-major structure: the entry for a pair of
/// locations lives at `from * num_locations + to`. The storage is shared, so
/// cloning a matrix is cheap.
#[derive(Debug, Clone)]
pub struct TravelTimeMatrix {
    times: Arc<Vec<Time>>,
    num_locations: usize,
    is_symmetric: bool,
}

fn is_flat_matrix_symmetric(matrix: &[f64], num_locations: usize) -> bool {
    for i in 0..num_locations {
        for j in 0..num_locations {
            if matrix[i * num_locations + j] != matrix[j * num_locations + i] {
                return false;
            }
        }
    }
    true
}

impl TravelTimeMatrix {
    /// Rows are indexed by origin location, and every row must have one entry
    /// per location.
    pub fn new(times: Vec<Vec<Time>>) -> Result<Self, RouteEvaluatorError> {
        let num_locations = times.len();
        if let Some((row, entries)) = times
            .iter()
            .enumerate()
            .find(|(_, entries)| entries.len() != num_locations)
        {
            return Err(RouteEvaluatorError::NonSquareTravelTimeMatrix {
                row,
                len: entries.len(),
                expected: num_locations,
            });
        }

        let times: Vec<Time> = times.into_iter().flatten().collect();
        let is_symmetric = is_flat_matrix_symmetric(&times, num_locations);

        Ok(TravelTimeMatrix {
            times: Arc::new(times),
            num_locations,
            is_symmetric,
        })
    }

    pub fn from_haversine(locations: &[Location]) -> Self {
        let num_locations = locations.len();
        let mut times: Vec<Time> = vec![0.0; num_locations * num_locations];

        for (i, from) in locations.iter().enumerate() {
            for (j, to) in locations.iter().enumerate() {
                times[i * num_locations + j] = from.haversine_distance(to) / HAVERSINE_SPEED;
            }
        }

        TravelTimeMatrix {
            times: Arc::new(times),
            num_locations,
            is_symmetric: true,
        }
    }

    /// Euclidean distances interpreted as seconds, as in the Solomon-style instances.
    pub fn from_euclidean(locations: &[Location], round: bool) -> Self {
        let num_locations = locations.len();
        let mut times: Vec<Time> = vec![0.0; num_locations * num_locations];

        for (i, from) in locations.iter().enumerate() {
            for (j, to) in locations.iter().enumerate() {
                times[i * num_locations + j] = if round {
                    from.euclidean_distance(to).round()
                } else {
                    from.euclidean_distance(to)
                }
            }
        }

        TravelTimeMatrix {
            times: Arc::new(times),
            num_locations,
            is_symmetric: true,
        }
    }

    #[cfg(test)]
    pub fn from_constant(num_locations: usize, time: Time) -> Self {
        TravelTimeMatrix {
            times: Arc::new(vec![time; num_locations * num_locations]),
            num_locations,
            is_symmetric: true,
        }
    }

    #[inline(always)]
    fn index(&self, from: LocationIdx, to: LocationIdx) -> usize {
        from.get() * self.num_locations + to.get()
    }

    #[inline(always)]
    pub fn travel_time(&self, from: LocationIdx, to: LocationIdx) -> SignedDuration {
        if from == to {
            return SignedDuration::ZERO;
        }

        SignedDuration::from_secs_f64(self.times[self.index(from, to)])
    }

    pub fn contains(&self, location_id: LocationIdx) -> bool {
        location_id.get() < self.num_locations
    }

    pub fn is_symmetric(&self) -> bool {
        self.is_symmetric
    }

    pub fn num_locations(&self) -> usize {
        self.num_locations
    }
}
