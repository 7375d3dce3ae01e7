//! Start time intervals for the visits of a non-motorized shift that takes
//! part in a carpooling hand-off.
//!
//! Visits whose id is a key of the synced start times are synced: their start
//! is fixed by a visit on another route. Every visit of the route must have a
//! time window with both bounds.

use fxhash::FxHashMap;
use jiff::{SignedDuration, Timestamp};
use serde::Serialize;

use crate::{
    error::RouteEvaluatorError,
    problem::{
        shift::Shift,
        visit::{Visit, VisitIdx},
    },
};

pub type SyncedStartTimes = FxHashMap<VisitIdx, Timestamp>;

#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct VisitTimeWindow {
    pub earliest_start: Timestamp,
    /// Backward-sweep bound, not a raw start: the latest start of the visit
    /// plus its duration. A synced visit starts at its synced start plus its
    /// offset.
    pub latest_start: Timestamp,
}

/// The four visits of a hand-off between a motorized and a non-motorized shift.
#[derive(Debug, Clone, Copy)]
pub struct CarpoolingVisits<'a> {
    pub join_motorized: &'a Visit,
    pub pick_up: &'a Visit,
    pub drop_off: &'a Visit,
    /// Successor of `join_motorized` in the non-motorized route.
    pub complete_task: &'a Visit,
}

/// Earliest start of `visit_id`, scheduling every visit before it as early
/// as possible from the start of the shift.
pub fn earliest_start(
    route: &[Visit],
    visit_id: VisitIdx,
    synced_start_times: &SyncedStartTimes,
    shift: &Shift,
) -> Result<Timestamp, RouteEvaluatorError> {
    if route.is_empty() {
        return Err(RouteEvaluatorError::EmptyRoute);
    }

    let mut previous_end_time = shift.start();

    for visit in route {
        let time_window_start = visit
            .time_window_start()
            .ok_or(RouteEvaluatorError::MissingTimeWindowStart(visit.id()))?;

        let mut start_time = (previous_end_time + visit.travel_time()).max(time_window_start);
        if let Some(&synced_start_time) = synced_start_times.get(&visit.id()) {
            start_time = start_time.max(synced_start_time);
        }

        previous_end_time = start_time + visit.duration();

        if visit.id() == visit_id {
            return Ok(start_time);
        }
    }

    Err(RouteEvaluatorError::VisitNotInRoute(visit_id))
}

/// Latest bound of `visit_id`, scheduling every visit after it as late as
/// possible, walking back from the end of the route.
///
/// The bound returned is the latest start plus the visit's duration. Synced
/// visits are pinned to their synced start plus their offset interval, without
/// looking at their neighbours.
pub fn latest_start(
    route: &[Visit],
    visit_id: VisitIdx,
    synced_start_times: &SyncedStartTimes,
    shift: &Shift,
) -> Result<Timestamp, RouteEvaluatorError> {
    let last = route.last().ok_or(RouteEvaluatorError::EmptyRoute)?;
    let last_end = last
        .time_window_end()
        .ok_or(RouteEvaluatorError::MissingTimeWindowEnd(last.id()))?;

    let mut latest_start = last_end.min(shift.end());
    let mut previous_travel_time = SignedDuration::ZERO;

    for visit in route.iter().rev() {
        let time_window_end = visit
            .time_window_end()
            .ok_or(RouteEvaluatorError::MissingTimeWindowEnd(visit.id()))?;

        latest_start = match synced_start_times.get(&visit.id()) {
            Some(&synced_start_time) => synced_start_time + visit.time_dependent_offset_interval(),
            None => {
                let time_window_start = visit
                    .time_window_start()
                    .ok_or(RouteEvaluatorError::MissingTimeWindowStart(visit.id()))?;

                (latest_start - previous_travel_time - visit.duration())
                    .min(time_window_end - visit.duration())
                    .max(time_window_start)
            }
        };

        previous_travel_time = visit.travel_time();

        if visit.id() == visit_id {
            return Ok(latest_start + visit.duration());
        }
    }

    Err(RouteEvaluatorError::VisitNotInRoute(visit_id))
}

pub fn calculate_time_window(
    route: &[Visit],
    visit_id: VisitIdx,
    synced_start_times: &SyncedStartTimes,
    shift: &Shift,
) -> Result<VisitTimeWindow, RouteEvaluatorError> {
    Ok(VisitTimeWindow {
        earliest_start: earliest_start(route, visit_id, synced_start_times, shift)?,
        latest_start: latest_start(route, visit_id, synced_start_times, shift)?,
    })
}

/// Time windows of the four hand-off visits, derived from the route of the
/// non-motorized shift. Pick-up and drop-off do not need to be in the route.
pub fn calculate_time_windows_for_non_motorized(
    route: &[Visit],
    visits: &CarpoolingVisits,
    synced_start_times: &SyncedStartTimes,
    shift: &Shift,
) -> Result<FxHashMap<VisitIdx, VisitTimeWindow>, RouteEvaluatorError> {
    let complete_task = visits.complete_task;
    let complete_task_window =
        calculate_time_window(route, complete_task.id(), synced_start_times, shift)?;

    let join_motorized_start = earliest_start(
        route,
        visits.join_motorized.id(),
        synced_start_times,
        shift,
    )?;
    let join_motorized_window = VisitTimeWindow {
        earliest_start: join_motorized_start,
        latest_start: complete_task_window.latest_start - complete_task.travel_time(),
    };

    let drop_off_window = VisitTimeWindow {
        earliest_start: join_motorized_start + complete_task.travel_time(),
        latest_start: complete_task_window.latest_start - complete_task.duration(),
    };

    let mut time_windows = FxHashMap::default();
    time_windows.insert(complete_task.id(), complete_task_window);
    time_windows.insert(visits.join_motorized.id(), join_motorized_window);
    time_windows.insert(visits.pick_up.id(), join_motorized_window);
    time_windows.insert(visits.drop_off.id(), drop_off_window);

    Ok(time_windows)
}

#[cfg(test)]
mod tests {
    use crate::{
        problem::{time_window::TimeWindow, visit::VisitBuilder},
        test_utils::{self, ts},
    };

    use super::*;

    fn create_visit(id: usize, travel_time: i64, duration: i64, window: (i64, i64)) -> Visit {
        let mut builder = VisitBuilder::new(id, 0);
        builder
            .set_travel_time(SignedDuration::from_secs(travel_time))
            .set_duration(SignedDuration::from_secs(duration))
            .set_time_window(TimeWindow::new(Some(ts(window.0)), Some(ts(window.1))));
        builder.build()
    }

    fn create_route() -> Vec<Visit> {
        vec![
            create_visit(0, 10, 20, (0, 500)),
            create_visit(1, 30, 40, (100, 600)),
            create_visit(2, 5, 10, (0, 900)),
        ]
    }

    fn window(earliest_start: i64, latest_start: i64) -> VisitTimeWindow {
        VisitTimeWindow {
            earliest_start: ts(earliest_start),
            latest_start: ts(latest_start),
        }
    }

    #[test]
    fn test_time_windows_without_synced_visits() {
        let route = create_route();
        let shift = test_utils::create_shift(0, 0, 1000);
        let synced = SyncedStartTimes::default();

        let windows = route
            .iter()
            .map(|visit| calculate_time_window(&route, visit.id(), &synced, &shift).unwrap())
            .collect::<Vec<_>>();

        assert_eq!(windows, vec![window(10, 500), window(100, 600), window(145, 900)]);
        assert!(windows.iter().all(|w| w.earliest_start <= w.latest_start));
    }

    #[test]
    fn test_latest_start_includes_duration() {
        let route = create_route();
        let shift = test_utils::create_shift(0, 0, 1000);
        let synced = SyncedStartTimes::default();

        // The last visit must start by 890 to finish within its window.
        let bound = latest_start(&route, VisitIdx::new(2), &synced, &shift).unwrap();
        assert_eq!(bound, ts(900));
        assert_eq!(bound - route[2].duration(), ts(890));
    }

    #[test]
    fn test_shift_end_bounds_the_last_visit() {
        let route = create_route();
        let shift = test_utils::create_shift(0, 0, 700);
        let synced = SyncedStartTimes::default();

        assert_eq!(
            latest_start(&route, VisitIdx::new(2), &synced, &shift),
            Ok(ts(700))
        );
        assert_eq!(
            latest_start(&route, VisitIdx::new(1), &synced, &shift),
            Ok(ts(600))
        );
    }

    #[test]
    fn test_synced_visit_is_pinned() {
        let mut route = create_route();
        let mut builder = VisitBuilder::new(1, 0);
        builder
            .set_travel_time(SignedDuration::from_secs(30))
            .set_duration(SignedDuration::from_secs(40))
            .set_time_window(TimeWindow::new(Some(ts(100)), Some(ts(600))))
            .set_time_dependent_offset_interval(SignedDuration::from_secs(15));
        route[1] = builder.build();

        let shift = test_utils::create_shift(0, 0, 1000);
        let mut synced = SyncedStartTimes::default();
        synced.insert(VisitIdx::new(1), ts(200));

        assert_eq!(
            calculate_time_window(&route, VisitIdx::new(1), &synced, &shift),
            Ok(window(200, 255))
        );
        assert_eq!(
            calculate_time_window(&route, VisitIdx::new(2), &synced, &shift),
            Ok(window(245, 900))
        );
        assert_eq!(
            calculate_time_window(&route, VisitIdx::new(0), &synced, &shift),
            Ok(window(10, 185))
        );
    }

    #[test]
    fn test_zero_slack_sweeps_agree() {
        let route = vec![
            create_visit(0, 10, 0, (10, 10)),
            create_visit(1, 20, 0, (30, 30)),
        ];
        let shift = test_utils::create_shift(0, 0, 1000);
        let synced = SyncedStartTimes::default();

        for visit in &route {
            let time_window = calculate_time_window(&route, visit.id(), &synced, &shift).unwrap();
            assert_eq!(time_window.earliest_start, time_window.latest_start);
        }
    }

    #[test]
    fn test_carpooling_pattern() {
        let route = create_route();
        let pick_up = create_visit(10, 0, 5, (0, 1000));
        let drop_off = create_visit(11, 0, 5, (0, 1000));
        let shift = test_utils::create_shift(0, 0, 1000);
        let visits = CarpoolingVisits {
            join_motorized: &route[0],
            pick_up: &pick_up,
            drop_off: &drop_off,
            complete_task: &route[1],
        };

        let windows = calculate_time_windows_for_non_motorized(
            &route,
            &visits,
            &SyncedStartTimes::default(),
            &shift,
        )
        .unwrap();

        assert_eq!(windows.len(), 4);
        assert_eq!(windows[&VisitIdx::new(1)], window(100, 600));
        assert_eq!(windows[&VisitIdx::new(0)], window(10, 570));
        assert_eq!(windows[&VisitIdx::new(10)], window(10, 570));
        assert_eq!(windows[&VisitIdx::new(11)], window(40, 560));
    }

    #[test]
    fn test_missing_time_window_is_an_error() {
        let mut route = create_route();
        route.insert(0, VisitBuilder::new(7, 0).build());
        let shift = test_utils::create_shift(0, 0, 1000);
        let synced = SyncedStartTimes::default();

        assert_eq!(
            earliest_start(&route, VisitIdx::new(1), &synced, &shift),
            Err(RouteEvaluatorError::MissingTimeWindowStart(VisitIdx::new(7)))
        );
        assert_eq!(
            latest_start(&route, VisitIdx::new(7), &synced, &shift),
            Err(RouteEvaluatorError::MissingTimeWindowEnd(VisitIdx::new(7)))
        );
    }

    #[test]
    fn test_visit_not_in_route() {
        let route = create_route();
        let shift = test_utils::create_shift(0, 0, 1000);
        let synced = SyncedStartTimes::default();

        assert_eq!(
            calculate_time_window(&route, VisitIdx::new(42), &synced, &shift),
            Err(RouteEvaluatorError::VisitNotInRoute(VisitIdx::new(42)))
        );
        assert_eq!(
            earliest_start(&[], VisitIdx::new(0), &synced, &shift),
            Err(RouteEvaluatorError::EmptyRoute)
        );
    }
}
