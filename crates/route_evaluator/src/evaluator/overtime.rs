use jiff::{SignedDuration, Timestamp};

use crate::problem::shift::Shift;

pub const DEFAULT_MAXIMUM_OVERTIME: SignedDuration = SignedDuration::ZERO;

/// Time by which the return to the office exceeds `latest_end`, never negative.
pub fn overtime(latest_end: Timestamp, earliest_office_return: Timestamp) -> SignedDuration {
    if earliest_office_return > latest_end {
        earliest_office_return.duration_since(latest_end)
    } else {
        SignedDuration::ZERO
    }
}

pub fn is_overtime(latest_end: Timestamp, earliest_office_return: Timestamp) -> bool {
    earliest_office_return > latest_end
}

pub fn latest_allowed_end_of_shift(shift: &Shift) -> Timestamp {
    shift.end() + shift.maximum_overtime().unwrap_or(DEFAULT_MAXIMUM_OVERTIME)
}

#[cfg(test)]
mod tests {
    use crate::test_utils::{self, ts};

    use super::*;

    #[test]
    fn test_overtime_is_clamped() {
        assert_eq!(overtime(ts(100), ts(90)), SignedDuration::ZERO);
        assert_eq!(overtime(ts(100), ts(100)), SignedDuration::ZERO);
        assert_eq!(overtime(ts(100), ts(130)), SignedDuration::from_secs(30));
        assert!(!is_overtime(ts(100), ts(100)));
        assert!(is_overtime(ts(100), ts(101)));
    }

    #[test]
    fn test_latest_allowed_end_of_shift() {
        let shift = test_utils::create_shift(0, 0, 1000);
        assert_eq!(latest_allowed_end_of_shift(&shift), ts(1000));

        let shift = test_utils::create_shift_with_overtime(0, 0, 1000, 120);
        assert_eq!(latest_allowed_end_of_shift(&shift), ts(1120));
    }
}
