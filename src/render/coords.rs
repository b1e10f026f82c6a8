//! Maps video time onto the shared horizontal axis.
//!
//! One pixel per elapsed second since the session start. The offset is
//! rounded to whole seconds (half away from zero); renderers add the chart's
//! left margin themselves.

use crate::error::{Result, TimelineError};
use crate::models::time::{duration, TimePoint};

pub fn x_position(session_start: TimePoint, event_time: TimePoint) -> Result<i64> {
    let offset_secs = duration(session_start, event_time);
    if offset_secs < 0.0 {
        return Err(TimelineError::EventBeforeSessionStart { offset_secs });
    }
    Ok(offset_secs.round() as i64)
}

/// True when `event_time` precedes the session start.
pub fn before_start(session_start: TimePoint, event_time: TimePoint) -> bool {
    event_time < session_start
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::time::parse_timestamp;

    fn t(text: &str) -> TimePoint {
        parse_timestamp(text).unwrap()
    }

    #[test]
    fn start_maps_to_zero() {
        assert_eq!(x_position(t("11:00.0"), t("11:00.0")).unwrap(), 0);
    }

    #[test]
    fn rounds_half_away_from_zero() {
        assert_eq!(x_position(t("11:00.0"), t("11:01.499")).unwrap(), 1);
        assert_eq!(x_position(t("11:00.0"), t("11:01.500")).unwrap(), 2);
        assert_eq!(x_position(t("11:00.0"), t("12:30.250")).unwrap(), 90);
    }

    #[test]
    fn events_before_start_are_rejected() {
        let err = x_position(t("11:00.0"), t("10:59.5")).unwrap_err();
        match err {
            TimelineError::EventBeforeSessionStart { offset_secs } => {
                assert_eq!(offset_secs, -0.5)
            }
            other => panic!("unexpected error: {other:?}"),
        }
        assert!(before_start(t("11:00.0"), t("10:59.5")));
        assert!(!before_start(t("11:00.0"), t("11:00.0")));
    }
}
