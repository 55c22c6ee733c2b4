use std::cell::Cell;
use std::fmt;
use std::rc::Rc;

use chrono::{DateTime, Local, NaiveDateTime, TimeZone};
use gloo_timers::callback::Interval;
use log::{info, warn};
use web_sys::{Document, Element};

use crate::dom::{by_id, Node};

pub const CONTAINER_ID: &str = "countdown";
pub const FIELD_IDS: [&str; 4] = ["days", "hours", "minutes", "seconds"];
pub const EXPIRED_CLASS: &str = "expired";
const TICK_MS: u32 = 1000;

const SECOND: i64 = 1000;
const MINUTE: i64 = SECOND * 60;
const HOUR: i64 = MINUTE * 60;
const DAY: i64 = HOUR * 24;

/// Time left until the target, split into display units.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Remaining {
    pub days: i64,
    pub hours: i64,
    pub minutes: i64,
    pub seconds: i64,
}

impl Remaining {
    pub const ZERO: Remaining = Remaining { days: 0, hours: 0, minutes: 0, seconds: 0 };

    /// `None` once the gap is zero or negative.
    pub fn from_gap_ms(gap: i64) -> Option<Self> {
        if gap <= 0 {
            return None;
        }
        Some(Self {
            days: gap / DAY,
            hours: (gap % DAY) / HOUR,
            minutes: (gap % HOUR) / MINUTE,
            seconds: (gap % MINUTE) / SECOND,
        })
    }

    pub fn fields(&self) -> [String; 4] {
        [self.days, self.hours, self.minutes, self.seconds].map(|n| format!("{:02}", n))
    }
}

impl fmt::Display for Remaining {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.fields().join(":"))
    }
}

pub fn local_target(target: NaiveDateTime) -> Option<DateTime<Local>> {
    Local.from_local_datetime(&target).earliest()
}

/// Renders a tick into the four display fields. Expiry zeroes them and marks
/// the container; returns false once expired.
pub fn render<N: Node>(container: &N, fields: &[Option<N>; 4], remaining: Option<Remaining>) -> bool {
    let (values, live) = match remaining {
        Some(remaining) => (remaining.fields(), true),
        None => (Remaining::ZERO.fields(), false),
    };
    for (field, value) in fields.iter().zip(values.iter()) {
        if let Some(field) = field {
            field.set_text(value);
        }
    }
    container.set_class(EXPIRED_CLASS, !live);
    live
}

/// Ticks once a second toward the configured target.
pub fn start(document: &Document, target: NaiveDateTime) {
    let Some(container) = by_id(document, CONTAINER_ID) else {
        return;
    };
    let Some(target) = local_target(target) else {
        warn!("countdown target {} does not exist in local time", target);
        return;
    };
    let fields: [Option<Element>; 4] = FIELD_IDS.map(|id| by_id(document, id));
    let expired = Rc::new(Cell::new(false));

    let tick = move || {
        if expired.get() {
            return;
        }
        let gap = (target - Local::now()).num_milliseconds();
        if !render(&container, &fields, Remaining::from_gap_ms(gap)) {
            info!("countdown reached its target");
            expired.set(true);
        }
    };
    tick();
    Interval::new(TICK_MS, tick).forget();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::fake::FakeNode;

    #[test]
    fn decomposes_one_of_each_unit() {
        let remaining = Remaining::from_gap_ms(90_061_001).unwrap();
        assert_eq!(remaining.to_string(), "01:01:01:01");
    }

    #[test]
    fn exact_unit_multiples() {
        assert_eq!(Remaining::from_gap_ms(60_000).unwrap().to_string(), "00:00:01:00");
        assert_eq!(Remaining::from_gap_ms(3_600_000).unwrap().to_string(), "00:01:00:00");
        assert_eq!(Remaining::from_gap_ms(86_400_000).unwrap().to_string(), "01:00:00:00");
        assert_eq!(Remaining::from_gap_ms(59_999).unwrap().to_string(), "00:00:00:59");
    }

    #[test]
    fn sub_second_gap_shows_zeros_but_is_live() {
        assert_eq!(Remaining::from_gap_ms(1), Some(Remaining::ZERO));
    }

    #[test]
    fn zero_or_negative_gap_has_no_remaining() {
        assert_eq!(Remaining::from_gap_ms(0), None);
        assert_eq!(Remaining::from_gap_ms(-5_000), None);
    }

    #[test]
    fn large_day_counts_are_not_truncated() {
        let remaining = Remaining::from_gap_ms(123 * DAY).unwrap();
        assert_eq!(remaining.fields()[0], "123");
    }

    #[test]
    fn render_writes_fields_and_marks_expiry() {
        let container = FakeNode::new();
        let fields = [Some(FakeNode::new()), Some(FakeNode::new()), None, Some(FakeNode::new())];

        assert!(render(&container, &fields, Remaining::from_gap_ms(90_061_001)));
        assert_eq!(fields[0].as_ref().unwrap().text(), "01");
        assert_eq!(fields[3].as_ref().unwrap().text(), "01");
        assert!(!container.has_class(EXPIRED_CLASS));

        assert!(!render(&container, &fields, None));
        assert_eq!(fields[0].as_ref().unwrap().text(), "00");
        assert!(container.has_class(EXPIRED_CLASS));
    }
}
