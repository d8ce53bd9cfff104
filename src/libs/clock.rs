use chrono::{FixedOffset, NaiveTime, Offset, Utc};
use serde::{Deserialize, Serialize};

/// India Standard Time, the reference zone for completion stamps.
pub const DEFAULT_UTC_OFFSET_MINUTES: i32 = 5 * 60 + 30;

/// Source of the current time of day.
pub trait Clock {
    fn now(&self) -> NaiveTime;
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct ClockConfig {
    /// Offset of the reference time zone from UTC.
    pub utc_offset_minutes: i32,
}

impl Default for ClockConfig {
    fn default() -> Self {
        ClockConfig {
            utc_offset_minutes: DEFAULT_UTC_OFFSET_MINUTES,
        }
    }
}

/// Wall clock pinned to a fixed UTC offset.
#[derive(Debug, Clone, Copy)]
pub struct ReferenceClock {
    offset: FixedOffset,
}

impl ReferenceClock {
    /// Offsets outside of +-24h fall back to the default zone.
    pub fn new(config: &ClockConfig) -> Self {
        let offset = FixedOffset::east_opt(config.utc_offset_minutes * 60)
            .or_else(|| FixedOffset::east_opt(DEFAULT_UTC_OFFSET_MINUTES * 60))
            .unwrap_or_else(|| Utc.fix());

        Self { offset }
    }
}

impl Default for ReferenceClock {
    fn default() -> Self {
        Self::new(&ClockConfig::default())
    }
}

impl Clock for ReferenceClock {
    fn now(&self) -> NaiveTime {
        Utc::now().with_timezone(&self.offset).time()
    }
}

/// Always reports the same time.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub NaiveTime);

impl Clock for FixedClock {
    fn now(&self) -> NaiveTime {
        self.0
    }
}
