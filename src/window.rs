//! Time window resolution
//!
//! Maps the symbolic windows accepted by the API to a lookback in XBridge
//! blocks. One block is roughly one minute of chain time.
//!
//! Two independent selectors exist: the coarse `TimeInterval` used by the
//! long-range statistics endpoints and the fine `RecentInterval` used by the
//! recent-activity endpoints. Each has its own table.

use serde::{Deserialize, Serialize};
use std::fmt;

const BLOCKS_PER_HOUR: u32 = 60;
const BLOCKS_PER_DAY: u32 = BLOCKS_PER_HOUR * 24;
const BLOCKS_PER_WEEK: u32 = BLOCKS_PER_DAY * 7;

/// A window that can be turned into a block lookback.
///
/// Unrecognized windows resolve to `0`, meaning "fetch nothing".
pub trait LookbackWindow: fmt::Debug + Send + Sync {
    fn lookback_blocks(&self) -> u32;
}

/// Coarse window selector
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "String")]
pub enum TimeInterval {
    FifteenMinutes,
    Hour,
    Day,
    Week,
    Month,
    Year,
    #[default]
    Unknown,
}

impl LookbackWindow for TimeInterval {
    fn lookback_blocks(&self) -> u32 {
        match self {
            TimeInterval::FifteenMinutes => 15,
            TimeInterval::Hour => BLOCKS_PER_HOUR,
            TimeInterval::Day => BLOCKS_PER_DAY,
            // A month is four weeks, a year 52 weeks
            TimeInterval::Week => BLOCKS_PER_WEEK,
            TimeInterval::Month => BLOCKS_PER_WEEK * 4,
            TimeInterval::Year => BLOCKS_PER_WEEK * 52,
            TimeInterval::Unknown => 0,
        }
    }
}

impl From<String> for TimeInterval {
    fn from(raw: String) -> Self {
        Self::from(raw.as_str())
    }
}

impl From<&str> for TimeInterval {
    /// Accepts a variant name (case-insensitive) or its ordinal.
    fn from(raw: &str) -> Self {
        match raw.trim().to_ascii_lowercase().as_str() {
            "0" | "fifteenminutes" => TimeInterval::FifteenMinutes,
            "1" | "hour" => TimeInterval::Hour,
            "2" | "day" => TimeInterval::Day,
            "3" | "week" => TimeInterval::Week,
            "4" | "month" => TimeInterval::Month,
            "5" | "year" => TimeInterval::Year,
            _ => TimeInterval::Unknown,
        }
    }
}

/// Fine-grained window selector for recent activity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "String")]
pub enum RecentInterval {
    FiveMinutes,
    FifteenMinutes,
    Hour,
    TwoHours,
    Day,
    #[default]
    Unknown,
}

impl LookbackWindow for RecentInterval {
    fn lookback_blocks(&self) -> u32 {
        match self {
            RecentInterval::FiveMinutes => 5,
            RecentInterval::FifteenMinutes => 15,
            RecentInterval::Hour => BLOCKS_PER_HOUR,
            RecentInterval::TwoHours => BLOCKS_PER_HOUR * 2,
            RecentInterval::Day => BLOCKS_PER_DAY,
            RecentInterval::Unknown => 0,
        }
    }
}

impl From<String> for RecentInterval {
    fn from(raw: String) -> Self {
        Self::from(raw.as_str())
    }
}

impl From<&str> for RecentInterval {
    fn from(raw: &str) -> Self {
        match raw.trim().to_ascii_lowercase().as_str() {
            "0" | "fiveminutes" => RecentInterval::FiveMinutes,
            "1" | "fifteenminutes" => RecentInterval::FifteenMinutes,
            "2" | "hour" => RecentInterval::Hour,
            "3" | "twohours" => RecentInterval::TwoHours,
            "4" | "day" => RecentInterval::Day,
            _ => RecentInterval::Unknown,
        }
    }
}
