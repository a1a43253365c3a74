//! Timeframe selector for dashboard aggregation.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Bucket granularity and window width.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default)]
pub enum Timeframe {
    #[serde(rename = "daily")]
    Daily, // last 14 days
    #[serde(rename = "weekly")]
    Weekly, // last 8 weeks, starting Sunday
    #[default]
    #[serde(rename = "monthly")]
    Monthly, // last 12 months
    #[serde(rename = "yearly")]
    Yearly, // every year in the data, plus the current one
}

impl Timeframe {
    pub const ALL: [Timeframe; 4] = [
        Timeframe::Daily,
        Timeframe::Weekly,
        Timeframe::Monthly,
        Timeframe::Yearly,
    ];

    /// Number of buckets in the window, or `None` for yearly, whose width
    /// depends on the data.
    pub fn window_len(&self) -> Option<usize> {
        match self {
            Timeframe::Daily => Some(14),
            Timeframe::Weekly => Some(8),
            Timeframe::Monthly => Some(12),
            Timeframe::Yearly => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Timeframe::Daily => "daily",
            Timeframe::Weekly => "weekly",
            Timeframe::Monthly => "monthly",
            Timeframe::Yearly => "yearly",
        }
    }
}

impl fmt::Display for Timeframe {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Timeframe {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "daily" | "day" => Ok(Timeframe::Daily),
            "weekly" | "week" => Ok(Timeframe::Weekly),
            "monthly" | "month" => Ok(Timeframe::Monthly),
            "yearly" | "year" => Ok(Timeframe::Yearly),
            _ => anyhow::bail!("unknown timeframe '{s}' (expected daily, weekly, monthly or yearly)"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_timeframe() {
        assert_eq!("daily".parse::<Timeframe>().unwrap(), Timeframe::Daily);
        assert_eq!("Weekly".parse::<Timeframe>().unwrap(), Timeframe::Weekly);
        assert_eq!(" MONTHLY ".parse::<Timeframe>().unwrap(), Timeframe::Monthly);
        assert_eq!("year".parse::<Timeframe>().unwrap(), Timeframe::Yearly);
        assert!("hourly".parse::<Timeframe>().is_err());
    }

    #[test]
    fn test_display_round_trips() {
        for tf in Timeframe::ALL {
            assert_eq!(tf.to_string().parse::<Timeframe>().unwrap(), tf);
        }
    }

    #[test]
    fn test_window_len() {
        assert_eq!(Timeframe::Daily.window_len(), Some(14));
        assert_eq!(Timeframe::Weekly.window_len(), Some(8));
        assert_eq!(Timeframe::Monthly.window_len(), Some(12));
        assert_eq!(Timeframe::Yearly.window_len(), None);
    }

    #[test]
    fn test_default_is_monthly() {
        assert_eq!(Timeframe::default(), Timeframe::Monthly);
    }
}
