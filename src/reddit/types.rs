use std::str::FromStr;

use anyhow::anyhow;
use serde::{Deserialize, Serialize};

/// Reddit's `t=` ranking window for top listings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeWindow {
    Hour,
    Day,
    Week,
    Month,
    Year,
    All,
}

impl TimeWindow {
    pub fn as_str(&self) -> &'static str {
        match self {
            TimeWindow::Hour => "hour",
            TimeWindow::Day => "day",
            TimeWindow::Week => "week",
            TimeWindow::Month => "month",
            TimeWindow::Year => "year",
            TimeWindow::All => "all",
        }
    }
}

impl FromStr for TimeWindow {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "hour" => Ok(TimeWindow::Hour),
            "day" => Ok(TimeWindow::Day),
            "week" => Ok(TimeWindow::Week),
            "month" => Ok(TimeWindow::Month),
            "year" => Ok(TimeWindow::Year),
            "all" => Ok(TimeWindow::All),
            other => Err(anyhow!("unknown time window: {}", other)),
        }
    }
}

/// A subreddit as returned by subreddit search. Consumed read-only by the
/// discovery agent and printed in reports.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubredditInfo {
    pub name: String,
    pub title: String,
    pub description: String,
    pub subscribers: u64,
    pub created_utc: f64,
    pub over18: bool,
    pub url: String,
}

/// A submission summary from a top listing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PostInfo {
    pub title: String,
    pub author: String,
    pub score: i64,
    pub num_comments: u64,
    pub url: String,
    pub content: String,
}
