pub mod client;
pub mod types;

pub use client::{RedditClient, RedditConfig};
pub use types::{PostInfo, SubredditInfo, TimeWindow};
