use chrono::{DateTime, Utc};

/// A single retrieved tweet, flattened to the columns that get exported.
#[derive(Debug, Clone, PartialEq)]
pub struct Tweet {
    pub date: DateTime<Utc>,
    pub username: String,
    /// Handle of the user this tweet replies to
    pub to: Option<String>,
    pub replies: u64,
    pub retweets: u64,
    pub favorites: u64,
    pub text: String,
    pub geo: String,
    pub mentions: String,
    pub hashtags: String,
    pub id: u64,
    pub permalink: String,
}
