//! [`TweetSource`](old_tweets_common::TweetSource) backed by the external `snscrape` tool.

mod client;
mod error;
mod query;
mod tweet;

pub use client::Snscrape;
pub use error::SnscrapeError;
pub use query::USERNAMES_PER_QUERY;
