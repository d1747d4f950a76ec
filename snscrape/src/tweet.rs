use chrono::{DateTime, FixedOffset, Utc};
use itertools::Itertools;
use old_tweets_common::Tweet;
use serde::Deserialize;

/// One line of `snscrape --jsonl twitter-search` output.
#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub(crate) struct SnscrapeTweet {
    pub url: String,
    pub date: DateTime<FixedOffset>,
    pub raw_content: Option<String>,
    pub content: Option<String>,
    pub id: u64,
    pub user: User,
    #[serde(default)]
    pub reply_count: u64,
    #[serde(default)]
    pub retweet_count: u64,
    #[serde(default)]
    pub like_count: u64,
    pub in_reply_to_user: Option<User>,
    pub mentioned_users: Option<Vec<User>>,
    pub coordinates: Option<Coordinates>,
    pub hashtags: Option<Vec<String>>,
}

#[derive(Deserialize, Debug)]
pub(crate) struct User {
    pub username: String,
}

#[derive(Deserialize, Debug)]
pub(crate) struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

impl From<SnscrapeTweet> for Tweet {
    fn from(t: SnscrapeTweet) -> Self {
        Self {
            date: t.date.with_timezone(&Utc),
            username: t.user.username,
            to: t.in_reply_to_user.map(|u| u.username),
            replies: t.reply_count,
            retweets: t.retweet_count,
            favorites: t.like_count,
            text: t.raw_content.or(t.content).unwrap_or_default(),
            // No comma, the geo column is written unquoted
            geo: t
                .coordinates
                .map(|c| format!("{} {}", c.latitude, c.longitude))
                .unwrap_or_default(),
            mentions: t
                .mentioned_users
                .unwrap_or_default()
                .iter()
                .map(|u| format!("@{}", u.username))
                .join(" "),
            hashtags: t
                .hashtags
                .unwrap_or_default()
                .iter()
                .map(|h| format!("#{h}"))
                .join(" "),
            id: t.id,
            permalink: t.url,
        }
    }
}
