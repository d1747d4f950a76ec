use std::ffi::OsString;

use itertools::Itertools;
use old_tweets_common::{Geo, TweetCriteria};

/// Usernames are searched in groups of this size, one `snscrape` run per group.
pub const USERNAMES_PER_QUERY: usize = 20;

/// Build the `twitter-search` queries for `criteria`, one per username group.
pub(crate) fn search_queries(criteria: &TweetCriteria, default_within: &str) -> Vec<String> {
    let mut filters = vec![];
    if let Some(since) = criteria.since {
        filters.push(format!("since:{}", since.format("%Y-%m-%d")));
    }
    if let Some(until) = criteria.until {
        filters.push(format!("until:{}", until.format("%Y-%m-%d")));
    }
    if let Some(geo) = &criteria.geo {
        let within: String = criteria
            .within
            .as_deref()
            .unwrap_or(default_within)
            .split_whitespace()
            .collect();
        match geo {
            Geo::Near(place) => filters.push(format!("near:\"{place}\" within:{within}")),
            Geo::Coordinates { lat, lon } => filters.push(format!("geocode:{lat},{lon},{within}")),
        }
    }
    if let Some(lang) = &criteria.lang {
        filters.push(format!("lang:{lang}"));
    }

    let build = |from: Option<String>| {
        criteria
            .query_search
            .iter()
            .cloned()
            .chain(from)
            .chain(filters.iter().cloned())
            .join(" ")
    };

    match &criteria.username {
        None => vec![build(None)],
        Some(usernames) => usernames
            .as_slice()
            .chunks(USERNAMES_PER_QUERY)
            .map(|chunk| {
                let from = match chunk {
                    [single] => format!("from:{single}"),
                    _ => format!("({})", chunk.iter().map(|u| format!("from:{u}")).join(" OR ")),
                };
                build(Some(from))
            })
            .collect(),
    }
}

/// Arguments for one `snscrape` run.
pub(crate) fn command_args(
    global_args: &[String],
    verbose: bool,
    query: &str,
    max_tweets: Option<u64>,
    top_tweets: bool,
) -> Vec<OsString> {
    let mut args: Vec<OsString> = global_args.iter().map(OsString::from).collect();
    if verbose {
        args.push("--verbose".into());
    }
    args.push("--jsonl".into());
    if let Some(max) = max_tweets.filter(|&m| m > 0) {
        args.push("--max-results".into());
        args.push(max.to_string().into());
    }
    args.push("twitter-search".into());
    if top_tweets {
        args.push("--top".into());
    }
    args.push(query.into());

    args
}
