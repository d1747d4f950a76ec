//! Turn command line arguments into [`TweetCriteria`].

use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use indexmap::IndexSet;
use itertools::Itertools;
use old_tweets_common::{Geo, TweetCriteria, Usernames};
use regex::Regex;
use snscrape::USERNAMES_PER_QUERY;

use crate::args::Args;
use crate::error::OldTweetsError;

pub fn criteria(args: &Args) -> Result<TweetCriteria, OldTweetsError> {
    let mut usernames: IndexSet<String> = args
        .usernames
        .iter()
        .flat_map(|u| split_usernames(u))
        .collect();

    let files: IndexSet<&PathBuf> = args.usernames_from_file.iter().collect();
    for path in files {
        let found = read_usernames_file(path)?;
        println!("Found {} usernames in {}", found.len(), path.display());
        usernames.extend(found);
    }

    let max_tweets = tweet_limit(args);
    if let Some(warning) = batch_warning(usernames.len(), max_tweets) {
        println!("{warning}");
    }

    let username = match usernames.len() {
        0 => None,
        1 => usernames.pop().map(Usernames::One),
        _ => Some(Usernames::Many(usernames.into_iter().collect())),
    };

    Ok(TweetCriteria {
        query_search: args.query_search.clone(),
        username,
        since: args.since,
        until: args.until,
        geo: args.near.as_deref().map(parse_near),
        within: args.within.clone(),
        lang: args.lang.clone(),
        top_tweets: args.top_tweets,
        max_tweets,
    })
}

/// Positive `--maxtweets`, anything else means no limit.
fn tweet_limit(args: &Args) -> Option<u64> {
    args.max_tweets
        .and_then(|m| u64::try_from(m).ok())
        .filter(|&m| m > 0)
}

/// Split on runs of whitespace and commas, dropping '@' prefixes and case.
pub fn split_usernames(text: &str) -> Vec<String> {
    static SEPARATOR_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[\s,]+").unwrap());

    SEPARATOR_RE
        .split(text)
        .map(|u| u.trim_start_matches('@').to_lowercase())
        .filter(|u| !u.is_empty())
        .collect()
}

pub fn read_usernames_file(path: &Path) -> Result<Vec<String>, OldTweetsError> {
    static COMMENT_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?m)#.*$").unwrap());

    if !path.is_file() {
        return Err(OldTweetsError::FileNotFound(path.to_owned()));
    }
    let data = std::fs::read_to_string(path).map_err(|source| OldTweetsError::ReadUsernames {
        path: path.to_owned(),
        source,
    })?;

    Ok(split_usernames(&COMMENT_RE.replace_all(&data, "")))
}

/// Effective tweet limit when usernames are searched in several groups.
///
/// Only reported when there is more than one group and a limit was given.
pub fn batched_max_tweets(usernames: usize, max_tweets: Option<u64>) -> Option<u64> {
    let max_tweets = max_tweets.filter(|&m| m > 0)?;
    if usernames <= USERNAMES_PER_QUERY {
        return None;
    }
    let groups = u64::try_from(usernames.div_ceil(USERNAMES_PER_QUERY)).unwrap_or(u64::MAX);
    Some(groups.saturating_mul(max_tweets))
}

pub fn batch_warning(usernames: usize, max_tweets: Option<u64>) -> Option<String> {
    batched_max_tweets(usernames, max_tweets)
        .map(|max| format!("Warning: due to multiple username batches `maxtweets' set to {max}"))
}

/// Parse "LAT,LON" with optional N/S and E/W suffixes, otherwise treat `value` as a place name.
pub fn parse_near(value: &str) -> Geo {
    match parse_coordinates(value) {
        Some((lat, lon)) => Geo::Coordinates { lat, lon },
        None => Geo::Near(value.to_owned()),
    }
}

fn parse_coordinates(value: &str) -> Option<(f64, f64)> {
    let (lat, lon) = value.split(',').collect_tuple()?;
    let lat = parse_degrees(lat.trim(), 'n', 's')?;
    let lon = parse_degrees(lon.trim(), 'e', 'w')?;

    // NOTE: latitude is bounded by 180 and longitude by 90, the reverse of the usual ranges.
    // Kept so that existing scripts resolve locations the same way.
    if !(-180.0..=180.0).contains(&lat) || !(-90.0..=90.0).contains(&lon) {
        return None;
    }

    Some((lat, lon))
}

fn parse_degrees(token: &str, positive: char, negative: char) -> Option<f64> {
    let last = token.chars().last()?;
    let suffix = last.to_ascii_lowercase();
    let (number, sign) = if suffix == positive {
        (&token[..token.len() - last.len_utf8()], 1.0)
    } else if suffix == negative {
        (&token[..token.len() - last.len_utf8()], -1.0)
    } else {
        (token, 1.0)
    };

    number.trim().parse::<f64>().ok().map(|n| sign * n)
}
