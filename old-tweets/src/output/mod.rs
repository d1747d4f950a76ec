use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use old_tweets_common::Tweet;

pub use self::progress::{stdout_progress, PlainProgress, Progress, TerminalProgress};

mod progress;

pub const HEADER: &str =
    "date,username,to,replies,retweets,favorites,text,geo,mentions,hashtags,id,permalink";

/// CSV file that tweets are appended to as batches arrive.
pub struct CsvSink {
    path: PathBuf,
    file: BufWriter<File>,
    saved: usize,
}

impl CsvSink {
    /// Create or truncate `path` and write the header row.
    pub fn create(path: impl Into<PathBuf>) -> io::Result<Self> {
        let path = path.into();
        let mut file = BufWriter::new(File::create(&path)?);
        writeln!(file, "{HEADER}")?;
        Ok(Self {
            path,
            file,
            saved: 0,
        })
    }

    /// Append one row per tweet and flush. Returns the number of tweets saved so far.
    pub fn receive(&mut self, tweets: &[Tweet]) -> io::Result<usize> {
        for tweet in tweets {
            writeln!(self.file, "{}", format_row(tweet))?;
        }
        self.file.flush()?;
        self.saved += tweets.len();
        Ok(self.saved)
    }

    pub fn saved(&self) -> usize {
        self.saved
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn close(self) -> io::Result<PathBuf> {
        let Self { path, file, .. } = self;
        file.into_inner().map_err(|e| e.into_error())?;
        Ok(path)
    }
}

pub fn format_row(tweet: &Tweet) -> String {
    [
        tweet.date.format("%Y-%m-%d %H:%M:%S").to_string(),
        tweet.username.clone(),
        tweet.to.clone().unwrap_or_default(),
        tweet.replies.to_string(),
        tweet.retweets.to_string(),
        tweet.favorites.to_string(),
        quote(&tweet.text),
        tweet.geo.clone(),
        tweet.mentions.clone(),
        tweet.hashtags.clone(),
        tweet.id.to_string(),
        tweet.permalink.clone(),
    ]
    .join(",")
}

/// Wrap in double quotes, doubling any quotes inside.
pub fn quote(text: &str) -> String {
    format!("\"{}\"", text.replace('"', "\"\""))
}
