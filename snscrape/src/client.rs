use std::path::{Path, PathBuf};
use std::process::Stdio;

use anyhow::Result;
use async_trait::async_trait;
use old_tweets_common::{ReceiveBuffer, Tweet, TweetCriteria, TweetSource};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader};
use tokio::process::Command;

use crate::error::SnscrapeError;
use crate::query::{command_args, search_queries};
use crate::tweet::SnscrapeTweet;

pub struct Snscrape {
    program: PathBuf,
    global_args: Vec<String>,
    buffer_length: usize,
    default_within: String,
    verbose: bool,
}

impl Snscrape {
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
            global_args: vec![],
            buffer_length: 100,
            default_within: "15mi".to_owned(),
            verbose: false,
        }
    }

    /// Extra arguments placed before the scraper name on every run
    pub fn global_args(mut self, args: Vec<String>) -> Self {
        self.global_args = args;
        self
    }

    /// Number of tweets collected before each callback
    pub fn buffer_length(mut self, buffer_length: usize) -> Self {
        self.buffer_length = buffer_length.max(1);
        self
    }

    /// Radius used with `--near` when none was given
    pub fn default_within(mut self, within: impl Into<String>) -> Self {
        self.default_within = within.into();
        self
    }

    pub fn verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    pub fn program(&self) -> &Path {
        &self.program
    }

    async fn search(
        &self,
        query: &str,
        criteria: &TweetCriteria,
        receive: &mut ReceiveBuffer<'_>,
    ) -> Result<()> {
        let program = self.program.display().to_string();
        let args = command_args(
            &self.global_args,
            self.verbose,
            query,
            criteria.max_tweets,
            criteria.top_tweets,
        );
        log::debug!("running {} {:?}", program, args);

        let mut child = Command::new(&self.program)
            .args(&args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::inherit())
            .kill_on_drop(true)
            .spawn()
            .map_err(|source| SnscrapeError::Spawn {
                program: program.clone(),
                source,
            })?;
        let stdout = child
            .stdout
            .take()
            .ok_or_else(|| SnscrapeError::Stdout {
                program: program.clone(),
            })?;

        let count = read_batches(BufReader::new(stdout), self.buffer_length, receive)
            .await
            .map_err(|e| match e {
                ReadError::Io(source) => anyhow::Error::from(SnscrapeError::Read {
                    program: program.clone(),
                    source,
                }),
                ReadError::Parse { line, source } => {
                    anyhow::Error::from(SnscrapeError::Parse { line, source })
                }
                ReadError::Receive(e) => e,
            })?;
        log::debug!("{} returned {} tweets for query: {}", program, count, query);

        let status = child.wait().await.map_err(|source| SnscrapeError::Read {
            program: program.clone(),
            source,
        })?;
        if !status.success() {
            return Err(SnscrapeError::Status {
                program,
                query: query.to_owned(),
                status,
            }
            .into());
        }

        Ok(())
    }
}

#[async_trait]
impl TweetSource for Snscrape {
    async fn get_tweets(
        &self,
        criteria: &TweetCriteria,
        receive: &mut ReceiveBuffer<'_>,
    ) -> Result<()> {
        for query in search_queries(criteria, &self.default_within) {
            self.search(&query, criteria, receive).await?;
        }
        Ok(())
    }
}

#[derive(Debug)]
enum ReadError {
    Io(std::io::Error),
    Parse {
        line: usize,
        source: serde_json::Error,
    },
    Receive(anyhow::Error),
}

/// Parse JSON lines from `reader`, handing tweets to `receive` in batches of `buffer_length`.
async fn read_batches<R>(
    reader: R,
    buffer_length: usize,
    receive: &mut ReceiveBuffer<'_>,
) -> Result<usize, ReadError>
where
    R: AsyncBufRead + Unpin + Send,
{
    let mut lines = reader.lines();
    let mut buffer: Vec<Tweet> = Vec::with_capacity(buffer_length);
    let mut count = 0;
    let mut line_number = 0;

    while let Some(line) = lines.next_line().await.map_err(ReadError::Io)? {
        line_number += 1;
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let tweet: SnscrapeTweet =
            serde_json::from_str(line).map_err(|source| ReadError::Parse {
                line: line_number,
                source,
            })?;
        buffer.push(tweet.into());

        if buffer.len() >= buffer_length {
            receive(&buffer).map_err(ReadError::Receive)?;
            count += buffer.len();
            buffer.clear();
        }
    }

    if !buffer.is_empty() {
        receive(&buffer).map_err(ReadError::Receive)?;
        count += buffer.len();
    }

    Ok(count)
}

#[cfg(test)]
mod test {
    use anyhow::anyhow;
    use old_tweets_common::{Tweet, TweetCriteria, TweetSource};

    use super::{read_batches, ReadError, Snscrape};
    use crate::SnscrapeError;

    fn jsonl(n: u64) -> String {
        (1..=n)
            .map(|id| {
                format!(
                    r#"{{"url": "https://twitter.com/u/status/{id}", "date": "2019-01-01T00:00:00+00:00", "rawContent": "tweet {id}", "id": {id}, "user": {{"username": "u"}}}}"#
                )
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    #[tokio::test]
    async fn test_read_batches() {
        let input = jsonl(5);
        let mut batches: Vec<Vec<u64>> = vec![];
        let mut receive = |tweets: &[Tweet]| -> anyhow::Result<()> {
            batches.push(tweets.iter().map(|t| t.id).collect());
            Ok(())
        };

        let count = read_batches(input.as_bytes(), 2, &mut receive).await.unwrap();

        assert_eq!(count, 5);
        assert_eq!(batches, vec![vec![1, 2], vec![3, 4], vec![5]]);
    }

    #[tokio::test]
    async fn test_read_batches_empty() {
        let mut calls = 0;
        let mut receive = |_: &[Tweet]| -> anyhow::Result<()> {
            calls += 1;
            Ok(())
        };

        let count = read_batches("\n\n".as_bytes(), 100, &mut receive).await.unwrap();

        assert_eq!(count, 0);
        assert_eq!(calls, 0);
    }

    #[tokio::test]
    async fn test_read_batches_bad_line() {
        let input = format!("{}\nnot json\n", jsonl(1));
        let mut receive = |_: &[Tweet]| -> anyhow::Result<()> { Ok(()) };

        let err = read_batches(input.as_bytes(), 100, &mut receive)
            .await
            .unwrap_err();

        assert!(matches!(err, ReadError::Parse { line: 2, .. }));
    }

    #[tokio::test]
    async fn test_read_batches_receiver_error() {
        let input = jsonl(3);
        let mut receive = |_: &[Tweet]| -> anyhow::Result<()> { Err(anyhow!("disk full")) };

        let err = read_batches(input.as_bytes(), 1, &mut receive)
            .await
            .unwrap_err();

        assert!(matches!(err, ReadError::Receive(e) if e.to_string() == "disk full"));
    }

    /// Runs `script` with `sh`, in place of the real executable.
    #[cfg(unix)]
    fn scripted(dir: &tempfile::TempDir, script: &str) -> Snscrape {
        let path = dir.path().join("snscrape.sh");
        std::fs::write(&path, script).unwrap();
        Snscrape::new("/bin/sh").global_args(vec![path.to_str().unwrap().to_owned()])
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_get_tweets() {
        let dir = tempfile::tempdir().unwrap();
        let source =
            scripted(&dir, &format!("cat <<'END'\n{}\nEND\n", jsonl(3))).buffer_length(2);
        let mut batches: Vec<Vec<u64>> = vec![];
        let mut receive = |tweets: &[Tweet]| -> anyhow::Result<()> {
            batches.push(tweets.iter().map(|t| t.id).collect());
            Ok(())
        };

        source
            .get_tweets(&TweetCriteria::default(), &mut receive)
            .await
            .unwrap();

        assert_eq!(batches, vec![vec![1, 2], vec![3]]);
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_get_tweets_exit_status() {
        let dir = tempfile::tempdir().unwrap();
        let source = scripted(&dir, &format!("cat <<'END'\n{}\nEND\nexit 3\n", jsonl(2)));
        let mut ids: Vec<u64> = vec![];
        let mut receive = |tweets: &[Tweet]| -> anyhow::Result<()> {
            ids.extend(tweets.iter().map(|t| t.id));
            Ok(())
        };

        let err = source
            .get_tweets(&TweetCriteria::default(), &mut receive)
            .await
            .unwrap_err();

        assert_eq!(ids, [1, 2]);
        let err = err.downcast::<SnscrapeError>().unwrap();
        assert!(
            matches!(&err, SnscrapeError::Status { status, .. } if status.code() == Some(3)),
            "{err:?}"
        );
    }

    #[tokio::test]
    async fn test_get_tweets_missing_program() {
        let dir = tempfile::tempdir().unwrap();
        let source = Snscrape::new(dir.path().join("no-such-snscrape"));
        let mut calls = 0;
        let mut receive = |_: &[Tweet]| -> anyhow::Result<()> {
            calls += 1;
            Ok(())
        };

        let err = source
            .get_tweets(&TweetCriteria::default(), &mut receive)
            .await
            .unwrap_err();

        assert_eq!(calls, 0);
        assert!(matches!(
            err.downcast_ref::<SnscrapeError>(),
            Some(SnscrapeError::Spawn { .. })
        ));
    }
}
