use std::ffi::OsString;
use std::future::Future;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::error::ErrorKind;
use clap::Parser;
use itertools::Itertools;
use old_tweets_common::{Tweet, TweetSource};

use crate::args::Args;
use crate::config::Config;
use crate::error::OldTweetsError;
use crate::normalize;
use crate::output::{stdout_progress, CsvSink, Progress};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Completed,
    Interrupted,
    Failed,
}

impl Outcome {
    pub fn exit_code(self) -> i32 {
        match self {
            Self::Completed => 0,
            Self::Interrupted | Self::Failed => 1,
        }
    }
}

#[derive(Debug)]
pub struct Report {
    pub outcome: Outcome,
    /// Set when the output file was created, and therefore closed and reported
    pub output: Option<PathBuf>,
}

/// Parse `argv`, run the download, and return the process exit code.
pub async fn run<I, T>(argv: I) -> i32
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    let argv: Vec<OsString> = argv.into_iter().map(Into::into).collect();
    let args = match Args::try_parse_from(&argv) {
        Ok(args) => args,
        Err(err) => return report_parse_error(&err),
    };
    init_logger(args.debug);

    let config = match Config::load(args.config.as_deref()) {
        Ok(config) => config,
        Err(err) => {
            eprintln!("{:?}", err);
            return Outcome::Failed.exit_code();
        }
    };
    let source = config.scraper.build(args.debug);

    if args.debug {
        println!("{}", argv.iter().map(|a| a.to_string_lossy()).join(" "));
        println!("{} {}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"));
        println!("scraper: {}", source.program().display());
    }

    let interrupt = async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            log::warn!("unable to listen for Ctrl-C: {}", err);
            std::future::pending::<()>().await;
        }
    };
    let mut progress = stdout_progress();
    let report = execute(&args, &source, progress.as_mut(), interrupt).await;
    report.outcome.exit_code()
}

fn report_parse_error(err: &clap::Error) -> i32 {
    match err.kind() {
        ErrorKind::DisplayHelp
        | ErrorKind::DisplayVersion
        | ErrorKind::DisplayHelpOnMissingArgumentOrSubcommand => {
            let _ = err.print();
            0
        }
        _ => {
            eprint!("{}", parse_error_message(err));
            2
        }
    }
}

fn parse_error_message(err: &clap::Error) -> String {
    format!("\t{}\n", err.to_string().trim_end())
}

fn init_logger(debug: bool) {
    let default_filter = if debug {
        "warn,old_tweets=debug,snscrape=debug"
    } else {
        "warn"
    };
    let env = env_logger::Env::default().default_filter_or(default_filter);
    let _ = env_logger::Builder::from_env(env).try_init();
}

/// Download tweets matching `args` from `source` into the output file.
///
/// Stops early when `interrupt` completes. Whatever happens, the output file is closed
/// exactly once if it was created, and the summary line is printed after it.
pub async fn execute<S, F>(
    args: &Args,
    source: &S,
    progress: &mut dyn Progress,
    interrupt: F,
) -> Report
where
    S: TweetSource + ?Sized,
    F: Future,
{
    let mut sink: Option<CsvSink> = None;

    let result = tokio::select! {
        r = download(args, source, &mut *progress, &mut sink) => r,
        _ = interrupt => return close(sink, progress, Outcome::Interrupted),
    };

    let outcome = match result {
        Ok(()) => Outcome::Completed,
        Err(err) => {
            eprintln!("{:?}", err);
            Outcome::Failed
        }
    };

    close(sink, progress, outcome)
}

async fn download<S>(
    args: &Args,
    source: &S,
    progress: &mut dyn Progress,
    sink: &mut Option<CsvSink>,
) -> Result<()>
where
    S: TweetSource + ?Sized,
{
    let criteria = normalize::criteria(args)?;
    log::debug!("{:?}", criteria);

    let file = CsvSink::create(&args.output).map_err(|source| OldTweetsError::CreateOutput {
        path: args.output.clone(),
        source,
    })?;
    let sink = sink.insert(file);

    println!("Downloading tweets...");
    let mut receive = |tweets: &[Tweet]| -> Result<()> {
        let saved = sink
            .receive(tweets)
            .with_context(|| format!("unable to write to {}", sink.path().display()))?;
        progress.saved(saved);
        Ok(())
    };
    source.get_tweets(&criteria, &mut receive).await
}

fn close(sink: Option<CsvSink>, progress: &mut dyn Progress, mut outcome: Outcome) -> Report {
    if sink.is_some() {
        progress.finish();
    }
    if outcome == Outcome::Interrupted {
        println!("\nInterrupted.");
    }

    let Some(sink) = sink else {
        return Report {
            outcome,
            output: None,
        };
    };

    log::debug!("saved {} tweets", sink.saved());
    let path = sink.path().to_owned();
    if let Err(err) = sink.close() {
        eprintln!("unable to close {}: {}", path.display(), err);
        outcome = Outcome::Failed;
    }

    println!();
    println!("Done. Output file generated \"{}\".", path.display());

    Report {
        outcome,
        output: Some(path),
    }
}
