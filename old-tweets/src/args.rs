use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Parser, ValueHint};

const EXAMPLES: &str = "\
Examples:
  old-tweets --username \"barackobama\" --toptweets --maxtweets 10
  old-tweets --querysearch \"europe refugees\" --maxtweets 1000 --output refugees.csv
  old-tweets --username \"gtbank\" --since 2019-01-01 --until 2019-12-21 --output GTB.csv
  old-tweets --usernames-from-file banks.txt --maxtweets 100
  old-tweets --querysearch \"bitcoin\" --near \"Berlin, Germany\" --within 25km --maxtweets 10
  old-tweets --querysearch \"museum\" --near \"55.75N,37.61E\" --within 40km --maxtweets 10";

/// Export old tweets matching a search to CSV
#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about,
    after_help = EXAMPLES,
    arg_required_else_help = true,
    args_override_self = true,
    infer_long_args = true
)]
pub struct Args {
    /// Search text to match
    #[arg(long = "querysearch", value_name = "QUERY", allow_hyphen_values = true)]
    pub query_search: Option<String>,

    /// Username(s) to get tweets from, separated by spaces or commas. May be repeated
    #[arg(long = "username", value_name = "USERNAME", allow_hyphen_values = true)]
    pub usernames: Vec<String>,

    /// Read usernames from a file, separated by whitespace or commas, '#' starts a comment.
    /// May be repeated
    #[arg(
        long,
        value_name = "FILE",
        value_hint = ValueHint::FilePath,
        allow_hyphen_values = true
    )]
    pub usernames_from_file: Vec<PathBuf>,

    /// Oldest date of tweets to get
    #[arg(long, value_name = "YYYY-MM-DD", allow_hyphen_values = true)]
    pub since: Option<NaiveDate>,

    /// Date (exclusive) to get tweets before
    #[arg(long, value_name = "YYYY-MM-DD", allow_hyphen_values = true)]
    pub until: Option<NaiveDate>,

    /// Reference location, either "LAT,LON" such as "51.5N,0.1W" or a place name
    #[arg(long, value_name = "LOCATION", allow_hyphen_values = true)]
    pub near: Option<String>,

    /// Radius around --near, e.g. "15mi" or "25km"
    #[arg(long, value_name = "DISTANCE", allow_hyphen_values = true)]
    pub within: Option<String>,

    /// Only get top tweets instead of all matching tweets
    #[arg(long = "toptweets")]
    pub top_tweets: bool,

    /// Maximum number of tweets to get, 0 or less for no limit
    #[arg(long = "maxtweets", value_name = "N", allow_hyphen_values = true)]
    pub max_tweets: Option<i64>,

    /// Language of tweets, e.g. "en"
    #[arg(long, value_name = "CODE", allow_hyphen_values = true)]
    pub lang: Option<String>,

    /// Output CSV file
    #[arg(
        long,
        default_value = "output_got.csv",
        value_hint = ValueHint::FilePath,
        allow_hyphen_values = true
    )]
    pub output: PathBuf,

    /// Print the command line and verbose scraper output
    #[arg(long)]
    pub debug: bool,

    /// Config file location
    #[arg(long, value_hint = ValueHint::FilePath, allow_hyphen_values = true)]
    pub config: Option<PathBuf>,
}

#[cfg(test)]
mod test {
    use chrono::NaiveDate;
    use clap::error::ErrorKind;
    use clap::{CommandFactory, Parser};

    use super::Args;

    #[test]
    fn test_cli() {
        Args::command().debug_assert();
    }

    #[test]
    fn test_parse() {
        let args = Args::try_parse_from([
            "old-tweets",
            "--username",
            "@GTBank",
            "--username=kudabank",
            "--since",
            "2019-01-01",
            "--until=2019-12-21",
            "--toptweets",
            "--maxtweets",
            "10",
            "--near",
            "Berlin, Germany",
        ])
        .unwrap();

        assert_eq!(args.usernames, ["@GTBank", "kudabank"]);
        assert_eq!(args.since, NaiveDate::from_ymd_opt(2019, 1, 1));
        assert_eq!(args.until, NaiveDate::from_ymd_opt(2019, 12, 21));
        assert!(args.top_tweets);
        assert!(!args.debug);
        assert_eq!(args.max_tweets, Some(10));
        assert_eq!(args.near.as_deref(), Some("Berlin, Germany"));
        assert_eq!(args.output.to_str(), Some("output_got.csv"));
    }

    #[test]
    fn test_parse_prefix_and_repeats() {
        let args = Args::try_parse_from([
            "old-tweets",
            "--query",
            "bitcoin",
            "--lang",
            "en",
            "--lang",
            "cn",
            "--usernames-from-file",
            "a.txt",
            "--usernames-from-file",
            "b.txt",
        ])
        .unwrap();

        assert_eq!(args.query_search.as_deref(), Some("bitcoin"));
        assert_eq!(args.lang.as_deref(), Some("cn"));
        assert_eq!(args.usernames_from_file.len(), 2);
    }

    #[test]
    fn test_parse_hyphen_values() {
        let args = Args::try_parse_from([
            "old-tweets",
            "--near",
            "-33.9,18.4",
            "--querysearch",
            "-bitcoin",
            "--maxtweets",
            "-1",
            "--username",
            "-gtbank",
            "--output=-",
        ])
        .unwrap();

        assert_eq!(args.near.as_deref(), Some("-33.9,18.4"));
        assert_eq!(args.query_search.as_deref(), Some("-bitcoin"));
        assert_eq!(args.max_tweets, Some(-1));
        assert_eq!(args.usernames, ["-gtbank"]);
        assert_eq!(args.output.to_str(), Some("-"));
    }

    #[test]
    fn test_parse_errors() {
        let err = Args::try_parse_from(["old-tweets", "--bogus", "x"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::UnknownArgument);

        let err = Args::try_parse_from(["old-tweets", "--since", "2019-13-01"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ValueValidation);

        let err = Args::try_parse_from(["old-tweets", "--maxtweets", "many"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ValueValidation);
    }

    #[test]
    fn test_help() {
        let err = Args::try_parse_from(["old-tweets"]).unwrap_err();
        assert_eq!(
            err.kind(),
            ErrorKind::DisplayHelpOnMissingArgumentOrSubcommand
        );

        let err = Args::try_parse_from(["old-tweets", "-h"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::DisplayHelp);
    }
}
