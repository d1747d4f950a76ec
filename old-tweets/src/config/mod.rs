use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::de::Error;
use serde::{Deserialize, Deserializer};

use self::scraper::ScraperConfig;

pub mod scraper;

#[derive(Debug, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub scraper: ScraperConfig,
}

impl Config {
    pub fn read(path: impl AsRef<Path>) -> Result<Self> {
        let conf_contents = std::fs::read_to_string(path.as_ref())?;
        Ok(toml::from_str(&conf_contents)?)
    }

    /// Read `path`, or the default config file if it exists, or fall back to defaults.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let path = match path {
            Some(p) => p.to_owned(),
            None => match default_config_path() {
                Some(p) if p.is_file() => p,
                _ => return Ok(Self::default()),
            },
        };
        log::debug!("reading config from {}", path.display());
        Self::read(&path).with_context(|| format!("unable to read config file {}", path.display()))
    }
}

pub fn default_config_path() -> Option<PathBuf> {
    directories::ProjectDirs::from("", "", "Old Tweets").map(|d| d.config_dir().join("config.toml"))
}

fn deserialize_nonzero<'de, D>(deserializer: D) -> Result<usize, D::Error>
where
    D: Deserializer<'de>,
{
    let n: usize = Deserialize::deserialize(deserializer)?;
    if n == 0 {
        return Err(D::Error::custom("must be greater than 0"));
    }
    Ok(n)
}

#[cfg(test)]
mod test {
    use std::path::PathBuf;

    use super::Config;

    #[test]
    fn test_read_config() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(
            &path,
            r#"
[scraper]
program = "/opt/snscrape/bin/snscrape"
args = ["--retry", "5"]
buffer_length = 20
"#,
        )
        .unwrap();

        let conf = Config::load(Some(&path)).unwrap();
        assert_eq!(conf.scraper.program, PathBuf::from("/opt/snscrape/bin/snscrape"));
        assert_eq!(conf.scraper.args, ["--retry", "5"]);
        assert_eq!(conf.scraper.buffer_length, 20);
        assert_eq!(conf.scraper.default_within, "15mi");
    }

    #[test]
    fn test_empty_config() {
        let conf: Config = toml::from_str("").unwrap();
        assert_eq!(conf.scraper.program, PathBuf::from("snscrape"));
        assert!(conf.scraper.args.is_empty());
        assert_eq!(conf.scraper.buffer_length, 100);
    }

    #[test]
    fn test_bad_config() {
        assert!(toml::from_str::<Config>("[scraper]\nbuffer_length = 0\n").is_err());
        assert!(toml::from_str::<Config>("[scraper]\nbuffer_length = \"many\"\n").is_err());
    }

    #[test]
    fn test_missing_config() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing.toml");

        let err = Config::load(Some(&path)).unwrap_err();
        assert!(err.to_string().starts_with("unable to read config file"));
    }
}
