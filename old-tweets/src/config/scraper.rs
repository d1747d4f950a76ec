use std::path::PathBuf;

use serde::Deserialize;
use snscrape::Snscrape;

#[derive(Deserialize, Debug)]
#[serde(default)]
pub struct ScraperConfig {
    /// `snscrape` executable, looked up in PATH when not absolute
    pub program: PathBuf,
    /// Extra global options passed on every run
    pub args: Vec<String>,
    #[serde(deserialize_with = "super::deserialize_nonzero")]
    pub buffer_length: usize,
    pub default_within: String,
}

impl Default for ScraperConfig {
    fn default() -> Self {
        Self {
            program: PathBuf::from("snscrape"),
            args: vec![],
            buffer_length: 100,
            default_within: "15mi".to_owned(),
        }
    }
}

impl ScraperConfig {
    pub fn build(&self, verbose: bool) -> Snscrape {
        Snscrape::new(&self.program)
            .global_args(self.args.clone())
            .buffer_length(self.buffer_length)
            .default_within(&self.default_within)
            .verbose(verbose)
    }
}
