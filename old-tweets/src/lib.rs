pub mod app;
pub mod args;
pub mod config;
pub mod error;
pub mod normalize;
pub mod output;

pub use app::{execute, run, Outcome, Report};
