use std::io::{self, IsTerminal, Stdout, Write};

use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};

/// Reports the running number of saved tweets after each batch.
pub trait Progress: Send {
    fn saved(&mut self, total: usize);
    fn finish(&mut self) {}
}

/// Single line rewritten in place, for interactive terminals.
pub struct TerminalProgress(ProgressBar);

impl TerminalProgress {
    pub fn new() -> Self {
        let pb = ProgressBar::with_draw_target(None, ProgressDrawTarget::stdout());
        let sty = ProgressStyle::default_spinner().template("{msg}").unwrap();
        pb.set_style(sty);
        Self(pb)
    }
}

impl Default for TerminalProgress {
    fn default() -> Self {
        Self::new()
    }
}

impl Progress for TerminalProgress {
    fn saved(&mut self, total: usize) {
        self.0.set_message(format!("Saved {total}"));
    }

    fn finish(&mut self) {
        self.0.finish();
    }
}

/// Appends each running total to one growing line, for logs and pipes.
pub struct PlainProgress<W> {
    out: W,
}

impl<W: Write + Send> PlainProgress<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write + Send> Progress for PlainProgress<W> {
    fn saved(&mut self, total: usize) {
        // Ignore a closed stdout
        let _ = write!(self.out, "{total} ").and_then(|_| self.out.flush());
    }
}

pub fn stdout_progress() -> Box<dyn Progress> {
    if io::stdout().is_terminal() {
        Box::new(TerminalProgress::new())
    } else {
        Box::new(PlainProgress::<Stdout>::new(io::stdout()))
    }
}
