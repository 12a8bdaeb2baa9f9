use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use teammate::engine::progress::{Progress, ProgressReporter};
use tracing::warn;

const SPINNER_TICK_MS: u64 = 80;

/// How the team building attempts of one search have fared so far.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
struct AttemptTally {
    launched: u64,
    finished: u64,
    failed: u64,
    abandoned: u64,
}

impl AttemptTally {
    fn summary(&self) -> String {
        let usable = self.finished.saturating_sub(self.failed);
        let mut summary = format!("{usable}/{} attempts usable", self.launched);
        if self.failed > 0 {
            summary.push_str(&format!(", {} failed", self.failed));
        }
        if self.abandoned > 0 {
            summary.push_str(&format!(", {} abandoned at deadline", self.abandoned));
        }
        summary
    }
}

struct SearchDisplay {
    bar: ProgressBar,
    tally: AttemptTally,
}

impl SearchDisplay {
    fn apply(&mut self, event: Progress) {
        match event {
            Progress::PhaseStart { name } => {
                self.bar.reset();
                self.bar.set_length(0);
                self.bar.set_style(spinner_style());
                self.bar.set_message(name);
                self.bar
                    .enable_steady_tick(Duration::from_millis(SPINNER_TICK_MS));
            }
            Progress::PhaseFinish => {
                self.bar.disable_steady_tick();
                self.bar.finish_with_message("✓ Done");
            }
            Progress::TaskStart { total_steps } => {
                self.tally = AttemptTally {
                    launched: total_steps,
                    ..AttemptTally::default()
                };
                self.bar.disable_steady_tick();
                self.bar.reset();
                self.bar.set_length(total_steps);
                self.bar.set_style(attempts_style());
                self.bar.set_message(self.tally.summary());
            }
            Progress::TaskIncrement => {
                self.tally.finished += 1;
                self.bar.inc(1);
                self.bar.set_message(self.tally.summary());
            }
            Progress::AttemptFailed { attempt, reason } => {
                self.tally.failed += 1;
                self.bar
                    .println(format!("  ✗ attempt {} failed: {}", attempt + 1, reason));
            }
            Progress::SearchTimedOut { abandoned } => {
                self.tally.abandoned = abandoned as u64;
                self.bar.println(format!(
                    "  ⏱ deadline reached, {} attempts still running were dropped",
                    abandoned
                ));
            }
            Progress::TaskFinish => {
                // Abandoned attempts never advance the bar.
                self.bar.finish_with_message(self.tally.summary());
            }
            Progress::Message(text) => {
                self.bar.println(format!("  {text}"));
            }
        }
    }
}

fn spinner_style() -> ProgressStyle {
    ProgressStyle::with_template("{spinner:.green} {msg}")
        .unwrap_or_else(|_| ProgressStyle::default_spinner())
}

fn attempts_style() -> ProgressStyle {
    ProgressStyle::with_template("Team search [{bar:30.cyan/blue}] {msg} ({elapsed})")
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("=> ")
}

/// Renders formation progress on stderr: a spinner per workflow phase and an attempt bar
/// whose message tracks usable, failed and abandoned attempts.
#[derive(Clone)]
pub struct CliProgressHandler {
    display: Arc<Mutex<SearchDisplay>>,
}

impl CliProgressHandler {
    pub fn new() -> Self {
        let bar = ProgressBar::with_draw_target(Some(0), ProgressDrawTarget::stderr());
        bar.finish_and_clear();
        Self {
            display: Arc::new(Mutex::new(SearchDisplay {
                bar,
                tally: AttemptTally::default(),
            })),
        }
    }

    pub fn reporter(&self) -> ProgressReporter {
        let display = Arc::clone(&self.display);
        ProgressReporter::with_callback(move |event| match display.lock() {
            Ok(mut display) => display.apply(event),
            Err(_) => warn!("Progress display lock was poisoned; dropping progress event."),
        })
    }
}

impl Default for CliProgressHandler {
    fn default() -> Self {
        Self::new()
    }
}
