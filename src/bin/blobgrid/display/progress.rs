use std::io::{self, Write};
use std::time::{Duration, Instant};

use indicatif::{ProgressBar, ProgressStyle};

/// Numbered spinner on stderr, one line per finished stage.
pub struct StageSpinner {
    bar: Option<ProgressBar>,
    start: Instant,
    stage: u8,
    total_stages: u8,
    stage_start: Instant,
}

impl StageSpinner {
    pub fn new(total_stages: u8) -> Self {
        let now = Instant::now();
        Self {
            bar: None,
            start: now,
            stage: 0,
            total_stages,
            stage_start: now,
        }
    }

    fn clear(&mut self) {
        if let Some(bar) = self.bar.take() {
            bar.finish_and_clear();
        }
    }

    pub fn begin(&mut self, description: &str) {
        self.clear();
        self.stage += 1;
        self.stage_start = Instant::now();

        let bar = ProgressBar::new_spinner();
        bar.set_style(
            ProgressStyle::default_spinner()
                .template("  {spinner:.cyan} {msg} {elapsed:.dim}")
                .expect("invalid template")
                .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏"),
        );
        bar.enable_steady_tick(Duration::from_millis(80));
        bar.set_message(format!(
            "[{}/{}] {description}...",
            self.stage, self.total_stages
        ));
        self.bar = Some(bar);
    }

    pub fn done(&mut self, description: &str, details: &[String]) {
        self.clear();

        let mut stderr = io::stderr().lock();
        let _ = writeln!(
            stderr,
            "  \x1b[32m✓\x1b[0m {:<44} {:>6.2}s",
            description,
            self.stage_start.elapsed().as_secs_f64()
        );
        for detail in details {
            let _ = writeln!(stderr, "      \x1b[2m·\x1b[0m {detail}");
        }
    }

    pub fn finish(mut self, label: &str) {
        self.clear();

        let mut stderr = io::stderr().lock();
        let _ = writeln!(stderr);
        let _ = writeln!(
            stderr,
            "  \x1b[32m✓\x1b[0m {label} {:>width$}",
            format!("Total: {:.2}s", self.start.elapsed().as_secs_f64()),
            width = 50usize.saturating_sub(label.len())
        );
        let _ = writeln!(stderr);
    }
}

/// Stage reporting for interactive and scripted runs alike.
pub enum Progress {
    Interactive(StageSpinner),
    Silent,
}

impl Progress {
    pub fn new(interactive: bool, total_stages: u8) -> Self {
        if interactive {
            Self::Interactive(StageSpinner::new(total_stages))
        } else {
            Self::Silent
        }
    }

    pub fn begin(&mut self, description: &str) {
        if let Self::Interactive(s) = self {
            s.begin(description);
        }
    }

    pub fn done(&mut self, description: &str, details: &[String]) {
        if let Self::Interactive(s) = self {
            s.done(description, details);
        }
    }

    pub fn finish(self, label: &str) {
        if let Self::Interactive(s) = self {
            s.finish(label);
        }
    }
}
