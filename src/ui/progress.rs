//! Terminal spinner reporter
//!
//! One live spinner line per operation phase, backed by indicatif. Phases
//! replace each other's text rather than stacking; `finish` clears the
//! line so successful runs leave the terminal clean.

use std::sync::Mutex;
use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};

use super::reporter::Reporter;

pub struct SpinnerReporter {
    bar: Mutex<Option<ProgressBar>>,
}

impl SpinnerReporter {
    pub fn new() -> Self {
        Self {
            bar: Mutex::new(None),
        }
    }

    fn spinner(msg: &str) -> ProgressBar {
        let pb = ProgressBar::new_spinner();
        pb.set_style(
            ProgressStyle::default_spinner()
                .template("{spinner:.green} {msg}")
                .unwrap(),
        );
        pb.enable_steady_tick(Duration::from_millis(80));
        pb.set_message(msg.to_string());
        pb
    }
}

impl Default for SpinnerReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl Reporter for SpinnerReporter {
    fn begin(&self, msg: &str) {
        if let Ok(mut bar) = self.bar.lock() {
            if let Some(old) = bar.take() {
                old.finish_and_clear();
            }
            *bar = Some(Self::spinner(msg));
        }
    }

    fn update(&self, msg: &str) {
        if let Ok(mut bar) = self.bar.lock() {
            match bar.as_ref() {
                Some(pb) => pb.set_message(msg.to_string()),
                None => *bar = Some(Self::spinner(msg)),
            }
        }
    }

    fn finish(&self) {
        if let Ok(mut bar) = self.bar.lock() {
            if let Some(pb) = bar.take() {
                pb.finish_and_clear();
            }
        }
    }

    fn warning(&self, msg: &str) {
        if let Ok(bar) = self.bar.lock() {
            if let Some(pb) = bar.as_ref() {
                pb.println(format!("warning: {msg}"));
                return;
            }
        }
        eprintln!("warning: {msg}");
    }
}

impl Drop for SpinnerReporter {
    fn drop(&mut self) {
        if let Ok(mut bar) = self.bar.lock() {
            if let Some(pb) = bar.take() {
                pb.finish_and_clear();
            }
        }
    }
}
