//! Terminal progress reporting.

use std::path::Path;

use indicatif::{ProgressBar, ProgressStyle};

use mdtoolkit_core::pipeline::ProgressReporter;
use mdtoolkit_shared::{ConversionError, ConversionUnit, OutcomeTally};

/// CLI progress reporter using an indicatif bar.
///
/// Progress lines go to stdout and are dropped in quiet mode. Failures and
/// warnings always go to stderr.
pub(crate) struct CliProgress {
    bar: ProgressBar,
    quiet: bool,
}

impl CliProgress {
    pub(crate) fn new(quiet: bool) -> Self {
        let bar = if quiet {
            ProgressBar::hidden()
        } else {
            ProgressBar::new(0)
        };
        bar.set_style(
            ProgressStyle::with_template("{spinner:.cyan} [{pos}/{len}] {wide_msg}")
                .unwrap_or_else(|_| ProgressStyle::default_bar()),
        );
        Self { bar, quiet }
    }

    fn say(&self, line: String) {
        if !self.quiet {
            self.bar.suspend(|| println!("{line}"));
        }
    }

    fn alert(&self, line: String) {
        self.bar.suspend(|| eprintln!("{line}"));
    }
}

impl ProgressReporter for CliProgress {
    fn files_discovered(&self, root: &Path, count: usize) {
        if count == 0 {
            self.alert(format!(
                "warning: no matching files found in '{}'",
                root.display()
            ));
        } else {
            self.say(format!("Found {count} file(s) in '{}'", root.display()));
        }
    }

    fn units_planned(&self, total: usize) {
        self.bar.set_length(total as u64);
    }

    fn unit_started(&self, unit: &ConversionUnit, _position: usize, _total: usize) {
        match unit {
            ConversionUnit::Single(single) => {
                self.bar.set_message(single.source.display().to_string());
            }
            ConversionUnit::Group(merge) => {
                self.bar.set_message(merge.destination.display().to_string());
                self.say(format!(
                    "Group {}: merging {} file(s) into '{}'",
                    merge.group.index,
                    merge.group.len(),
                    merge.destination.display()
                ));
            }
        }
    }

    fn unit_succeeded(&self, unit: &ConversionUnit) {
        self.bar.inc(1);
        match unit {
            ConversionUnit::Single(single) => self.say(format!(
                "Converted: {} -> {}",
                single.source.display(),
                single.destination.display()
            )),
            ConversionUnit::Group(merge) => {
                self.say(format!("Created '{}'", merge.destination.display()));
            }
        }
    }

    fn unit_failed(&self, unit: &ConversionUnit, error: &ConversionError) {
        self.bar.inc(1);
        if error.is_unavailable() {
            self.alert(format!(
                "error: converter not available for {unit}: {error}. Is it installed and on PATH?"
            ));
        } else {
            self.alert(format!("failed: {unit}\n  error: {error}"));
        }
    }

    fn finished(&self, _tally: &OutcomeTally) {
        self.bar.finish_and_clear();
    }
}
