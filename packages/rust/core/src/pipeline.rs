//! Shared execution loop: run planned units one at a time, isolate failures,
//! and report progress.

use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use mdtoolkit_shared::{ConversionError, ConversionUnit, OutcomeTally};

/// Progress callback for reporting pipeline status.
pub trait ProgressReporter {
    /// Called once discovery has finished, even when nothing was found.
    fn files_discovered(&self, root: &Path, count: usize);
    /// Called with the number of units about to run.
    fn units_planned(&self, total: usize);
    /// Called before a unit runs; `position` is 1-based.
    fn unit_started(&self, unit: &ConversionUnit, position: usize, total: usize);
    /// Called when a unit produced its output.
    fn unit_succeeded(&self, unit: &ConversionUnit);
    /// Called when a unit failed. The run continues with the next unit.
    fn unit_failed(&self, unit: &ConversionUnit, error: &ConversionError);
    /// Called after the last unit.
    fn finished(&self, tally: &OutcomeTally);
}

/// No-op progress reporter for headless/test usage.
pub struct SilentProgress;

impl ProgressReporter for SilentProgress {
    fn files_discovered(&self, _root: &Path, _count: usize) {}
    fn units_planned(&self, _total: usize) {}
    fn unit_started(&self, _unit: &ConversionUnit, _position: usize, _total: usize) {}
    fn unit_succeeded(&self, _unit: &ConversionUnit) {}
    fn unit_failed(&self, _unit: &ConversionUnit, _error: &ConversionError) {}
    fn finished(&self, _tally: &OutcomeTally) {}
}

/// Tally and produced outputs of one execution pass.
#[derive(Debug, Default)]
pub(crate) struct Execution {
    pub tally: OutcomeTally,
    pub produced: Vec<PathBuf>,
}

/// Run each unit in order. A failing unit is counted and reported, never fatal.
///
/// `run` receives the typed unit; progress events see it as a [`ConversionUnit`].
pub(crate) fn execute_units<U, F>(
    units: &[U],
    progress: &dyn ProgressReporter,
    mut run: F,
) -> Execution
where
    U: Clone + Into<ConversionUnit>,
    F: FnMut(&U) -> Result<(), ConversionError>,
{
    let mut execution = Execution::default();
    let total = units.len();
    progress.units_planned(total);

    for (i, planned) in units.iter().enumerate() {
        let unit: ConversionUnit = planned.clone().into();
        progress.unit_started(&unit, i + 1, total);

        match run(planned) {
            Ok(()) => {
                debug!(%unit, "unit complete");
                execution.tally.record_success();
                execution.produced.push(unit.destination().to_path_buf());
                progress.unit_succeeded(&unit);
            }
            Err(e) => {
                warn!(%unit, error = %e, "unit failed, continuing");
                execution.tally.record_failure();
                progress.unit_failed(&unit, &e);
            }
        }
    }

    progress.finished(&execution.tally);
    execution
}

#[cfg(test)]
pub(crate) mod testing {
    use std::cell::RefCell;

    use super::*;

    /// Records every progress event as a line of text.
    #[derive(Default)]
    pub struct RecordingProgress {
        pub events: RefCell<Vec<String>>,
    }

    impl RecordingProgress {
        pub fn events(&self) -> Vec<String> {
            self.events.borrow().clone()
        }

        fn push(&self, event: String) {
            self.events.borrow_mut().push(event);
        }
    }

    impl ProgressReporter for RecordingProgress {
        fn files_discovered(&self, _root: &Path, count: usize) {
            self.push(format!("discovered {count}"));
        }
        fn units_planned(&self, total: usize) {
            self.push(format!("planned {total}"));
        }
        fn unit_started(&self, _unit: &ConversionUnit, position: usize, total: usize) {
            self.push(format!("start {position}/{total}"));
        }
        fn unit_succeeded(&self, unit: &ConversionUnit) {
            self.push(format!("ok {}", unit.destination().display()));
        }
        fn unit_failed(&self, unit: &ConversionUnit, _error: &ConversionError) {
            self.push(format!("failed {}", unit.destination().display()));
        }
        fn finished(&self, tally: &OutcomeTally) {
            self.push(format!("finished {}/{}", tally.succeeded, tally.failed));
        }
    }
}
