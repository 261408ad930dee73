//! End-of-run summary text.

use std::fmt;

use mdtoolkit_shared::OutcomeTally;

/// Printable summary of a finished run.
///
/// With at least one processed unit this renders the succeeded, failed and
/// total counts; otherwise a single "nothing to process" notice.
#[derive(Debug, Clone, Copy)]
pub struct Summary<'a> {
    tally: OutcomeTally,
    /// What one unit is called, e.g. "files" or "merged files".
    noun: &'a str,
}

impl<'a> Summary<'a> {
    pub fn new(tally: OutcomeTally, noun: &'a str) -> Self {
        Self { tally, noun }
    }

    pub fn is_empty(&self) -> bool {
        self.tally.total() == 0
    }
}

impl fmt::Display for Summary<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return write!(f, "Nothing to process.");
        }

        writeln!(f, "Results:")?;
        writeln!(f, "- Succeeded: {} {}", self.tally.succeeded, self.noun)?;
        writeln!(f, "- Failed:    {} {}", self.tally.failed, self.noun)?;
        write!(f, "- Total:     {} {}", self.tally.total(), self.noun)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn summary_lists_counts() {
        let tally = OutcomeTally {
            succeeded: 2,
            failed: 1,
        };
        let text = Summary::new(tally, "files").to_string();
        assert_eq!(
            text,
            "Results:\n- Succeeded: 2 files\n- Failed:    1 files\n- Total:     3 files"
        );
    }

    #[test]
    fn empty_run_has_distinct_notice() {
        let summary = Summary::new(OutcomeTally::default(), "files");
        assert!(summary.is_empty());
        assert!(summary.to_string().starts_with("Nothing to process"));
        assert!(!summary.to_string().contains("Total"));
    }
}
