//! Subprocess-backed converter.

use std::path::Path;
use std::process::{Command, Stdio};

use tracing::{debug, instrument};

use mdtoolkit_shared::ConversionError;

use crate::Converter;

/// Runs `<program> <source> <output_flag> <destination>` and waits for it.
///
/// There is no timeout: a converter that hangs blocks the caller.
#[derive(Debug, Clone)]
pub struct ExternalConverter {
    program: String,
    output_flag: String,
}

impl ExternalConverter {
    pub fn new(program: impl Into<String>, output_flag: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            output_flag: output_flag.into(),
        }
    }

    pub fn program(&self) -> &str {
        &self.program
    }
}

impl Default for ExternalConverter {
    fn default() -> Self {
        Self::new("markitdown", "-o")
    }
}

impl Converter for ExternalConverter {
    fn name(&self) -> &str {
        &self.program
    }

    #[instrument(skip(self), fields(program = %self.program))]
    fn convert(&self, source: &Path, destination: &Path) -> Result<(), ConversionError> {
        let output = Command::new(&self.program)
            .arg(source)
            .arg(&self.output_flag)
            .arg(destination)
            .stdin(Stdio::null())
            .output()
            .map_err(|e| ConversionError::Unavailable {
                program: self.program.clone(),
                source: e,
            })?;

        if output.status.success() {
            debug!("converter exited successfully");
            return Ok(());
        }

        Err(ConversionError::Failed {
            program: self.program.clone(),
            code: output.status.code(),
            stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
        })
    }
}
