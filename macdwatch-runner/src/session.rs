//! Run session: owns the result mappings and writes them exactly once.
//!
//! `finish()` writes every mapping and reports the files. If the session is
//! dropped without `finish()` (early `?` return, panic unwind) `Drop` writes
//! the same files and logs any error.

use chrono::NaiveDate;
use macdwatch_core::signal::Classification;
use std::path::PathBuf;

use crate::config::{OscillatorConfig, ScanConfig};
use crate::output::{self, OutputError};
use crate::results::ResultMapping;

/// A result file written at the end of a run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WrittenFile {
    /// Oscillator configuration name.
    pub configuration: String,
    pub path: PathBuf,
    pub entries: usize,
}

#[derive(Debug)]
struct SessionOutput {
    name: String,
    suffix: Option<String>,
    mapping: ResultMapping,
}

/// Result mappings for one run, one per oscillator configuration.
#[derive(Debug)]
pub struct RunSession {
    outputs: Vec<SessionOutput>,
    output_dir: PathBuf,
    archive: bool,
    date: NaiveDate,
    finished: bool,
}

impl RunSession {
    pub fn new(config: &ScanConfig, date: NaiveDate) -> Self {
        Self::with_outputs(
            &config.oscillators,
            config.output_dir.clone(),
            config.archive,
            date,
        )
    }

    pub fn with_outputs(
        oscillators: &[OscillatorConfig],
        output_dir: PathBuf,
        archive: bool,
        date: NaiveDate,
    ) -> Self {
        let outputs = oscillators
            .iter()
            .map(|o| SessionOutput {
                name: o.name.clone(),
                suffix: o.suffix.clone(),
                mapping: ResultMapping::new(),
            })
            .collect();
        Self {
            outputs,
            output_dir,
            archive,
            date,
            finished: false,
        }
    }

    /// Record a classification for the configuration at `index`. Out-of-range indices are ignored.
    pub fn record(&mut self, index: usize, ticker: &str, classification: Classification) {
        if let Some(out) = self.outputs.get_mut(index) {
            out.mapping.record(ticker, classification);
        }
    }

    pub fn mapping(&self, index: usize) -> Option<&ResultMapping> {
        self.outputs.get(index).map(|o| &o.mapping)
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    /// Write all result files. Every mapping is attempted; the first error is returned.
    pub fn finish(mut self) -> Result<Vec<WrittenFile>, OutputError> {
        self.finished = true;
        self.flush()
    }

    fn flush(&self) -> Result<Vec<WrittenFile>, OutputError> {
        let mut written = Vec::with_capacity(self.outputs.len());
        let mut first_err = None;

        for out in &self.outputs {
            match self.write_one(out) {
                Ok(path) => {
                    tracing::info!(
                        configuration = %out.name,
                        path = %path.display(),
                        entries = out.mapping.len(),
                        "results written"
                    );
                    written.push(WrittenFile {
                        configuration: out.name.clone(),
                        path,
                        entries: out.mapping.len(),
                    });
                }
                Err(e) => {
                    tracing::error!(configuration = %out.name, error = %e, "failed to write results");
                    if first_err.is_none() {
                        first_err = Some(e);
                    }
                }
            }
        }

        match first_err {
            Some(e) => Err(e),
            None => Ok(written),
        }
    }

    fn write_one(&self, out: &SessionOutput) -> Result<PathBuf, OutputError> {
        let path = output::write_mapping(
            &self.output_dir,
            out.suffix.as_deref(),
            self.date,
            &out.mapping,
        )?;
        if self.archive {
            output::archive(&path)
        } else {
            Ok(path)
        }
    }
}

impl Drop for RunSession {
    fn drop(&mut self) {
        if self.finished {
            return;
        }
        self.finished = true;
        tracing::warn!("run session dropped before finish, writing partial results");
        if let Err(e) = self.flush() {
            tracing::error!(error = %e, "partial results could not be written");
        }
    }
}
