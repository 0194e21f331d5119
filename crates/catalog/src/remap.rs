//! Mapping simulation-year hourly files onto reference-year inventory files.
//!
//! Each hour of the target range is mapped back to the reference year with
//! [`shift_back_to_reference_year`], so weekday patterns in the inventory
//! line up with the simulated calendar.

use std::path::{Path, PathBuf};

use chemgrid_calendar::{ShiftRecord, hourly_sequence, shift_back_to_reference_year};
use chrono::NaiveDateTime;
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::error::CatalogError;
use crate::sequence::FileSequence;

/// How target files are created from their sources.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LinkMode {
    /// Symbolic link pointing at the source.
    #[default]
    Symlink,
    /// Full copy of the source.
    Copy,
}

/// Inputs for building a remap plan.
#[derive(Debug, Clone)]
pub struct RemapConfig {
    /// Where the reference-year files live and how they are named.
    source: FileSequence,
    /// Where the target-year files go and how they are named.
    target: FileSequence,
    /// Year of the inventory being reused.
    reference_year: i32,
}

impl RemapConfig {
    /// Creates a config mapping `target` hours onto `source` files.
    pub fn new(source: FileSequence, target: FileSequence, reference_year: i32) -> Self {
        Self {
            source,
            target,
            reference_year,
        }
    }

    /// Source sequence.
    pub fn source(&self) -> &FileSequence {
        &self.source
    }

    /// Target sequence.
    pub fn target(&self) -> &FileSequence {
        &self.target
    }

    /// Reference year.
    pub fn reference_year(&self) -> i32 {
        self.reference_year
    }

    /// Validates both sequences.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::EmptyPrefix`] if either prefix is empty.
    pub fn validate(&self) -> Result<(), CatalogError> {
        self.source.validate()?;
        self.target.validate()
    }
}

/// One target file and the reference file it reuses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RemapEntry {
    /// Path of the target-year file.
    pub target: PathBuf,
    /// Path of the reference-year file.
    pub source: PathBuf,
    /// Whether the source was present when the plan was built.
    pub source_exists: bool,
    /// The underlying timestamp mapping.
    pub record: ShiftRecord,
}

/// Ordered list of target/source pairs.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RemapPlan {
    entries: Vec<RemapEntry>,
}

impl RemapPlan {
    /// All entries in target time order.
    pub fn entries(&self) -> &[RemapEntry] {
        &self.entries
    }

    /// Entries whose source file is absent.
    pub fn missing_sources(&self) -> impl Iterator<Item = &RemapEntry> {
        self.entries.iter().filter(|e| !e.source_exists)
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the plan is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Outcome of [`materialize`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct MaterializeReport {
    /// Target files created.
    pub created: Vec<PathBuf>,
    /// Targets skipped because their source was missing.
    pub missing_source: Vec<PathBuf>,
    /// Targets skipped because they already existed.
    pub already_present: Vec<PathBuf>,
}

/// Build the plan for every hour from `start` to `end` inclusive.
///
/// # Errors
///
/// Returns [`CatalogError::EmptyPrefix`] for a misconfigured sequence and
/// [`CatalogError::Calendar`] if a shift leaves the supported range.
pub fn plan_remap(
    config: &RemapConfig,
    start: NaiveDateTime,
    end: NaiveDateTime,
) -> Result<RemapPlan, CatalogError> {
    config.validate()?;

    let entries = hourly_sequence(start, end)
        .into_iter()
        .map(|hour| {
            let record = shift_back_to_reference_year(hour, config.reference_year)?;
            let source = config.source.path(record.shifted());
            let source_exists = source.is_file();
            Ok(RemapEntry {
                target: config.target.path(hour),
                source,
                source_exists,
                record,
            })
        })
        .collect::<Result<Vec<_>, CatalogError>>()?;

    let plan = RemapPlan { entries };
    let n_missing = plan.missing_sources().count();
    info!(
        n_entries = plan.len(),
        n_missing,
        reference_year = config.reference_year,
        "built remap plan"
    );
    Ok(plan)
}

fn fs_err(path: &Path) -> impl FnOnce(std::io::Error) -> CatalogError + '_ {
    move |source| CatalogError::Fs {
        path: path.to_path_buf(),
        source,
    }
}

#[cfg(unix)]
fn link(source: &Path, target: &Path) -> std::io::Result<()> {
    std::os::unix::fs::symlink(source, target)
}

#[cfg(windows)]
fn link(source: &Path, target: &Path) -> std::io::Result<()> {
    std::os::windows::fs::symlink_file(source, target)
}

/// Create every target file in `plan` from its source.
///
/// Entries whose source is missing are skipped and reported. Existing
/// targets are left alone unless `overwrite` is set.
///
/// # Errors
///
/// Returns [`CatalogError::Fs`] if a directory, link, or copy cannot be
/// created.
pub fn materialize(
    plan: &RemapPlan,
    mode: LinkMode,
    overwrite: bool,
) -> Result<MaterializeReport, CatalogError> {
    let mut report = MaterializeReport::default();

    for entry in &plan.entries {
        if !entry.source.is_file() {
            warn!(target = %entry.target.display(), source = %entry.source.display(), "source missing, skipping");
            report.missing_source.push(entry.target.clone());
            continue;
        }

        // symlink_metadata also sees dangling links.
        if entry.target.symlink_metadata().is_ok() {
            if !overwrite {
                report.already_present.push(entry.target.clone());
                continue;
            }
            std::fs::remove_file(&entry.target).map_err(fs_err(&entry.target))?;
        }

        if let Some(parent) = entry.target.parent() {
            std::fs::create_dir_all(parent).map_err(fs_err(parent))?;
        }

        match mode {
            LinkMode::Symlink => {
                // Relative link contents resolve against the link's own directory.
                let source = std::fs::canonicalize(&entry.source).map_err(fs_err(&entry.source))?;
                link(&source, &entry.target).map_err(fs_err(&entry.target))?;
            }
            LinkMode::Copy => {
                std::fs::copy(&entry.source, &entry.target).map_err(fs_err(&entry.target))?;
            }
        }
        debug!(target = %entry.target.display(), source = %entry.source.display(), "created");
        report.created.push(entry.target.clone());
    }

    info!(
        created = report.created.len(),
        missing_source = report.missing_source.len(),
        already_present = report.already_present.len(),
        "materialized remap plan"
    );
    Ok(report)
}
