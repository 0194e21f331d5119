//! Species discovery from filenames.

use std::path::Path;

use regex::Regex;
use tracing::debug;

use crate::config::SPECIES_PLACEHOLDER;
use crate::error::EmissionsError;

/// Build an anchored regex that captures the species from names matching
/// `template`.
///
/// # Errors
///
/// Returns [`EmissionsError::InvalidConfig`] if the template has no
/// `{species}` placeholder.
pub fn species_pattern(template: &str) -> Result<Regex, EmissionsError> {
    let (head, tail) =
        template
            .split_once(SPECIES_PLACEHOLDER)
            .ok_or_else(|| EmissionsError::InvalidConfig {
                reason: format!("file template '{template}' has no {SPECIES_PLACEHOLDER}"),
            })?;
    let pattern = format!(
        "^{}(?P<species>.+?){}$",
        regex::escape(head),
        regex::escape(tail)
    );
    Regex::new(&pattern).map_err(|e| EmissionsError::InvalidConfig {
        reason: e.to_string(),
    })
}

/// Species whose files in `dir` match `template`, sorted.
///
/// # Errors
///
/// Returns [`EmissionsError::ReadDir`] if `dir` cannot be listed.
pub fn discover_species(dir: &Path, template: &str) -> Result<Vec<String>, EmissionsError> {
    let re = species_pattern(template)?;
    let read_err = |source| EmissionsError::ReadDir {
        path: dir.to_path_buf(),
        source,
    };

    let mut species = Vec::new();
    for entry in std::fs::read_dir(dir).map_err(read_err)? {
        let entry = entry.map_err(read_err)?;
        if !entry.path().is_file() {
            continue;
        }
        let name = entry.file_name();
        if let Some(caps) = name.to_str().and_then(|n| re.captures(n)) {
            species.push(caps["species"].to_string());
        }
    }
    species.sort();
    debug!(dir = %dir.display(), n_species = species.len(), "discovered species");
    Ok(species)
}
