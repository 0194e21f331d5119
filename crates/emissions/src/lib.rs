//! # chemgrid-emissions
//!
//! Regional scaling of emissions files on unstructured CAM-chem grids.
//! A region mask selects model columns; every emitted variable on those
//! columns is multiplied by a factor and written to a copy of the file,
//! tagged with attributes recording the mask and factor.
//!
//! ```text
//! ScaleConfig ─ validate()
//!   ├─ read_region_mask(mask_file, mask_name)
//!   ├─ discover_species(input_dir, template)   (SpeciesSelection::All)
//!   └─ per species: scale_file(src, dst) ──> ScaleReport { scaled, failed }
//! ```

mod config;
mod discover;
mod error;
mod scale;

pub use config::{
    DEFAULT_COLUMN_DIM, DEFAULT_FILE_TEMPLATE, DEFAULT_GRID_TAG, DEFAULT_SKIP_VARS,
    SPECIES_PLACEHOLDER, ScaleConfig, SpeciesSelection,
};
pub use discover::{discover_species, species_pattern};
pub use error::EmissionsError;
pub use scale::{FailedSpecies, ScaleReport, ScaledFile, scale_emissions, scale_file, scale_in_mask};
