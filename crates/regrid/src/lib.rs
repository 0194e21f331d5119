//! # chemgrid-regrid
//!
//! Interpolates CAM-chem spectral-element output (one value per model
//! column) onto regular latitude/longitude grids, the scattered-data
//! equivalent of linear `griddata`.
//!
//! ```mermaid
//! flowchart LR
//!     A[history file] -->|lat, lon| B[ScatteredLinear]
//!     A -->|var at time t, lev| C[column values]
//!     B --> D[interpolate]
//!     C --> D
//!     E[LatLonGrid] --> D
//!     D --> F[GriddedDataset]
//!     F --> G[write_gridded]
//! ```
//!
//! | Module | Contents |
//! |--------|----------|
//! | `grid` | [`LatLonGrid`], [`GridPreset`] |
//! | `interp` | [`ScatteredLinear`] |
//! | `regrid` | [`RegridConfig`], [`regrid_dataset`], [`regrid_file`] |

mod error;
mod grid;
mod interp;
mod regrid;

pub use error::RegridError;
pub use grid::{GridPreset, LatLonGrid};
pub use interp::ScatteredLinear;
pub use regrid::{
    DEFAULT_DESCRIPTION, DEFAULT_LEVEL_INDEX, RegridConfig, regrid_dataset, regrid_file,
};
