//! # chemgrid-io
//!
//! NetCDF access for CAM-chem preprocessing. Reads spectral-element output
//! and region masks defined on the model's column dimension, edits column
//! variables in copies of emissions files, and writes regular lat/lon
//! datasets. Bridges the files into plain `Vec<f64>` / `&[f64]` data.

mod column_edit;
mod error;
mod gridded;
mod mask;
mod netcdf_read;
mod unstructured;

pub use column_edit::{AttrValue, ColumnEditor, ColumnVariable};
pub use error::IoError;
pub use gridded::{GriddedDataset, GriddedField, write_gridded};
pub use mask::{RegionMask, read_region_mask};
pub use unstructured::{TimeAxis, UnstructuredDataset, VariableInfo};
