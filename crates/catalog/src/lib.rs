//! # chemgrid-catalog
//!
//! Bookkeeping for directories of hourly emissions files.
//!
//! - [`find_missing`] lists the files an hourly range should contain and
//!   which of them are absent.
//! - [`plan_remap`] maps every hour of a simulation period onto the
//!   reference-year inventory file with the same weekday, and
//!   [`materialize`] links or copies those files into place.
//!
//! ```text
//! FileSequence + (start, end)
//!   ├─ find_missing()  -> MissingReport { expected, missing }
//!   └─ plan_remap()    -> RemapPlan -> materialize() -> MaterializeReport
//! ```

mod error;
mod missing;
mod remap;
mod sequence;

pub use error::CatalogError;
pub use missing::{MissingReport, find_missing};
pub use remap::{
    LinkMode, MaterializeReport, RemapConfig, RemapEntry, RemapPlan, materialize, plan_remap,
};
pub use sequence::FileSequence;
