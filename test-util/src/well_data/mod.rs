mod csv_parser;
pub(crate) mod parameters;
mod record;
mod types;
pub(crate) mod wells;

pub use types::{PhaseArrays, WellProduction};
pub(super) use types::Error;

use include_dir::{Dir, include_dir};

const WELLS_DIR: Dir = include_dir!("$CARGO_MANIFEST_DIR/../test-data/wells");
