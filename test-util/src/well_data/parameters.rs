use crate::well_data::WELLS_DIR;
use crate::well_data::csv_parser::records_from_reader;

use lazy_static::lazy_static;
use serde::Deserialize;

/// Decline parameters the fixture rates were generated from, before noise
#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct WellParameters {
    pub well: String,
    pub phase: String,
    pub qi: f64,
    pub b: f64,
    pub d: f64,
}

lazy_static! {
    pub static ref WELL_PARAMETERS_F64: Vec<WellParameters> = {
        let file = WELLS_DIR.get_file("parameters.csv").unwrap();
        records_from_reader(file.contents()).unwrap()
    };
}

pub fn well_parameters(well: &str, phase: &str) -> Option<&'static WellParameters> {
    WELL_PARAMETERS_F64
        .iter()
        .find(|p| p.well == well && p.phase == phase)
}
