use serde::Deserialize;

/// Row of a well CSV file, empty cells are missing observations
#[derive(Deserialize)]
pub(super) struct WellRecord {
    pub day: f64,
    pub oil: Option<f64>,
    pub water: Option<f64>,
    pub gas: Option<f64>,
}
