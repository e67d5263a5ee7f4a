use crate::well_data::record::WellRecord;

// We cannot return `TimeSeries`, because it would cause cyclic crate dependencies
pub type PhaseArrays = (Vec<f64>, Vec<f64>);

/// Daily rates of a single well, missing observations are skipped per phase
#[derive(Clone, Debug, Default, PartialEq)]
pub struct WellProduction {
    pub oil: PhaseArrays,
    pub water: PhaseArrays,
    pub gas: PhaseArrays,
}

impl WellProduction {
    pub fn phase(&self, name: &str) -> Option<&PhaseArrays> {
        match name {
            "oil" => Some(&self.oil),
            "water" => Some(&self.water),
            "gas" => Some(&self.gas),
            _ => None,
        }
    }

    pub fn phases(&self) -> impl Iterator<Item = (&'static str, &PhaseArrays)> {
        [("oil", &self.oil), ("water", &self.water), ("gas", &self.gas)].into_iter()
    }

    pub(super) fn push(&mut self, record: WellRecord) {
        let WellRecord {
            day,
            oil,
            water,
            gas,
        } = record;
        for (arrays, value) in [
            (&mut self.oil, oil),
            (&mut self.water, water),
            (&mut self.gas, gas),
        ] {
            if let Some(value) = value {
                arrays.0.push(day);
                arrays.1.push(value);
            }
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub(crate) enum Error {
    #[error(transparent)]
    CsvError(#[from] csv::Error),
    #[error("file {0} is not found")]
    NotFound(String),
}
