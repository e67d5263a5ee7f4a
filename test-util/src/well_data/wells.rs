use crate::well_data::csv_parser::production_from_reader;
use crate::well_data::{Error, WELLS_DIR, WellProduction};

use itertools::Itertools;
use lazy_static::lazy_static;
use std::path::Path;

fn try_well_production(name: &str) -> Result<WellProduction, Error> {
    let filename = format!("{}.csv", name);
    let file = WELLS_DIR
        .get_file(&filename)
        .ok_or_else(|| Error::NotFound(filename.clone()))?;
    production_from_reader(file.contents())
}

/// Production of a fixture well by its name, e.g. `"well-a"`
pub fn well_production(name: &str) -> WellProduction {
    try_well_production(name).unwrap()
}

/// All fixture wells sorted by name
pub fn iter_wells() -> impl Iterator<Item = (String, WellProduction)> {
    WELLS_DIR
        .find("well-*.csv")
        .unwrap()
        .filter_map(|entry| {
            let path = entry.as_file()?.path();
            let name = Path::new(path).file_stem()?.to_str()?.to_owned();
            let production = try_well_production(&name).ok()?;
            Some((name, production))
        })
        .sorted_by(|a, b| a.0.cmp(&b.0))
}

lazy_static! {
    pub static ref WELLS_F64: Vec<(String, WellProduction)> = iter_wells().collect();
}
