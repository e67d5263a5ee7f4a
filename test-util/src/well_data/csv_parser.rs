use crate::well_data::record::WellRecord;
use crate::well_data::{Error, WellProduction};

use itertools::process_results;
use serde::de::DeserializeOwned;
use std::io::Read;

pub(super) fn production_from_reader<R>(reader: R) -> Result<WellProduction, Error>
where
    R: Read,
{
    let mut csv_reader = csv::ReaderBuilder::new().from_reader(reader);
    let production = process_results(csv_reader.deserialize::<WellRecord>(), |records| {
        let mut production = WellProduction::default();
        records.for_each(|record| production.push(record));
        production
    })?;
    Ok(production)
}

pub(super) fn records_from_reader<R, Rec>(reader: R) -> Result<Vec<Rec>, Error>
where
    R: Read,
    Rec: DeserializeOwned,
{
    let mut csv_reader = csv::ReaderBuilder::new().from_reader(reader);
    Ok(csv_reader.deserialize().collect::<Result<_, _>>()?)
}
