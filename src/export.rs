//! Tabular export of [AnalysisOutput]

use crate::analysis::AnalysisOutput;
use crate::data::Phase;
use crate::error::ExportError;
use crate::float_trait::Float;
use crate::forecast::Eur;

use serde::{Deserialize, Serialize};
use std::io::Write;

const HEADER: [&str; 6] = ["phase", "qi", "b", "d", "eur", "rolling_average"];

/// Formatted summary of a single phase
///
/// `qi` has two decimals, `b` three, `d` five, `eur` is rounded to an integer or is "N/A", and
/// `rolling_average` has two decimals.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SummaryRow {
    pub phase: Phase,
    pub qi: String,
    pub b: String,
    pub d: String,
    pub eur: String,
    pub rolling_average: String,
}

/// One row per phase, in phase order
pub fn summary_rows<T>(output: &AnalysisOutput<T>) -> Vec<SummaryRow>
where
    T: Float,
{
    output
        .phase_params
        .iter()
        .map(|(&phase, params)| SummaryRow {
            phase,
            qi: format!("{:.2}", params.qi),
            b: format!("{:.3}", params.b),
            d: format!("{:.5}", params.d),
            eur: output
                .calculated_eur
                .get(&phase)
                .copied()
                .unwrap_or(Eur::NotApplicable)
                .to_string(),
            rolling_average: format!(
                "{:.2}",
                output
                    .forecast_average
                    .get(&phase)
                    .copied()
                    .unwrap_or_else(T::zero)
            ),
        })
        .collect()
}

/// Write the summary as CSV with a header row
pub fn write_summary_csv<W, T>(writer: W, output: &AnalysisOutput<T>) -> Result<(), ExportError>
where
    W: Write,
    T: Float,
{
    let mut csv_writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(writer);
    csv_writer.write_record(HEADER)?;
    for row in summary_rows(output) {
        csv_writer.serialize(row)?;
    }
    csv_writer.flush()?;
    Ok(())
}

/// [write_summary_csv] into a string
pub fn summary_csv_string<T>(output: &AnalysisOutput<T>) -> Result<String, ExportError>
where
    T: Float,
{
    let mut buffer = vec![];
    write_summary_csv(&mut buffer, output)?;
    Ok(String::from_utf8(buffer)?)
}
