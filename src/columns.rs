//! Header heuristic picking the date and per-phase rate columns of a production table

use crate::data::Phase;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

const PHASE_TOKENS: [(Phase, &[&str]); 4] = [
    (Phase::Oil, &["bopd", "oil"]),
    (Phase::Water, &["bwpd", "water"]),
    (Phase::Gas, &["mcfd", "gas"]),
    (Phase::Pressure, &["pip", "pressure", "psi"]),
];

/// Columns chosen for the date and every recognized phase
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct ColumnMapping {
    pub date: Option<String>,
    pub phases: BTreeMap<Phase, String>,
}

impl ColumnMapping {
    pub fn phase(&self, phase: Phase) -> Option<&str> {
        self.phases.get(&phase).map(String::as_str)
    }
}

/// Classify table headers by case-insensitive substring match
///
/// The date column is a header containing both "prod" and "date", otherwise one containing
/// "datetime", otherwise one containing "date". Then phases are matched in the order oil
/// ("bopd", "oil"), water ("bwpd", "water"), gas ("mcfd", "gas") and pressure ("pip",
/// "pressure", "psi"), earlier tokens first. Every header is assigned at most once and every
/// phase gets at most one header.
pub fn classify_columns<S>(headers: &[S]) -> ColumnMapping
where
    S: AsRef<str>,
{
    let lower: Vec<String> = headers
        .iter()
        .map(|h| h.as_ref().trim().to_lowercase())
        .collect();
    let find = |used: &[usize], predicate: &dyn Fn(&str) -> bool| {
        lower
            .iter()
            .enumerate()
            .find(|(i, h)| !used.contains(i) && predicate(h.as_str()))
            .map(|(i, _)| i)
    };

    let mut used: Vec<usize> = vec![];
    let date = find(&used, &|h: &str| h.contains("prod") && h.contains("date"))
        .or_else(|| find(&used, &|h: &str| h.contains("datetime")))
        .or_else(|| find(&used, &|h: &str| h.contains("date")));
    used.extend(date);

    let mut phases = BTreeMap::new();
    for (phase, tokens) in PHASE_TOKENS {
        let index = tokens
            .iter()
            .find_map(|&token| find(&used, &|h: &str| h.contains(token)));
        if let Some(index) = index {
            used.push(index);
            phases.insert(phase, headers[index].as_ref().to_owned());
        }
    }

    let mapping = ColumnMapping {
        date: date.map(|i| headers[i].as_ref().to_owned()),
        phases,
    };
    tracing::debug!(?mapping, "columns classified");
    mapping
}
