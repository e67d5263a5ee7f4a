use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

/// Produced fluid or measured quantity a series belongs to
///
/// Phases never share decline parameters, every phase is fitted and adjusted on its own.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, JsonSchema,
)]
#[serde(rename_all = "lowercase")]
pub enum Phase {
    Oil,
    Water,
    Gas,
    Pressure,
}

impl Phase {
    pub const ALL: [Phase; 4] = [Phase::Oil, Phase::Water, Phase::Gas, Phase::Pressure];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Oil => "oil",
            Self::Water => "water",
            Self::Gas => "gas",
            Self::Pressure => "pressure",
        }
    }
}

impl Display for Phase {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str((*self).as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_matches_serde_name() {
        for phase in Phase::ALL {
            let json = serde_json::to_string(&phase).unwrap();
            assert_eq!(json, format!("\"{phase}\""));
        }
    }

    #[test]
    fn phases_are_ordered() {
        let mut phases = vec![Phase::Pressure, Phase::Oil, Phase::Gas, Phase::Water];
        phases.sort();
        assert_eq!(phases, Phase::ALL);
    }
}
