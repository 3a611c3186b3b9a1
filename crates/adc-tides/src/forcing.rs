//! Serializable tidal forcing specification.
//!
//! This is what the model-input writer receives: the selected constituents,
//! resolved to their constants, in selection order.

use serde::{Deserialize, Serialize};

use crate::table::ConstituentRecord;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConstituentForcing {
    pub name: String,
    pub orbital_frequency: f64,
    pub doodson_coefficient: u8,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tidal_potential_amplitude: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub earth_tidal_potential_reduction_factor: Option<f64>,
}

impl From<&ConstituentRecord> for ConstituentForcing {
    fn from(record: &ConstituentRecord) -> Self {
        Self {
            name: record.name.to_string(),
            orbital_frequency: record.orbital_frequency,
            doodson_coefficient: record.doodson_coefficient,
            tidal_potential_amplitude: record.tidal_potential.map(|p| p.amplitude),
            earth_tidal_potential_reduction_factor: record
                .tidal_potential
                .map(|p| p.reduction_factor),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct TidalForcingSpec {
    #[serde(default)]
    pub constituents: Vec<ConstituentForcing>,
}

impl TidalForcingSpec {
    pub fn from_records<'a, I>(records: I) -> Self
    where
        I: IntoIterator<Item = &'a ConstituentRecord>,
    {
        Self {
            constituents: records.into_iter().map(ConstituentForcing::from).collect(),
        }
    }

    /// Tidal forcing is active when at least one constituent is selected.
    pub fn is_active(&self) -> bool {
        !self.constituents.is_empty()
    }

    /// Constituents that also drive the tidal potential term.
    pub fn potential_constituents(&self) -> impl Iterator<Item = &ConstituentForcing> {
        self.constituents
            .iter()
            .filter(|c| c.tidal_potential_amplitude.is_some())
    }

    pub fn to_json_pretty(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    pub fn from_json(content: &str) -> serde_json::Result<Self> {
        serde_json::from_str(content)
    }
}
