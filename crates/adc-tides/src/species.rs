//! Tidal species (harmonic order) derived from the Doodson coefficient.

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TidalSpecies {
    /// Periods of two weeks or longer (Mm, Mf, Sa, ...)
    LongPeriod,
    /// Roughly one cycle per day
    Diurnal,
    /// Roughly two cycles per day
    Semidiurnal,
    /// Shallow-water terdiurnal overtides
    Terdiurnal,
    QuarterDiurnal,
    SixthDiurnal,
    EighthDiurnal,
}

impl TidalSpecies {
    pub const ALL: [TidalSpecies; 7] = [
        TidalSpecies::LongPeriod,
        TidalSpecies::Diurnal,
        TidalSpecies::Semidiurnal,
        TidalSpecies::Terdiurnal,
        TidalSpecies::QuarterDiurnal,
        TidalSpecies::SixthDiurnal,
        TidalSpecies::EighthDiurnal,
    ];

    /// Map a Doodson coefficient onto its species.
    ///
    /// Returns `None` for coefficients with no constituent in the table (5, 7, >8).
    pub fn from_coefficient(coefficient: u8) -> Option<Self> {
        match coefficient {
            0 => Some(TidalSpecies::LongPeriod),
            1 => Some(TidalSpecies::Diurnal),
            2 => Some(TidalSpecies::Semidiurnal),
            3 => Some(TidalSpecies::Terdiurnal),
            4 => Some(TidalSpecies::QuarterDiurnal),
            6 => Some(TidalSpecies::SixthDiurnal),
            8 => Some(TidalSpecies::EighthDiurnal),
            _ => None,
        }
    }

    pub fn coefficient(&self) -> u8 {
        match self {
            TidalSpecies::LongPeriod => 0,
            TidalSpecies::Diurnal => 1,
            TidalSpecies::Semidiurnal => 2,
            TidalSpecies::Terdiurnal => 3,
            TidalSpecies::QuarterDiurnal => 4,
            TidalSpecies::SixthDiurnal => 6,
            TidalSpecies::EighthDiurnal => 8,
        }
    }

    pub fn key(&self) -> &'static str {
        match self {
            TidalSpecies::LongPeriod => "long-period",
            TidalSpecies::Diurnal => "diurnal",
            TidalSpecies::Semidiurnal => "semidiurnal",
            TidalSpecies::Terdiurnal => "terdiurnal",
            TidalSpecies::QuarterDiurnal => "quarter-diurnal",
            TidalSpecies::SixthDiurnal => "sixth-diurnal",
            TidalSpecies::EighthDiurnal => "eighth-diurnal",
        }
    }
}

impl fmt::Display for TidalSpecies {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl std::str::FromStr for TidalSpecies {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "long-period" | "longperiod" | "long" | "0" => Ok(TidalSpecies::LongPeriod),
            "diurnal" | "1" => Ok(TidalSpecies::Diurnal),
            "semidiurnal" | "semi-diurnal" | "2" => Ok(TidalSpecies::Semidiurnal),
            "terdiurnal" | "3" => Ok(TidalSpecies::Terdiurnal),
            "quarter-diurnal" | "quarterdiurnal" | "4" => Ok(TidalSpecies::QuarterDiurnal),
            "sixth-diurnal" | "sixthdiurnal" | "6" => Ok(TidalSpecies::SixthDiurnal),
            "eighth-diurnal" | "eighthdiurnal" | "8" => Ok(TidalSpecies::EighthDiurnal),
            _ => Err("unknown tidal species"),
        }
    }
}
