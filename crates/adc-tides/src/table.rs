//! Fixed astronomical constituent constants.
//!
//! Orbital frequencies follow the standard harmonic constituent list
//! (see <https://en.wikipedia.org/wiki/Theory_of_tides>). Equilibrium tidal
//! potential data is only known for the eight principal constituents.

use adc_core::units::{AngularFreq, Time, degrees_per_hour, hours, rad_per_s, s};

use crate::TidalSpecies;

pub const ORBITAL_FREQUENCY_UNITS: &str = "rad/sec";

/// Equilibrium tidal potential parameters of a principal constituent.
///
/// Amplitude and reduction factor only ever exist together.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TidalPotential {
    /// Tidal potential amplitude (meters)
    pub amplitude: f64,
    /// Earth tidal potential reduction factor (dimensionless)
    pub reduction_factor: f64,
}

/// One named tidal constituent.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConstituentRecord {
    pub name: &'static str,
    /// Orbital frequency (rad/s)
    pub orbital_frequency: f64,
    pub doodson_coefficient: u8,
    pub tidal_potential: Option<TidalPotential>,
}

impl ConstituentRecord {
    pub fn frequency(&self) -> AngularFreq {
        rad_per_s(self.orbital_frequency)
    }

    /// Constituent speed (degrees per hour).
    pub fn speed(&self) -> f64 {
        degrees_per_hour(self.frequency())
    }

    pub fn period(&self) -> Time {
        s(std::f64::consts::TAU / self.orbital_frequency)
    }

    pub fn period_hours(&self) -> f64 {
        hours(self.period())
    }

    pub fn species(&self) -> Option<TidalSpecies> {
        TidalSpecies::from_coefficient(self.doodson_coefficient)
    }

    pub fn has_tidal_potential(&self) -> bool {
        self.tidal_potential.is_some()
    }
}

const fn constituent(name: &'static str, orbital_frequency: f64, doodson: u8) -> ConstituentRecord {
    ConstituentRecord {
        name,
        orbital_frequency,
        doodson_coefficient: doodson,
        tidal_potential: None,
    }
}

const fn principal(
    name: &'static str,
    orbital_frequency: f64,
    doodson: u8,
    amplitude: f64,
    reduction_factor: f64,
) -> ConstituentRecord {
    ConstituentRecord {
        name,
        orbital_frequency,
        doodson_coefficient: doodson,
        tidal_potential: Some(TidalPotential {
            amplitude,
            reduction_factor,
        }),
    }
}

/// Constituents with equilibrium tidal potential data.
pub const PRINCIPAL_CONSTITUENTS: [&str; 8] = ["M2", "S2", "N2", "K2", "K1", "O1", "P1", "Q1"];

// Potential amplitudes are kept exactly as published with the frequency table.
// The semidiurnal amplitudes duplicate their orbital frequencies; see
// `audit_tidal_potentials`.
pub(crate) const CONSTITUENT_TABLE: [ConstituentRecord; 37] = [
    constituent("M4", 0.0002810378050173, 4),
    constituent("M6", 0.0004215567080107, 6),
    constituent("MK3", 0.0002134400613513, 3),
    constituent("S4", 0.0002908882086657, 4),
    constituent("MN4", 0.0002783986019952, 4),
    constituent("S6", 0.0004363323129986, 6),
    constituent("M3", 0.0002107783537630, 3),
    constituent("2MK3", 0.0002081166466594, 3),
    constituent("M8", 0.0005620756090649, 8),
    constituent("MS4", 0.0002859630068415, 4),
    principal("M2", 0.0001405189025086, 2, 0.0001405189027, 0.693),
    principal("S2", 0.0001454441043329, 2, 0.0001454441043, 0.693),
    principal("N2", 0.0001378796994865, 2, 0.0001378797074, 0.693),
    constituent("Nu2", 0.0001382329037065, 2),
    constituent("MU2", 0.0001355937006844, 2),
    constituent("2N2", 0.0001352404964644, 2),
    constituent("lambda2", 0.0001428049013108, 2),
    constituent("T2", 0.0001452450073529, 2),
    constituent("R2", 0.0001456432013128, 2),
    constituent("2SM2", 0.0001503693061571, 2),
    constituent("L2", 0.0001431581055307, 2),
    principal("K2", 0.0001458423172006, 2, 0.0001458423017, 0.693),
    principal("K1", 0.0000729211583579, 1, 0.141565, 0.736),
    principal("O1", 0.0000675977441508, 1, 0.100514, 0.695),
    constituent("OO1", 0.0000782445730498, 1),
    constituent("S1", 0.0000727220521664, 1),
    constituent("M1", 0.0000702594512543, 1),
    constituent("J1", 0.0000755603613800, 1),
    constituent("RHO", 0.0000653117453487, 1),
    principal("Q1", 0.0000649585411287, 1, 0.19256, 0.695),
    constituent("2Q1", 0.0000623193381066, 1),
    principal("P1", 0.0000725229459750, 1, 0.0468, 0.706),
    constituent("Mm", 0.0000026392030221, 0),
    constituent("Ssa", 0.0000003982128677, 0),
    constituent("Sa", 0.0000001991061914, 0),
    constituent("Msf", 0.0000049252018242, 0),
    constituent("Mf", 0.0000053234146919, 0),
];
