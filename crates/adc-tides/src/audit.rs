//! Consistency checks over the tidal potential table.
//!
//! Suspicious entries are reported, never corrected.

use std::fmt;

use adc_core::{Tolerances, ensure_in_range, nearly_equal};
use tracing::warn;

use crate::registry::ConstituentRegistry;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PotentialIssue {
    /// Amplitude equals the constituent's own orbital frequency.
    AmplitudeMatchesFrequency { amplitude: f64, frequency: f64 },
    /// Amplitude is not a finite positive length.
    NonPhysicalAmplitude { amplitude: f64 },
    /// Reduction factor outside (0, 1].
    ReductionFactorOutOfRange { reduction_factor: f64 },
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PotentialAuditFinding {
    pub name: &'static str,
    pub issue: PotentialIssue,
}

impl fmt::Display for PotentialAuditFinding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.issue {
            PotentialIssue::AmplitudeMatchesFrequency {
                amplitude,
                frequency,
            } => write!(
                f,
                "{}: potential amplitude {} m matches orbital frequency {} rad/s",
                self.name, amplitude, frequency
            ),
            PotentialIssue::NonPhysicalAmplitude { amplitude } => {
                write!(f, "{}: non-physical potential amplitude {}", self.name, amplitude)
            }
            PotentialIssue::ReductionFactorOutOfRange { reduction_factor } => write!(
                f,
                "{}: reduction factor {} outside (0, 1]",
                self.name, reduction_factor
            ),
        }
    }
}

pub fn audit_tidal_potentials(registry: &ConstituentRegistry) -> Vec<PotentialAuditFinding> {
    let tol = Tolerances {
        abs: 0.0,
        rel: 1e-6,
    };
    let mut findings = Vec::new();

    for record in registry.records() {
        let Some(potential) = record.tidal_potential else {
            continue;
        };

        if !(potential.amplitude.is_finite() && potential.amplitude > 0.0) {
            findings.push(PotentialAuditFinding {
                name: record.name,
                issue: PotentialIssue::NonPhysicalAmplitude {
                    amplitude: potential.amplitude,
                },
            });
        } else if nearly_equal(potential.amplitude, record.orbital_frequency, tol) {
            findings.push(PotentialAuditFinding {
                name: record.name,
                issue: PotentialIssue::AmplitudeMatchesFrequency {
                    amplitude: potential.amplitude,
                    frequency: record.orbital_frequency,
                },
            });
        }

        let r = potential.reduction_factor;
        if r == 0.0 || ensure_in_range(r, 0.0, 1.0, "reduction factor").is_err() {
            findings.push(PotentialAuditFinding {
                name: record.name,
                issue: PotentialIssue::ReductionFactorOutOfRange {
                    reduction_factor: r,
                },
            });
        }
    }

    for finding in &findings {
        warn!(constituent = finding.name, "{finding}");
    }
    findings
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry;
    use crate::table::{ConstituentRecord, TidalPotential};

    #[test]
    fn copied_frequency_column_is_flagged() {
        let findings = audit_tidal_potentials(registry());
        let flagged: Vec<_> = findings
            .iter()
            .filter(|f| matches!(f.issue, PotentialIssue::AmplitudeMatchesFrequency { .. }))
            .map(|f| f.name)
            .collect();
        assert_eq!(flagged, ["M2", "S2", "N2", "K2"]);
    }

    #[test]
    fn diurnal_entries_pass() {
        let findings = audit_tidal_potentials(registry());
        assert!(
            findings
                .iter()
                .all(|f| !["K1", "O1", "P1", "Q1"].contains(&f.name))
        );
    }

    #[test]
    fn reduction_factor_range_is_checked() {
        static BAD: [ConstituentRecord; 1] = [ConstituentRecord {
            name: "X2",
            orbital_frequency: 1.0e-4,
            doodson_coefficient: 2,
            tidal_potential: Some(TidalPotential {
                amplitude: 0.2,
                reduction_factor: 1.5,
            }),
        }];
        let registry = ConstituentRegistry::from_table(&BAD);
        let findings = audit_tidal_potentials(&registry);
        assert_eq!(findings.len(), 1);
        assert!(findings[0].to_string().contains("outside (0, 1]"));
    }
}
