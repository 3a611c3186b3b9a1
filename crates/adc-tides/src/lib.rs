//! adc-tides: astronomical tide constituent registry and forcing selection.
//!
//! Provides:
//! - The fixed constituent constant table (orbital frequency, Doodson
//!   coefficient, equilibrium tidal potential for the principal constituents)
//! - `ConstituentRegistry`, a process-wide read-only lookup over that table
//! - `ActiveForcingSelection`, the ordered set of constituents a run opts into
//! - `TidalForcingSpec`, the serializable hand-off to the model-input writer
//!
//! # Example
//!
//! ```
//! use adc_tides::{ActiveForcingSelection, registry};
//!
//! let m2 = registry().lookup("M2").unwrap();
//! assert_eq!(m2.doodson_coefficient, 2);
//!
//! let mut selection = ActiveForcingSelection::new();
//! selection.use_constituent("K1").unwrap();
//! selection.use_constituent("M2").unwrap();
//! let names: Vec<_> = selection.selected().iter().map(|c| c.name).collect();
//! assert_eq!(names, ["K1", "M2"]);
//! ```

pub mod audit;
pub mod error;
pub mod forcing;
pub mod registry;
pub mod selection;
pub mod species;
pub mod table;

pub use audit::{PotentialAuditFinding, PotentialIssue, audit_tidal_potentials};
pub use error::{TideError, TideResult};
pub use forcing::{ConstituentForcing, TidalForcingSpec};
pub use registry::{ConstituentRegistry, registry};
pub use selection::ActiveForcingSelection;
pub use species::TidalSpecies;
pub use table::{ConstituentRecord, ORBITAL_FREQUENCY_UNITS, PRINCIPAL_CONSTITUENTS, TidalPotential};
