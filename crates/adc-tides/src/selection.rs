//! Active forcing selection.
//!
//! An ordered, duplicate-free set of constituents a simulation opts into.
//! Members are stored as registry positions, so every member is known to
//! exist in the registry.

use tracing::debug;

use crate::forcing::TidalForcingSpec;
use crate::registry::{ConstituentRegistry, registry};
use crate::table::ConstituentRecord;
use crate::TideResult;

#[derive(Debug, Clone)]
pub struct ActiveForcingSelection<'r> {
    registry: &'r ConstituentRegistry,
    members: Vec<usize>,
}

impl ActiveForcingSelection<'static> {
    /// Empty selection validated against the process-wide registry.
    pub fn new() -> Self {
        Self::with_registry(registry())
    }

    /// Build a selection from names in order, failing on the first unknown one.
    pub fn from_names<I, S>(names: I) -> TideResult<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut selection = Self::new();
        for name in names {
            selection.use_constituent(name.as_ref())?;
        }
        Ok(selection)
    }
}

impl Default for ActiveForcingSelection<'static> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'r> ActiveForcingSelection<'r> {
    pub fn with_registry(registry: &'r ConstituentRegistry) -> Self {
        Self {
            registry,
            members: Vec::new(),
        }
    }

    /// Add a constituent. Re-adding a selected constituent is a no-op.
    pub fn use_constituent(&mut self, name: &str) -> TideResult<()> {
        let index = self.registry.index_of(name)?;
        if self.members.contains(&index) {
            debug!(constituent = name, "constituent already selected");
        } else {
            self.members.push(index);
            debug!(constituent = name, count = self.members.len(), "constituent selected");
        }
        Ok(())
    }

    /// Remove a constituent if present.
    pub fn remove_constituent(&mut self, name: &str) {
        let Ok(index) = self.registry.index_of(name) else {
            return;
        };
        if let Some(pos) = self.members.iter().position(|&m| m == index) {
            self.members.remove(pos);
            debug!(constituent = name, count = self.members.len(), "constituent removed");
        }
    }

    /// Select every constituent in table order.
    pub fn use_all(&mut self) {
        for index in 0..self.registry.len() {
            if !self.members.contains(&index) {
                self.members.push(index);
            }
        }
    }

    /// Select the constituents that carry tidal potential data.
    pub fn use_principal(&mut self) {
        for (index, record) in self.registry.records().iter().enumerate() {
            if record.has_tidal_potential() && !self.members.contains(&index) {
                self.members.push(index);
            }
        }
    }

    pub fn clear(&mut self) {
        self.members.clear();
    }

    /// Selected records in insertion order.
    pub fn selected(&self) -> Vec<&'r ConstituentRecord> {
        let registry = self.registry;
        self.members
            .iter()
            .map(|&index| registry.record_at(index))
            .collect()
    }

    pub fn names(&self) -> Vec<&'static str> {
        self.members
            .iter()
            .map(|&index| self.registry.record_at(index).name)
            .collect()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.registry
            .index_of(name)
            .is_ok_and(|index| self.members.contains(&index))
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    pub fn forcing_spec(&self) -> TidalForcingSpec {
        TidalForcingSpec::from_records(self.selected())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::TideError;

    #[test]
    fn starts_empty() {
        let selection = ActiveForcingSelection::new();
        assert!(selection.is_empty());
        assert!(selection.selected().is_empty());
    }

    #[test]
    fn use_constituent_is_idempotent() {
        let mut selection = ActiveForcingSelection::new();
        selection.use_constituent("M2").unwrap();
        selection.use_constituent("M2").unwrap();
        assert_eq!(selection.names(), ["M2"]);
    }

    #[test]
    fn insertion_order_is_preserved() {
        let mut selection = ActiveForcingSelection::new();
        selection.use_constituent("K1").unwrap();
        selection.use_constituent("M2").unwrap();
        assert_eq!(selection.names(), ["K1", "M2"]);
    }

    #[test]
    fn unknown_name_is_rejected_without_mutation() {
        let mut selection = ActiveForcingSelection::new();
        selection.use_constituent("O1").unwrap();
        let err = selection.use_constituent("ZZ9").unwrap_err();
        assert_eq!(err, TideError::unknown("ZZ9"));
        assert_eq!(selection.names(), ["O1"]);
    }

    #[test]
    fn remove_absent_is_noop() {
        let mut selection = ActiveForcingSelection::new();
        selection.remove_constituent("S2");
        selection.remove_constituent("not-a-constituent");
        assert!(selection.is_empty());
    }

    #[test]
    fn removing_last_member_returns_to_empty() {
        let mut selection = ActiveForcingSelection::new();
        selection.use_constituent("S2").unwrap();
        assert!(!selection.is_empty());
        selection.remove_constituent("S2");
        assert!(selection.is_empty());
    }

    #[test]
    fn readding_after_removal_moves_to_end() {
        let mut selection = ActiveForcingSelection::new();
        for name in ["M2", "S2", "N2"] {
            selection.use_constituent(name).unwrap();
        }
        selection.remove_constituent("M2");
        selection.use_constituent("M2").unwrap();
        assert_eq!(selection.names(), ["S2", "N2", "M2"]);
    }

    #[test]
    fn use_all_keeps_existing_order_first() {
        let mut selection = ActiveForcingSelection::new();
        selection.use_constituent("Mf").unwrap();
        selection.use_all();
        let names = selection.names();
        assert_eq!(names.len(), 37);
        assert_eq!(names[0], "Mf");
        assert_eq!(names[1], "M4");
        assert_eq!(names.iter().filter(|&&n| n == "Mf").count(), 1);
    }

    #[test]
    fn use_principal_selects_eight() {
        let mut selection = ActiveForcingSelection::new();
        selection.use_principal();
        assert_eq!(selection.len(), 8);
        assert!(selection.selected().iter().all(|c| c.has_tidal_potential()));
    }

    #[test]
    fn from_names_stops_at_unknown() {
        assert!(ActiveForcingSelection::from_names(["M2", "K1"]).is_ok());
        let err = ActiveForcingSelection::from_names(["M2", "k1"]).unwrap_err();
        assert_eq!(err, TideError::unknown("k1"));
    }

    #[test]
    fn contains_and_clear() {
        let mut selection = ActiveForcingSelection::from_names(["Q1"]).unwrap();
        assert!(selection.contains("Q1"));
        assert!(!selection.contains("P1"));
        assert!(!selection.contains("q1"));
        selection.clear();
        assert!(selection.is_empty());
    }
}
