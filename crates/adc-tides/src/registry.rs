//! Read-only constituent registry.
//!
//! The registry is built once from the constant table and never mutated.
//! Names are matched exactly: constituent nomenclature is case-sensitive
//! ("Mm" and "MM" are not interchangeable).

use std::collections::HashMap;
use std::sync::LazyLock;

use crate::table::{CONSTITUENT_TABLE, ConstituentRecord, TidalPotential};
use crate::{TidalSpecies, TideError, TideResult};

static REGISTRY: LazyLock<ConstituentRegistry> =
    LazyLock::new(|| ConstituentRegistry::from_table(&CONSTITUENT_TABLE));

/// Process-wide registry over the fixed constituent table.
pub fn registry() -> &'static ConstituentRegistry {
    &REGISTRY
}

#[derive(Debug)]
pub struct ConstituentRegistry {
    records: &'static [ConstituentRecord],
    index: HashMap<&'static str, usize>,
}

impl ConstituentRegistry {
    pub(crate) fn from_table(records: &'static [ConstituentRecord]) -> Self {
        let mut index = HashMap::with_capacity(records.len());
        for (i, record) in records.iter().enumerate() {
            index.entry(record.name).or_insert(i);
        }
        Self { records, index }
    }

    pub(crate) fn index_of(&self, name: &str) -> TideResult<usize> {
        self.index
            .get(name)
            .copied()
            .ok_or_else(|| TideError::unknown(name))
    }

    pub(crate) fn record_at(&self, index: usize) -> &'static ConstituentRecord {
        &self.records[index]
    }

    pub fn lookup(&self, name: &str) -> TideResult<&'static ConstituentRecord> {
        self.index_of(name).map(|i| self.record_at(i))
    }

    pub fn has(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    /// Constituent names in table order. Each call starts a fresh iteration.
    pub fn all_names(&self) -> impl ExactSizeIterator<Item = &'static str> + Clone {
        self.records.iter().map(|record| record.name)
    }

    pub fn records(&self) -> &'static [ConstituentRecord] {
        self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn orbital_frequency(&self, name: &str) -> TideResult<f64> {
        self.lookup(name).map(|record| record.orbital_frequency)
    }

    pub fn doodson_coefficient(&self, name: &str) -> TideResult<u8> {
        self.lookup(name).map(|record| record.doodson_coefficient)
    }

    /// Equilibrium potential of a constituent.
    ///
    /// `Ok(None)` means the constituent exists but has no potential data; it is
    /// never reported as a zero amplitude.
    pub fn tidal_potential(&self, name: &str) -> TideResult<Option<TidalPotential>> {
        self.lookup(name).map(|record| record.tidal_potential)
    }

    /// Names carrying tidal potential data, in table order.
    pub fn principal_names(&self) -> impl Iterator<Item = &'static str> + Clone {
        self.records
            .iter()
            .filter(|record| record.has_tidal_potential())
            .map(|record| record.name)
    }

    pub fn by_species(&self, species: TidalSpecies) -> Vec<&'static ConstituentRecord> {
        self.records
            .iter()
            .filter(|record| record.species() == Some(species))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_is_case_sensitive() {
        assert!(registry().has("M2"));
        assert!(!registry().has("m2"));
        assert_eq!(
            registry().lookup("m2").unwrap_err(),
            TideError::unknown("m2")
        );
    }

    #[test]
    fn all_names_is_restartable() {
        let first: Vec<_> = registry().all_names().collect();
        let second: Vec<_> = registry().all_names().collect();
        assert_eq!(first, second);
        assert_eq!(first.len(), 37);
        assert_eq!(first[0], "M4");
        assert_eq!(first[36], "Mf");
    }

    #[test]
    fn principal_names_follow_table_order() {
        let names: Vec<_> = registry().principal_names().collect();
        assert_eq!(names, ["M2", "S2", "N2", "K2", "K1", "O1", "Q1", "P1"]);
    }

    #[test]
    fn potential_absent_outside_principal_set() {
        assert_eq!(registry().tidal_potential("M4").unwrap(), None);
        let k1 = registry().tidal_potential("K1").unwrap().unwrap();
        assert_eq!(k1.amplitude, 0.141565);
        assert_eq!(k1.reduction_factor, 0.736);
    }

    #[test]
    fn convenience_accessors_fail_on_unknown_names() {
        assert!(registry().orbital_frequency("X9").is_err());
        assert!(registry().doodson_coefficient("X9").is_err());
        assert!(registry().tidal_potential("X9").is_err());
    }

    #[test]
    fn species_partition_covers_table() {
        let total: usize = TidalSpecies::ALL
            .iter()
            .map(|&species| registry().by_species(species).len())
            .sum();
        assert_eq!(total, registry().len());
        assert_eq!(registry().by_species(TidalSpecies::LongPeriod).len(), 5);
        assert_eq!(registry().by_species(TidalSpecies::EighthDiurnal).len(), 1);
    }

    #[test]
    fn first_duplicate_wins() {
        static DUPLICATED: [ConstituentRecord; 2] = [
            ConstituentRecord {
                name: "X1",
                orbital_frequency: 1.0,
                doodson_coefficient: 1,
                tidal_potential: None,
            },
            ConstituentRecord {
                name: "X1",
                orbital_frequency: 2.0,
                doodson_coefficient: 1,
                tidal_potential: None,
            },
        ];
        let registry = ConstituentRegistry::from_table(&DUPLICATED);
        assert_eq!(registry.orbital_frequency("X1").unwrap(), 1.0);
    }
}
