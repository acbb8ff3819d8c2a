//! Valve pressure lookup table.

use anyhow::Result;
use std::collections::BTreeMap;

use super::Station;

/// Static lookup from a (start, end) station pair to per-station values.
///
/// The table is not assumed to be symmetric: `(A, B)` and `(B, A)` are
/// independent entries.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValveTable {
    entries: BTreeMap<(Station, Station), BTreeMap<Station, u8>>,
}

impl ValveTable {
    /// Creates an empty table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds the values for a start/end combination.
    ///
    /// # Errors
    ///
    /// Returns an error if start equals end, if the pair is already defined,
    /// or if the values assign anything to the start or end station.
    pub fn insert(
        &mut self,
        start: Station,
        end: Station,
        values: BTreeMap<Station, u8>,
    ) -> Result<()> {
        if start == end {
            anyhow::bail!("Valve entry for '{start}' uses the same station as start and end");
        }

        if values.contains_key(&start) || values.contains_key(&end) {
            anyhow::bail!(
                "Valve entry '{start}' -> '{end}' cannot assign a value to its own start or end"
            );
        }

        let key = (start, end);
        if self.entries.contains_key(&key) {
            anyhow::bail!("Valve entry '{}' -> '{}' is defined twice", key.0, key.1);
        }

        self.entries.insert(key, values);
        Ok(())
    }

    /// Looks up the values for a start/end combination.
    #[must_use]
    pub fn get(&self, start: &Station, end: &Station) -> Option<&BTreeMap<Station, u8>> {
        self.entries.get(&(start.clone(), end.clone()))
    }

    /// Iterates all entries.
    pub fn iter(&self) -> impl Iterator<Item = (&Station, &Station, &BTreeMap<Station, u8>)> {
        self.entries
            .iter()
            .map(|((start, end), values)| (start, end, values))
    }

    /// Number of start/end combinations.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the table is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn values(pairs: &[(&str, u8)]) -> BTreeMap<Station, u8> {
        pairs.iter().map(|(s, v)| (Station::from(*s), *v)).collect()
    }

    #[test]
    fn test_insert_and_get_is_directional() {
        let mut table = ValveTable::new();
        table
            .insert("A".into(), "B".into(), values(&[("C", 1), ("D", 2)]))
            .unwrap();

        let found = table.get(&"A".into(), &"B".into()).unwrap();
        assert_eq!(found.get(&Station::from("D")), Some(&2));
        assert!(table.get(&"B".into(), &"A".into()).is_none());
    }

    #[test]
    fn test_insert_rejects_same_start_and_end() {
        let mut table = ValveTable::new();
        assert!(table.insert("A".into(), "A".into(), values(&[])).is_err());
    }

    #[test]
    fn test_insert_rejects_value_for_endpoint() {
        let mut table = ValveTable::new();
        assert!(table
            .insert("A".into(), "B".into(), values(&[("A", 1)]))
            .is_err());
    }

    #[test]
    fn test_insert_rejects_duplicate_pair() {
        let mut table = ValveTable::new();
        table.insert("A".into(), "B".into(), values(&[])).unwrap();
        assert!(table.insert("A".into(), "B".into(), values(&[])).is_err());
        assert_eq!(table.len(), 1);
    }
}
