//! Valve pressure resolution.

use serde::Serialize;

use crate::models::{Station, ValveTable};

/// Text shown for a station without an assigned value.
pub const UNASSIGNED_VALUE: &str = "--";

/// One station's resolved valve value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValveReading {
    /// The station
    pub station: Station,
    /// Assigned value, 0 when none
    pub value: u8,
}

impl ValveReading {
    /// Value as shown to the user; 0 reads as "--".
    #[must_use]
    pub fn display_value(&self) -> String {
        if self.value == 0 {
            UNASSIGNED_VALUE.to_string()
        } else {
            self.value.to_string()
        }
    }
}

/// Values for every station, in canonical station order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValveAssignment {
    readings: Vec<ValveReading>,
}

impl ValveAssignment {
    /// All stations mapped to 0.
    #[must_use]
    pub fn zeroed(stations: &[Station]) -> Self {
        Self {
            readings: stations
                .iter()
                .map(|station| ValveReading {
                    station: station.clone(),
                    value: 0,
                })
                .collect(),
        }
    }

    /// Readings in canonical station order.
    #[must_use]
    pub fn readings(&self) -> &[ValveReading] {
        &self.readings
    }

    /// Value of one station (0 if unknown).
    #[must_use]
    pub fn value_of(&self, station: &Station) -> u8 {
        self.readings
            .iter()
            .find(|r| &r.station == station)
            .map_or(0, |r| r.value)
    }

    /// Whether every value is 0.
    #[must_use]
    pub fn is_zeroed(&self) -> bool {
        self.readings.iter().all(|r| r.value == 0)
    }

    /// Readings ascending by value, zero-valued stations last.
    ///
    /// Stations with equal values keep their canonical order.
    #[must_use]
    pub fn sorted(&self) -> Vec<ValveReading> {
        let mut sorted = self.readings.clone();
        sorted.sort_by_key(|r| (r.value == 0, r.value));
        sorted
    }
}

/// Resolves the values for a start and end station name.
///
/// An empty name, or a pair without a table entry, resolves every station
/// to 0. Stations missing from a matched entry also read 0.
#[must_use]
pub fn resolve(table: &ValveTable, stations: &[Station], start: &str, end: &str) -> ValveAssignment {
    if start.is_empty() || end.is_empty() {
        return ValveAssignment::zeroed(stations);
    }

    let Some(values) = table.get(&Station::from(start), &Station::from(end)) else {
        return ValveAssignment::zeroed(stations);
    };

    ValveAssignment {
        readings: stations
            .iter()
            .map(|station| ValveReading {
                station: station.clone(),
                value: values.get(station).copied().unwrap_or(0),
            })
            .collect(),
    }
}

/// Selector state of the valve tracker.
///
/// Each selector hides the station chosen in the other one, so start and end
/// can never be the same station.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValveSelection {
    start: Option<Station>,
    end: Option<Station>,
}

impl ValveSelection {
    /// Creates a selection with both selectors empty.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Selected start station.
    #[must_use]
    pub const fn start(&self) -> Option<&Station> {
        self.start.as_ref()
    }

    /// Selected end station.
    #[must_use]
    pub const fn end(&self) -> Option<&Station> {
        self.end.as_ref()
    }

    /// Sets or clears the start station. Rejects the current end station.
    pub fn set_start(&mut self, station: Option<Station>) -> bool {
        if station.is_some() && station == self.end {
            return false;
        }
        self.start = station;
        true
    }

    /// Sets or clears the end station. Rejects the current start station.
    pub fn set_end(&mut self, station: Option<Station>) -> bool {
        if station.is_some() && station == self.start {
            return false;
        }
        self.end = station;
        true
    }

    /// Stations offered by the start selector.
    #[must_use]
    pub fn start_options<'a>(&self, stations: &'a [Station]) -> Vec<&'a Station> {
        stations
            .iter()
            .filter(|s| self.end.as_ref() != Some(*s))
            .collect()
    }

    /// Stations offered by the end selector.
    #[must_use]
    pub fn end_options<'a>(&self, stations: &'a [Station]) -> Vec<&'a Station> {
        stations
            .iter()
            .filter(|s| self.start.as_ref() != Some(*s))
            .collect()
    }

    /// Clears both selectors.
    pub fn reset(&mut self) {
        self.start = None;
        self.end = None;
    }

    /// Resolves the current selection.
    #[must_use]
    pub fn assignment(&self, table: &ValveTable, stations: &[Station]) -> ValveAssignment {
        resolve(
            table,
            stations,
            self.start.as_ref().map_or("", Station::as_str),
            self.end.as_ref().map_or("", Station::as_str),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    fn stations() -> Vec<Station> {
        ["A", "B", "C", "D"].into_iter().map(Station::from).collect()
    }

    fn table() -> ValveTable {
        let mut table = ValveTable::new();
        table
            .insert(
                Station::from("A"),
                Station::from("B"),
                BTreeMap::from([(Station::from("C"), 3), (Station::from("D"), 1)]),
            )
            .unwrap();
        table
            .insert(
                Station::from("B"),
                Station::from("A"),
                BTreeMap::from([(Station::from("C"), 2)]),
            )
            .unwrap();
        table
    }

    #[test]
    fn test_resolve_uses_table_entry() {
        let assignment = resolve(&table(), &stations(), "A", "B");
        assert_eq!(assignment.value_of(&Station::from("A")), 0);
        assert_eq!(assignment.value_of(&Station::from("C")), 3);
        assert_eq!(assignment.value_of(&Station::from("D")), 1);
    }

    #[test]
    fn test_resolve_is_not_symmetric() {
        let forward = resolve(&table(), &stations(), "A", "B");
        let backward = resolve(&table(), &stations(), "B", "A");
        assert_ne!(forward, backward);
        assert_eq!(backward.value_of(&Station::from("C")), 2);
        assert_eq!(backward.value_of(&Station::from("D")), 0);
    }

    #[test]
    fn test_resolve_empty_or_missing_is_zeroed() {
        let table = table();
        let all = stations();
        assert!(resolve(&table, &all, "", "B").is_zeroed());
        assert!(resolve(&table, &all, "A", "").is_zeroed());
        assert!(resolve(&table, &all, "C", "D").is_zeroed());
        assert_eq!(resolve(&table, &all, "", "").readings().len(), 4);
    }

    #[test]
    fn test_sorted_puts_zeros_last() {
        let sorted = resolve(&table(), &stations(), "A", "B").sorted();
        let names: Vec<&str> = sorted.iter().map(|r| r.station.as_str()).collect();
        assert_eq!(names, vec!["D", "C", "A", "B"]);
        assert_eq!(sorted[0].display_value(), "1");
        assert_eq!(sorted[3].display_value(), "--");
    }

    #[test]
    fn test_selection_hides_opposing_station() {
        let all = stations();
        let mut selection = ValveSelection::new();
        assert!(selection.set_start(Some(Station::from("A"))));
        assert!(!selection.set_end(Some(Station::from("A"))));

        let end_options: Vec<&str> = selection.end_options(&all).iter().map(|s| s.as_str()).collect();
        assert_eq!(end_options, vec!["B", "C", "D"]);
        assert_eq!(selection.start_options(&all).len(), 4);
    }

    #[test]
    fn test_selection_assignment_and_reset() {
        let all = stations();
        let table = table();
        let mut selection = ValveSelection::new();
        selection.set_start(Some(Station::from("A")));
        assert!(selection.assignment(&table, &all).is_zeroed());

        selection.set_end(Some(Station::from("B")));
        assert_eq!(selection.assignment(&table, &all).value_of(&Station::from("C")), 3);

        selection.reset();
        assert!(selection.start().is_none());
        assert!(selection.assignment(&table, &all).is_zeroed());
    }
}
