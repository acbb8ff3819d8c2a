//! Ordered station selection for the bomb order tool.

use serde::Serialize;

use crate::models::Station;

/// A station as shown in the order picker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SelectionEntry {
    /// The station
    pub station: Station,
    /// 1-based position in the chosen order, if chosen
    #[serde(skip_serializing_if = "Option::is_none")]
    pub position: Option<usize>,
}

/// User's in-progress ordered choice of stations.
///
/// Never contains the same station twice: selecting a chosen station again
/// removes it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OrderedSelection {
    order: Vec<Station>,
}

impl OrderedSelection {
    /// Creates an empty selection.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Removes the station if chosen, otherwise appends it.
    ///
    /// Returns `true` if the station is chosen afterwards.
    pub fn toggle(&mut self, station: &Station) -> bool {
        if let Some(idx) = self.position_index(station) {
            self.order.remove(idx);
            false
        } else {
            self.order.push(station.clone());
            true
        }
    }

    /// Clears the selection.
    pub fn reset(&mut self) {
        self.order.clear();
    }

    /// Replaces the whole selection, dropping repeats.
    pub fn replace(&mut self, stations: Vec<Station>) {
        self.order.clear();
        for station in stations {
            if !self.order.contains(&station) {
                self.order.push(station);
            }
        }
    }

    /// 1-based position of a station, if chosen.
    #[must_use]
    pub fn position(&self, station: &Station) -> Option<usize> {
        self.position_index(station).map(|idx| idx + 1)
    }

    fn position_index(&self, station: &Station) -> Option<usize> {
        self.order.iter().position(|s| s == station)
    }

    /// Chosen stations in selection order.
    #[must_use]
    pub fn stations(&self) -> &[Station] {
        &self.order
    }

    /// Number of chosen stations.
    #[must_use]
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// Whether nothing has been chosen.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Whether every station has been chosen.
    #[must_use]
    pub fn is_complete(&self, all: &[Station]) -> bool {
        !all.is_empty() && self.order.len() >= all.len()
    }

    /// Whether the reset affordance should be offered.
    #[must_use]
    pub fn can_reset(&self) -> bool {
        !self.order.is_empty()
    }

    /// Entries to display.
    ///
    /// While incomplete, all stations in canonical order (chosen ones carry
    /// their position). Once complete, only the chosen stations in selection
    /// order.
    #[must_use]
    pub fn display_entries(&self, all: &[Station]) -> Vec<SelectionEntry> {
        if self.is_complete(all) {
            self.order
                .iter()
                .enumerate()
                .map(|(idx, station)| SelectionEntry {
                    station: station.clone(),
                    position: Some(idx + 1),
                })
                .collect()
        } else {
            all.iter()
                .map(|station| SelectionEntry {
                    station: station.clone(),
                    position: self.position(station),
                })
                .collect()
        }
    }
}
