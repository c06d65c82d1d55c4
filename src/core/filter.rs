//! Equipment constraints for session generation.
//!
//! A cycle may restrict every session to a set of equipment names, and a
//! single session may exclude further items. Names are compared
//! case-insensitively after trimming.

use super::{Cycle, Equipment, Studio};

/// Equipment constraints applied to studios before a session prompt is built.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EquipmentFilter {
    /// Allowed equipment names (empty = everything allowed)
    pub available: Vec<String>,
    /// Equipment names to leave out
    pub excluded: Vec<String>,
}

impl EquipmentFilter {
    /// Build a filter from a cycle's constraint plus a session's exclusions.
    pub fn new(cycle: &Cycle, excluded: &[String]) -> Self {
        Self { available: normalize(&cycle.available_equipment), excluded: normalize(excluded) }
    }

    /// Check if this filter restricts anything.
    pub fn has_filters(&self) -> bool {
        !self.available.is_empty() || !self.excluded.is_empty()
    }

    /// Check if an equipment item passes the filter.
    pub fn matches(&self, item: &Equipment) -> bool {
        let name = item.name.trim().to_lowercase();

        if !self.available.is_empty() && !self.available.iter().any(|a| *a == name) {
            return false;
        }

        !self.excluded.iter().any(|e| *e == name)
    }

    /// Copy of a studio with its equipment reduced to the items that pass.
    pub fn apply(&self, studio: &Studio) -> Studio {
        let mut filtered = studio.clone();
        filtered.equipment.retain(|item| self.matches(item));
        filtered
    }

    /// Apply the filter to every studio.
    pub fn apply_all(&self, studios: &[Studio]) -> Vec<Studio> {
        studios.iter().map(|s| self.apply(s)).collect()
    }

    /// Get a display string showing active constraints.
    pub fn filter_display(&self) -> Option<String> {
        if !self.has_filters() {
            return None;
        }

        let mut parts = Vec::new();
        if !self.available.is_empty() {
            parts.push(format!("only: {}", self.available.join(", ")));
        }
        if !self.excluded.is_empty() {
            parts.push(format!("without: {}", self.excluded.join(", ")));
        }

        Some(parts.join("; "))
    }
}

fn normalize(names: &[String]) -> Vec<String> {
    let mut out: Vec<String> = names
        .iter()
        .map(|n| n.trim().to_lowercase())
        .filter(|n| !n.is_empty())
        .collect();
    out.dedup();
    out
}
