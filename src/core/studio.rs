//! Studio data structures.
//!
//! A studio is a physical training location with a floor area, an athlete
//! capacity and an equipment inventory.

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::id::generate_id;

/// Floor area in square metres needed per athlete in a functional class.
pub const SQM_PER_ATHLETE: f64 = 6.0;

/// Category of a piece of equipment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EquipmentCategory {
    Cardio,
    Weight,
    Gymnastic,
    #[serde(other)]
    Other,
}

impl EquipmentCategory {
    /// All categories in display order.
    pub const ALL: [Self; 4] = [Self::Cardio, Self::Weight, Self::Gymnastic, Self::Other];

    /// Wire name of the category.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Cardio => "cardio",
            Self::Weight => "weight",
            Self::Gymnastic => "gymnastic",
            Self::Other => "other",
        }
    }
}

impl fmt::Display for EquipmentCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EquipmentCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "cardio" => Ok(Self::Cardio),
            "weight" | "weights" => Ok(Self::Weight),
            "gymnastic" | "gymnastics" => Ok(Self::Gymnastic),
            "other" => Ok(Self::Other),
            other => Err(format!(
                "unknown equipment category '{other}' (expected cardio, weight, gymnastic or other)"
            )),
        }
    }
}

/// A piece of equipment and how many of it a studio has.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Equipment {
    pub name: String,
    pub quantity: u32,
    pub category: EquipmentCategory,
}

impl Equipment {
    /// Create a new equipment entry.
    pub fn new(name: impl Into<String>, quantity: u32, category: EquipmentCategory) -> Self {
        Self { name: name.into(), quantity, category }
    }

    /// Case-insensitive name comparison.
    pub fn is_named(&self, name: &str) -> bool {
        self.name.trim().eq_ignore_ascii_case(name.trim())
    }

    /// Short form used in prompts and listings, e.g. `8x Concept2 Rower`.
    pub fn summary(&self) -> String {
        format!("{}x {}", self.quantity, self.name)
    }
}

/// A physical training location.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Studio {
    /// Unique identifier
    pub id: String,

    /// Display name
    pub name: String,

    /// Free-form location (city, district)
    pub location: String,

    /// Open floor area in square metres
    pub size_sqm: f64,

    /// Maximum number of athletes per class
    pub max_capacity: u32,

    /// Equipment inventory
    #[serde(default)]
    pub equipment: Vec<Equipment>,

    /// Photo the studio was analysed from, if any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub photo: Option<PathBuf>,
}

impl Studio {
    /// Create a studio with a generated id and a capacity derived from its size.
    pub fn new(name: impl Into<String>, location: impl Into<String>, size_sqm: f64) -> Self {
        Self {
            id: generate_id(),
            name: name.into(),
            location: location.into(),
            size_sqm,
            max_capacity: capacity_for_area(size_sqm, SQM_PER_ATHLETE),
            equipment: Vec::new(),
            photo: None,
        }
    }

    /// Override the derived capacity.
    pub fn with_capacity(mut self, max_capacity: u32) -> Self {
        self.max_capacity = max_capacity;
        self
    }

    /// Replace the equipment inventory.
    pub fn with_equipment(mut self, equipment: Vec<Equipment>) -> Self {
        self.equipment = equipment;
        self
    }

    /// Add an equipment item, or replace the quantity and category of an
    /// existing item with the same name.
    ///
    /// Returns `true` if an existing item was updated.
    pub fn set_equipment(&mut self, item: Equipment) -> bool {
        if let Some(existing) = self.equipment.iter_mut().find(|e| e.is_named(&item.name)) {
            existing.quantity = item.quantity;
            existing.category = item.category;
            true
        } else {
            self.equipment.push(item);
            false
        }
    }

    /// Remove an equipment item by name. Returns `true` if something was removed.
    pub fn remove_equipment(&mut self, name: &str) -> bool {
        let before = self.equipment.len();
        self.equipment.retain(|e| !e.is_named(name));
        self.equipment.len() != before
    }

    /// Find an equipment item by name.
    pub fn find_equipment(&self, name: &str) -> Option<&Equipment> {
        self.equipment.iter().find(|e| e.is_named(name))
    }

    /// Equipment summary for prompts and listings.
    pub fn equipment_summary(&self) -> String {
        self.equipment.iter().map(Equipment::summary).collect::<Vec<_>>().join(", ")
    }
}

/// Athlete capacity for a floor area, rounded down.
pub fn capacity_for_area(size_sqm: f64, sqm_per_athlete: f64) -> u32 {
    if !size_sqm.is_finite() || size_sqm <= 0.0 || sqm_per_athlete <= 0.0 {
        return 0;
    }
    (size_sqm / sqm_per_athlete).floor() as u32
}

/// The two demo studios a fresh workspace starts with.
pub fn demo_studios() -> Vec<Studio> {
    vec![
        Studio {
            id: "s1".to_string(),
            name: "Downtown Box".to_string(),
            location: "Berlin Mitte".to_string(),
            size_sqm: 120.0,
            max_capacity: 15,
            equipment: vec![
                Equipment::new("Concept2 Rower", 8, EquipmentCategory::Cardio),
                Equipment::new("Barbell", 15, EquipmentCategory::Weight),
                Equipment::new("Pullup Rig", 1, EquipmentCategory::Gymnastic),
            ],
            photo: None,
        },
        Studio {
            id: "s2".to_string(),
            name: "Garage Gym".to_string(),
            location: "Potsdam".to_string(),
            size_sqm: 80.0,
            max_capacity: 10,
            equipment: vec![
                Equipment::new("Assault Bike", 4, EquipmentCategory::Cardio),
                Equipment::new("Dumbbells", 20, EquipmentCategory::Weight),
                Equipment::new("Box", 10, EquipmentCategory::Gymnastic),
            ],
            photo: None,
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_capacity_for_area() {
        assert_eq!(capacity_for_area(120.0, SQM_PER_ATHLETE), 20);
        assert_eq!(capacity_for_area(80.0, SQM_PER_ATHLETE), 13);
        assert_eq!(capacity_for_area(5.9, SQM_PER_ATHLETE), 0);
        assert_eq!(capacity_for_area(-10.0, SQM_PER_ATHLETE), 0);
        assert_eq!(capacity_for_area(f64::NAN, SQM_PER_ATHLETE), 0);
    }

    #[test]
    fn test_new_studio_derives_capacity() {
        let studio = Studio::new("Box", "Hamburg", 95.0);
        assert_eq!(studio.max_capacity, 15);
        assert_eq!(studio.id.len(), 9);
        assert!(studio.equipment.is_empty());
    }

    #[test]
    fn test_set_equipment_updates_existing() {
        let mut studio = Studio::new("Box", "Hamburg", 95.0);
        assert!(!studio.set_equipment(Equipment::new("Rower", 4, EquipmentCategory::Cardio)));
        assert!(studio.set_equipment(Equipment::new("rower", 6, EquipmentCategory::Cardio)));
        assert_eq!(studio.equipment.len(), 1);
        assert_eq!(studio.find_equipment("ROWER").map(|e| e.quantity), Some(6));
    }

    #[test]
    fn test_remove_equipment() {
        let mut studio = demo_studios().remove(0);
        assert!(studio.remove_equipment("barbell"));
        assert!(!studio.remove_equipment("barbell"));
        assert_eq!(studio.equipment.len(), 2);
    }

    #[test]
    fn test_equipment_summary() {
        let studio = demo_studios().remove(1);
        assert_eq!(studio.equipment_summary(), "4x Assault Bike, 20x Dumbbells, 10x Box");
    }

    #[test]
    fn test_category_parsing() {
        assert_eq!("Cardio".parse::<EquipmentCategory>(), Ok(EquipmentCategory::Cardio));
        assert_eq!("weights".parse::<EquipmentCategory>(), Ok(EquipmentCategory::Weight));
        assert!("sled".parse::<EquipmentCategory>().is_err());
    }

    #[test]
    fn test_unknown_category_deserializes_as_other() {
        let item: Equipment =
            serde_json::from_str(r#"{"name":"Sled","quantity":2,"category":"strongman"}"#)
                .unwrap();
        assert_eq!(item.category, EquipmentCategory::Other);
    }

    #[test]
    fn test_demo_studios() {
        let studios = demo_studios();
        assert_eq!(studios.len(), 2);
        assert_eq!(studios[0].id, "s1");
        assert_eq!(studios[1].max_capacity, 10);
    }
}
