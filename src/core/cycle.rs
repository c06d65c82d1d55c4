//! Training cycle data structures.
//!
//! A cycle is a multi-week plan with a focus discipline. Each week carries a
//! theme plus target volume and intensity on a 0-100 scale.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::id::generate_id;

/// Longest cycle that can be planned.
pub const MAX_CYCLE_WEEKS: u32 = 52;

/// Discipline a cycle is built around.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CycleFocus {
    Hyrox,
    Crossfit,
    GeneralStrength,
    Endurance,
}

impl CycleFocus {
    /// All focus options.
    pub const ALL: [Self; 4] = [Self::Hyrox, Self::Crossfit, Self::GeneralStrength, Self::Endurance];

    /// Wire name of the focus.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Hyrox => "hyrox",
            Self::Crossfit => "crossfit",
            Self::GeneralStrength => "general_strength",
            Self::Endurance => "endurance",
        }
    }
}

impl Default for CycleFocus {
    fn default() -> Self {
        Self::Hyrox
    }
}

impl fmt::Display for CycleFocus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CycleFocus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace('-', "_").as_str() {
            "hyrox" => Ok(Self::Hyrox),
            "crossfit" => Ok(Self::Crossfit),
            "general_strength" | "strength" => Ok(Self::GeneralStrength),
            "endurance" => Ok(Self::Endurance),
            other => Err(format!("unknown cycle focus '{other}'")),
        }
    }
}

/// Evidence-based weekly training theme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WeeklyTheme {
    Intervals,
    Zone2,
    Threshold,
    RacePrep,
    Recovery,
    MaxStrength,
    PowerEndurance,
    Transitions,
}

/// Descriptive information about a weekly theme.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ThemeInfo {
    pub name: &'static str,
    pub description: &'static str,
    pub scientific_basis: &'static str,
}

impl WeeklyTheme {
    /// All themes, in the order they are offered to the model.
    pub const ALL: [Self; 8] = [
        Self::Intervals,
        Self::Zone2,
        Self::Threshold,
        Self::RacePrep,
        Self::Recovery,
        Self::MaxStrength,
        Self::PowerEndurance,
        Self::Transitions,
    ];

    /// Wire name of the theme.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Intervals => "intervals",
            Self::Zone2 => "zone2",
            Self::Threshold => "threshold",
            Self::RacePrep => "race_prep",
            Self::Recovery => "recovery",
            Self::MaxStrength => "max_strength",
            Self::PowerEndurance => "power_endurance",
            Self::Transitions => "transitions",
        }
    }

    /// Display name, description and scientific basis of the theme.
    pub fn info(&self) -> ThemeInfo {
        match self {
            Self::Intervals => ThemeInfo {
                name: "High-Intensity Intervals",
                description: "VO2max development through repeated short, intense efforts",
                scientific_basis: "Tabata Protocol, 4x4 Norwegian Method",
            },
            Self::Zone2 => ThemeInfo {
                name: "Zone 2 Endurance",
                description: "Aerobic base building at conversational pace",
                scientific_basis: "Polarized Training Model (Seiler & Tønnessen, 2009)",
            },
            Self::Threshold => ThemeInfo {
                name: "Lactate Threshold",
                description: "Sustained effort at race pace intensity",
                scientific_basis: "Critical Power Theory (Jones et al., 2019)",
            },
            Self::RacePrep => ThemeInfo {
                name: "Race Preparation",
                description: "Full simulations with transitions and pacing strategy",
                scientific_basis: "Sport-Specific Practice Principle",
            },
            Self::Recovery => ThemeInfo {
                name: "Active Recovery",
                description: "Low-intensity movement for adaptation and regeneration",
                scientific_basis: "Supercompensation Theory",
            },
            Self::MaxStrength => ThemeInfo {
                name: "Maximum Strength",
                description: "Heavy compound lifts at 85-95% 1RM",
                scientific_basis: "Concurrent Training Model (Coffey & Hawley, 2017)",
            },
            Self::PowerEndurance => ThemeInfo {
                name: "Power Endurance",
                description: "Repeated explosive efforts under fatigue",
                scientific_basis: "Anaerobic Capacity Development",
            },
            Self::Transitions => ThemeInfo {
                name: "Transition Efficiency",
                description: "Minimizing time and energy cost between stations",
                scientific_basis: "Task Switching & Motor Learning",
            },
        }
    }
}

impl fmt::Display for WeeklyTheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One week of a cycle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CycleWeek {
    /// 1-based position within the cycle
    pub week_number: u32,

    /// Main theme of the week in prose (e.g. "Accumulation", "Deload")
    pub focus: String,

    /// Weekly training theme
    pub theme: WeeklyTheme,

    /// Volume load, 0-100
    pub volume: f64,

    /// Average intensity, 0-100
    pub intensity: f64,
}

impl CycleWeek {
    /// Clamp volume and intensity into the 0-100 scale.
    pub fn clamp_loads(&mut self) {
        self.volume = clamp_load(self.volume);
        self.intensity = clamp_load(self.intensity);
    }
}

fn clamp_load(value: f64) -> f64 {
    if value.is_finite() {
        value.clamp(0.0, 100.0)
    } else {
        0.0
    }
}

/// A multi-week training plan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Cycle {
    /// Unique identifier
    pub id: String,

    /// Display name
    pub name: String,

    /// Focus discipline
    pub focus: CycleFocus,

    /// Number of planned weeks
    pub duration_weeks: u32,

    /// When the cycle was created
    pub start_date: DateTime<Utc>,

    /// Planned weeks, numbered from 1
    pub weeks: Vec<CycleWeek>,

    /// Equipment names every session of the cycle is limited to (empty = no limit)
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub available_equipment: Vec<String>,
}

impl Cycle {
    /// Create a cycle starting now with a generated id.
    pub fn new(
        name: impl Into<String>,
        focus: CycleFocus,
        duration_weeks: u32,
        weeks: Vec<CycleWeek>,
    ) -> Self {
        Self {
            id: generate_id(),
            name: name.into(),
            focus,
            duration_weeks,
            start_date: Utc::now(),
            weeks,
            available_equipment: Vec::new(),
        }
    }

    /// Limit the cycle to a set of equipment names.
    pub fn with_available_equipment(mut self, equipment: Vec<String>) -> Self {
        self.available_equipment =
            equipment.into_iter().map(|e| e.trim().to_string()).filter(|e| !e.is_empty()).collect();
        self
    }

    /// Look up a week by its number.
    pub fn week(&self, week_number: u32) -> Option<&CycleWeek> {
        self.weeks.iter().find(|w| w.week_number == week_number)
    }

    /// Week with the highest volume, if any.
    pub fn peak_volume_week(&self) -> Option<&CycleWeek> {
        self.weeks.iter().max_by(|a, b| {
            a.volume.partial_cmp(&b.volume).unwrap_or(std::cmp::Ordering::Equal)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn week(n: u32, volume: f64) -> CycleWeek {
        CycleWeek {
            week_number: n,
            focus: format!("Week {n}"),
            theme: WeeklyTheme::Zone2,
            volume,
            intensity: 50.0,
        }
    }

    #[test]
    fn test_focus_round_trip_names() {
        for focus in CycleFocus::ALL {
            assert_eq!(focus.as_str().parse::<CycleFocus>(), Ok(focus));
        }
        assert_eq!("general-strength".parse::<CycleFocus>(), Ok(CycleFocus::GeneralStrength));
        assert!("yoga".parse::<CycleFocus>().is_err());
    }

    #[test]
    fn test_theme_wire_names_match_serde() {
        for theme in WeeklyTheme::ALL {
            let json = serde_json::to_string(&theme).unwrap();
            assert_eq!(json, format!("\"{}\"", theme.as_str()));
        }
    }

    #[test]
    fn test_theme_info() {
        let info = WeeklyTheme::Threshold.info();
        assert_eq!(info.name, "Lactate Threshold");
        assert!(info.scientific_basis.contains("Critical Power"));
    }

    #[test]
    fn test_clamp_loads() {
        let mut w = week(1, 140.0);
        w.intensity = -3.0;
        w.clamp_loads();
        assert_eq!(w.volume, 100.0);
        assert_eq!(w.intensity, 0.0);
    }

    #[test]
    fn test_cycle_week_lookup() {
        let cycle = Cycle::new("Test", CycleFocus::Hyrox, 2, vec![week(1, 40.0), week(2, 70.0)]);
        assert_eq!(cycle.week(2).map(|w| w.volume), Some(70.0));
        assert!(cycle.week(3).is_none());
        assert_eq!(cycle.peak_volume_week().map(|w| w.week_number), Some(2));
    }

    #[test]
    fn test_available_equipment_is_trimmed() {
        let cycle = Cycle::new("Test", CycleFocus::Hyrox, 1, Vec::new())
            .with_available_equipment(vec![" SkiErg ".to_string(), String::new()]);
        assert_eq!(cycle.available_equipment, vec!["SkiErg"]);
    }
}
