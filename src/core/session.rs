//! Weekly session types.
//!
//! Every week of a cycle has three sessions: endurance, strength and a
//! race-simulation class. Workouts are generated per session for all studios.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// One of the three weekly workout types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SessionType {
    Endurance,
    Strength,
    Class,
}

/// Display configuration of a session type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionConfig {
    pub session_type: SessionType,
    pub name: &'static str,
    pub description: &'static str,
}

impl SessionType {
    /// All session types in weekly order.
    pub const ALL: [Self; 3] = [Self::Endurance, Self::Strength, Self::Class];

    /// Wire name of the session type.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Endurance => "endurance",
            Self::Strength => "strength",
            Self::Class => "class",
        }
    }

    /// Name and description of this session type.
    pub fn config(&self) -> SessionConfig {
        match self {
            Self::Endurance => SessionConfig {
                session_type: *self,
                name: "HYROX Endurance",
                description: "Aerobic capacity, running economy, and sustained effort training",
            },
            Self::Strength => SessionConfig {
                session_type: *self,
                name: "HYROX Strength",
                description: "Functional strength for sled, sandbag, and farmer carries",
            },
            Self::Class => SessionConfig {
                session_type: *self,
                name: "HYROX Class",
                description: "Race simulation with transition practice and pacing",
            },
        }
    }
}

impl fmt::Display for SessionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SessionType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "endurance" => Ok(Self::Endurance),
            "strength" => Ok(Self::Strength),
            "class" => Ok(Self::Class),
            other => Err(format!(
                "unknown session type '{other}' (expected endurance, strength or class)"
            )),
        }
    }
}
