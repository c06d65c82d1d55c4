//! Core types and functionality for Studiocycle.
//!
//! This module contains the fundamental data structures used throughout
//! the application: studios, cycles, sessions, workouts, configuration and
//! the persisted workspace.

mod catalog;
mod config;
mod cycle;
mod error;
mod filter;
mod id;
mod session;
mod studio;
mod workout;
mod workspace;

pub use catalog::{
    loading_message, HYROX_EQUIPMENT, HYROX_EQUIPMENT_NAMES, LOADING_MESSAGES, SCIENTIFIC_SOURCES,
};
pub use config::{AiConfig, Config, GeneralConfig, PlanningConfig, ProfileConfig};
pub use cycle::{Cycle, CycleFocus, CycleWeek, ThemeInfo, WeeklyTheme, MAX_CYCLE_WEEKS};
pub use error::{PlanError, PlanResult};
pub use filter::EquipmentFilter;
pub use id::generate_id;
pub use session::{SessionConfig, SessionType};
pub use studio::{
    capacity_for_area, demo_studios, Equipment, EquipmentCategory, Studio, SQM_PER_ATHLETE,
};
pub use workout::{Workout, WorkoutBook};
pub use workspace::{Workspace, WorkspaceManager};
