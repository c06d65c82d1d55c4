//! # Studiocycle
//!
//! AI-assisted training cycle planner for functional fitness studios.
//!
//! Studiocycle keeps a small set of studios with their equipment, plans
//! multi-week HYROX-style cycles and generates the three weekly sessions for
//! every studio by delegating content generation to Google Gemini.
//!
//! ## Features
//!
//! - **Studio analysis**: estimate floor area and equipment from a photo
//! - **Cycle planning**: periodized weeks with theme, volume and intensity
//! - **Session generation**: the same stimulus adapted to each studio's equipment
//! - **Equipment constraints**: cycle-wide allow lists and per-session exclusions
//!
//! ## Quick Start
//!
//! ```bash
//! # Store your Gemini API key
//! studiocycle key set
//!
//! # Plan an 8-week cycle and generate week 1's strength session
//! studiocycle cycle create --name "Winter Hyrox Prep" --weeks 8
//! studiocycle session generate --week 1 --type strength
//! ```

#![forbid(unsafe_code)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
// Allow common patterns that are intentional in this codebase
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_const_for_fn)]
#![allow(clippy::doc_markdown)]
#![allow(clippy::derivable_impls)]
#![allow(clippy::return_self_not_must_use)]
#![allow(clippy::option_if_let_else)]
#![allow(clippy::too_many_lines)]
#![allow(clippy::uninlined_format_args)]
#![allow(clippy::redundant_closure_for_method_calls)]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::missing_panics_doc)]

pub mod ai;
pub mod core;
pub mod security;

#[cfg(feature = "ai")]
pub use ai::GeminiProvider;
pub use ai::{AIError, GenerationClient, GenerationRequest, ImagePayload, Planner};

pub use security::{SecretValue, SecretsManager};

// Re-export commonly used types
pub use core::{
    Config, Cycle, CycleFocus, CycleWeek, Equipment, EquipmentCategory, PlanError, SessionType,
    Studio, WeeklyTheme, Workout, Workspace, WorkspaceManager,
};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Application name
pub const APP_NAME: &str = "studiocycle";
