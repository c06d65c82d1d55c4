//! Generation orchestration.
//!
//! The planner builds requests from workspace state, sends them through a
//! [`GenerationClient`] and reconciles the structured results: identifiers
//! are assigned, studios outside the request are dropped, and regenerated
//! sessions replace earlier results for the same week and session type.

use std::collections::HashSet;
use std::path::PathBuf;

use serde::de::DeserializeOwned;
use serde::Deserialize;

use super::prompts::{macrocycle_prompt, session_prompt, studio_analysis_prompt, SessionPromptInput};
use super::schema::{macrocycle_schema, session_schema, studio_analysis_schema};
use super::{AIError, GenerationClient, GenerationRequest, ImagePayload};
use crate::core::{
    capacity_for_area, generate_id, Cycle, CycleFocus, CycleWeek, Equipment, EquipmentCategory,
    EquipmentFilter, PlanError, PlanningConfig, SessionType, Studio, WeeklyTheme, Workout,
    Workspace, MAX_CYCLE_WEEKS,
};

/// Name given to analysed studios when none is provided.
const DEFAULT_STUDIO_NAME: &str = "New Studio";

/// Location recorded for analysed studios.
const AUTO_LOCATION: &str = "Auto-detected";

/// Result of a studio photo analysis.
#[derive(Debug, Clone, PartialEq)]
pub struct StudioAnalysis {
    /// Estimated open floor area in square metres
    pub size_estimate: f64,
    /// Equipment seen in the photo
    pub equipment: Vec<Equipment>,
}

/// Summary of a session regeneration.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionOutcome {
    /// Workouts now stored for the slot
    pub workouts: Vec<Workout>,
    /// Number of earlier workouts that were replaced
    pub replaced: usize,
}

/// Orchestrates generation requests for a workspace.
pub struct Planner<C: GenerationClient> {
    client: C,
    class_size: u32,
    sqm_per_athlete: f64,
}

impl<C: GenerationClient> Planner<C> {
    /// Create a planner with default planning settings.
    pub fn new(client: C) -> Self {
        Self::with_config(client, &PlanningConfig::default())
    }

    /// Create a planner using configured planning settings.
    pub fn with_config(client: C, config: &PlanningConfig) -> Self {
        Self { client, class_size: config.class_size, sqm_per_athlete: config.sqm_per_athlete }
    }

    /// The underlying generation client.
    pub fn client(&self) -> &C {
        &self.client
    }

    /// Estimate floor area and equipment from a studio photo.
    pub async fn analyze_studio_photo(&self, image: &ImagePayload) -> anyhow::Result<StudioAnalysis> {
        let request = GenerationRequest::with_image(
            "studio analysis",
            image,
            studio_analysis_prompt(),
            studio_analysis_schema(),
        );

        let raw: RawAnalysis = self.run(&request).await?;

        let size_estimate = if raw.size_estimate.is_finite() && raw.size_estimate > 0.0 {
            raw.size_estimate
        } else {
            0.0
        };

        let equipment = raw
            .equipment
            .into_iter()
            .filter_map(|item| {
                let name = item.name.trim().to_string();
                let quantity = if item.quantity.is_finite() { item.quantity.round() } else { 0.0 };
                if name.is_empty() || quantity < 1.0 {
                    tracing::warn!(name = %item.name, "Dropping equipment without a count");
                    return None;
                }
                Some(Equipment::new(
                    name,
                    quantity as u32,
                    item.category.unwrap_or(EquipmentCategory::Other),
                ))
            })
            .collect();

        Ok(StudioAnalysis { size_estimate, equipment })
    }

    /// Create a studio from a photo analysis.
    pub async fn studio_from_photo(
        &self,
        name: Option<&str>,
        image: &ImagePayload,
        photo: Option<PathBuf>,
    ) -> anyhow::Result<Studio> {
        let analysis = self.analyze_studio_photo(image).await?;

        let name = name.map(str::trim).filter(|n| !n.is_empty()).unwrap_or(DEFAULT_STUDIO_NAME);
        let mut studio = Studio::new(name, AUTO_LOCATION, analysis.size_estimate)
            .with_capacity(capacity_for_area(analysis.size_estimate, self.sqm_per_athlete))
            .with_equipment(analysis.equipment);
        studio.photo = photo;

        tracing::info!(
            studio = %studio.id,
            size_sqm = studio.size_sqm,
            equipment = studio.equipment.len(),
            "Studio analysed"
        );
        Ok(studio)
    }

    /// Generate the weeks of a cycle.
    ///
    /// Weeks are ordered by the number the model gave them, cut to the
    /// requested duration and renumbered from 1. Loads are clamped to 0-100.
    pub async fn generate_macrocycle(
        &self,
        name: &str,
        focus: CycleFocus,
        duration_weeks: u32,
    ) -> anyhow::Result<Vec<CycleWeek>> {
        validate_duration(duration_weeks)?;

        let request = GenerationRequest::text(
            "macrocycle",
            macrocycle_prompt(name, focus, duration_weeks),
            macrocycle_schema(),
        );

        let mut raw: Vec<RawWeek> = self.run(&request).await?;
        raw.sort_by(|a, b| {
            a.week_number.partial_cmp(&b.week_number).unwrap_or(std::cmp::Ordering::Equal)
        });

        if raw.len() != duration_weeks as usize {
            tracing::warn!(
                requested = duration_weeks,
                returned = raw.len(),
                "Macrocycle length differs from request"
            );
        }

        let weeks: Vec<CycleWeek> = raw
            .into_iter()
            .take(duration_weeks as usize)
            .zip(1..)
            .map(|(week, number)| {
                let mut week = CycleWeek {
                    week_number: number,
                    focus: week.focus.trim().to_string(),
                    theme: week.theme,
                    volume: week.volume,
                    intensity: week.intensity,
                };
                week.clamp_loads();
                week
            })
            .collect();

        if weeks.is_empty() {
            return Err(AIError::InvalidResponse {
                operation: request.operation,
                message: "no weeks returned".to_string(),
            }
            .into());
        }

        Ok(weeks)
    }

    /// Generate a new cycle with the given equipment constraint.
    ///
    /// The cycle's duration is the number of weeks actually planned.
    pub async fn create_cycle(
        &self,
        name: &str,
        focus: CycleFocus,
        duration_weeks: u32,
        available_equipment: Vec<String>,
    ) -> anyhow::Result<Cycle> {
        let weeks = self.generate_macrocycle(name, focus, duration_weeks).await?;
        let cycle = Cycle::new(name, focus, weeks.len() as u32, weeks)
            .with_available_equipment(available_equipment);

        tracing::info!(cycle = %cycle.id, weeks = cycle.weeks.len(), "Cycle generated");
        Ok(cycle)
    }

    /// Generate one workout per studio for a week and session type.
    pub async fn generate_session(
        &self,
        cycle: &Cycle,
        week_number: u32,
        session_type: SessionType,
        studios: &[Studio],
        excluded: &[String],
    ) -> anyhow::Result<Vec<Workout>> {
        let week = cycle
            .week(week_number)
            .ok_or_else(|| PlanError::WeekNotFound { week: week_number, cycle: cycle.name.clone() })?;

        if studios.is_empty() {
            return Err(PlanError::NoStudios.into());
        }

        let filter = EquipmentFilter::new(cycle, excluded);
        let filtered = filter.apply_all(studios);

        let prompt = session_prompt(&SessionPromptInput {
            cycle,
            week,
            session_type,
            studios: &filtered,
            filter: &filter,
            class_size: self.class_size,
        });
        let request = GenerationRequest::text("session", prompt, session_schema());

        let raw: Vec<RawWorkout> = self.run(&request).await?;
        let excluded: Vec<String> =
            excluded.iter().map(|e| e.trim().to_string()).filter(|e| !e.is_empty()).collect();

        let mut seen = HashSet::new();
        let workouts: Vec<Workout> = raw
            .into_iter()
            .filter_map(|w| {
                let studio_id = w.studio_id.trim();
                if !studios.iter().any(|s| s.id == studio_id) {
                    tracing::warn!(studio = %w.studio_id, "Dropping workout for unknown studio");
                    return None;
                }
                if !seen.insert(studio_id.to_string()) {
                    tracing::warn!(studio = %studio_id, "Dropping extra workout for studio");
                    return None;
                }
                Some(Workout {
                    id: generate_id(),
                    cycle_id: cycle.id.clone(),
                    studio_id: studio_id.to_string(),
                    week_number: week.week_number,
                    session_type,
                    title: w.title,
                    warmup: w.warmup,
                    skill_strength: w.skill_strength,
                    wod: w.wod,
                    cooldown: w.cooldown,
                    scaling_notes: w.scaling_notes,
                    coach_notes: w.coach_notes,
                    scientific_references: w.scientific_references,
                    excluded_equipment: excluded.clone(),
                })
            })
            .collect();

        if workouts.is_empty() {
            return Err(AIError::InvalidResponse {
                operation: request.operation,
                message: "no workouts for the requested studios".to_string(),
            }
            .into());
        }

        Ok(workouts)
    }

    /// Generate a session slot for the workspace's active cycle and replace
    /// any workouts previously stored for it.
    pub async fn regenerate_session(
        &self,
        workspace: &mut Workspace,
        week_number: u32,
        session_type: SessionType,
        excluded: &[String],
    ) -> anyhow::Result<SessionOutcome> {
        let cycle = workspace.active_cycle()?;
        let workouts = self
            .generate_session(cycle, week_number, session_type, &workspace.studios, excluded)
            .await?;

        let replaced = workspace.workouts.replace_slot(week_number, session_type, workouts.clone());
        tracing::info!(
            week = week_number,
            session = %session_type,
            generated = workouts.len(),
            replaced,
            "Session generated"
        );

        Ok(SessionOutcome { workouts, replaced })
    }

    /// Send a request and parse the JSON it returns.
    async fn run<T: DeserializeOwned>(&self, request: &GenerationRequest) -> anyhow::Result<T> {
        tracing::debug!(
            provider = self.client.name(),
            operation = request.operation,
            "Sending generation request"
        );
        let text = self.client.generate(request).await?;
        parse_response(request.operation, &text)
    }
}

/// Reject durations outside 1..=MAX_CYCLE_WEEKS.
fn validate_duration(duration_weeks: u32) -> Result<(), PlanError> {
    if duration_weeks == 0 || duration_weeks > MAX_CYCLE_WEEKS {
        return Err(PlanError::InvalidDuration(duration_weeks));
    }
    Ok(())
}

/// Parse a JSON response, tolerating a surrounding markdown code fence.
fn parse_response<T: DeserializeOwned>(operation: &'static str, text: &str) -> anyhow::Result<T> {
    let trimmed = strip_code_fence(text.trim());
    if trimmed.is_empty() {
        return Err(AIError::NoResponse.into());
    }

    serde_json::from_str(trimmed).map_err(|e| {
        tracing::debug!(operation, response = %text, "Unparseable response");
        AIError::InvalidResponse { operation, message: e.to_string() }.into()
    })
}

fn strip_code_fence(text: &str) -> &str {
    let Some(rest) = text.strip_prefix("```") else {
        return text;
    };
    let rest = rest.strip_prefix("json").unwrap_or(rest);
    rest.strip_suffix("```").unwrap_or(rest).trim()
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawAnalysis {
    #[serde(default)]
    size_estimate: f64,
    #[serde(default)]
    equipment: Vec<RawEquipment>,
}

#[derive(Debug, Deserialize)]
struct RawEquipment {
    #[serde(default)]
    name: String,
    #[serde(default)]
    quantity: f64,
    #[serde(default)]
    category: Option<EquipmentCategory>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawWeek {
    #[serde(default)]
    week_number: f64,
    #[serde(default)]
    focus: String,
    theme: WeeklyTheme,
    #[serde(default)]
    volume: f64,
    #[serde(default)]
    intensity: f64,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawWorkout {
    studio_id: String,
    #[serde(default)]
    title: String,
    #[serde(default)]
    warmup: String,
    #[serde(default)]
    skill_strength: String,
    #[serde(default)]
    wod: String,
    #[serde(default)]
    cooldown: String,
    #[serde(default)]
    scaling_notes: String,
    #[serde(default)]
    coach_notes: String,
    #[serde(default)]
    scientific_references: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_code_fence() {
        assert_eq!(strip_code_fence("```json\n[1]\n```"), "[1]");
        assert_eq!(strip_code_fence("```\n{}\n```"), "{}");
        assert_eq!(strip_code_fence("[1]"), "[1]");
    }

    #[test]
    fn test_parse_response_errors() {
        let empty = parse_response::<Vec<u32>>("macrocycle", "  ").unwrap_err();
        assert!(matches!(empty.downcast_ref::<AIError>(), Some(AIError::NoResponse)));

        let invalid = parse_response::<Vec<u32>>("macrocycle", "{oops").unwrap_err();
        assert!(matches!(
            invalid.downcast_ref::<AIError>(),
            Some(AIError::InvalidResponse { operation: "macrocycle", .. })
        ));
    }

    #[test]
    fn test_validate_duration() {
        assert!(validate_duration(1).is_ok());
        assert!(validate_duration(52).is_ok());
        assert_eq!(validate_duration(0), Err(PlanError::InvalidDuration(0)));
        assert_eq!(validate_duration(53), Err(PlanError::InvalidDuration(53)));
    }

    #[test]
    fn test_raw_week_accepts_float_numbers() {
        let week: RawWeek = serde_json::from_str(
            r#"{"weekNumber": 2.0, "focus": "Build", "theme": "zone2", "volume": 55, "intensity": 40.5}"#,
        )
        .unwrap();
        assert_eq!(week.week_number, 2.0);
        assert_eq!(week.theme, WeeklyTheme::Zone2);
    }
}
