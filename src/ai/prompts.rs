//! Prompt construction.

use crate::core::{Cycle, CycleFocus, CycleWeek, EquipmentFilter, SessionType, Studio, WeeklyTheme};

/// Prompt for estimating floor area and equipment from a studio photo.
pub fn studio_analysis_prompt() -> String {
    r"Analyze this fitness studio image.
1. Estimate the open floor area roughly in square meters (assume standard ceiling height).
2. List visible functional fitness equipment (e.g., Rowers, Barbells, Rigs, Kettlebells) with a count and a category (cardio, weight, gymnastic or other).
3. Return ONLY valid JSON."
        .to_string()
}

/// Prompt for a periodized multi-week plan.
pub fn macrocycle_prompt(name: &str, focus: CycleFocus, duration_weeks: u32) -> String {
    let themes = WeeklyTheme::ALL
        .iter()
        .map(|t| {
            let info = t.info();
            format!("- {}: {} ({})", t.as_str(), info.description, info.scientific_basis)
        })
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        r#"Create a {duration_weeks}-week periodization plan for a Functional Fitness cycle named "{name}" focused on "{focus}".
The target audience is a general gym population (intermediate).
Apply progressive overload principles and include deload or recovery weeks where appropriate.
Assign each week exactly one of these evidence-based themes:
{themes}

Return a JSON array of exactly {duration_weeks} weeks, numbered from 1."#,
        focus = focus.as_str(),
    )
}

/// Everything a session prompt is built from.
#[derive(Debug, Clone, Copy)]
pub struct SessionPromptInput<'a> {
    pub cycle: &'a Cycle,
    pub week: &'a CycleWeek,
    pub session_type: SessionType,
    /// Studios with their equipment already filtered
    pub studios: &'a [Studio],
    pub filter: &'a EquipmentFilter,
    pub class_size: u32,
}

/// Prompt for one session slot across all studios.
pub fn session_prompt(input: &SessionPromptInput<'_>) -> String {
    let session = input.session_type.config();
    let theme = input.week.theme.info();

    let studios_context = input
        .studios
        .iter()
        .map(|s| {
            let equipment = if s.equipment.is_empty() {
                "bodyweight only".to_string()
            } else {
                s.equipment_summary()
            };
            format!(
                "Studio ID: {}\nName: {}\nSize: {}sqm\nCapacity: {} athletes\nEquipment: {}",
                s.id, s.name, s.size_sqm, s.max_capacity, equipment
            )
        })
        .collect::<Vec<_>>()
        .join("\n---\n");

    let constraints = match input.filter.filter_display() {
        Some(display) => format!("\nEquipment constraints ({display}). Do not program anything else.\n"),
        None => String::new(),
    };

    format!(
        r"Design a single {session_name} workout for Week {week_number} (Focus: {week_focus}).
Session goal: {session_description}.
Weekly theme: {theme_name} - {theme_description}. Scientific basis: {theme_basis}.
Cycle Goal: {cycle_focus}.
Week targets: volume {volume:.0}/100, intensity {intensity:.0}/100.
Class Size: Up to {class_size} people.
{constraints}
CRITICAL: Create the *same intended stimulus* for the following studios, but adapt the exercises based on their specific equipment and space constraints.

Studios Data:
{studios_context}

Cite the scientific sources the session design relies on.
Return a JSON array of workouts (one per studio), using each studio's ID exactly as given.",
        session_name = session.name,
        week_number = input.week.week_number,
        week_focus = input.week.focus,
        session_description = session.description,
        theme_name = theme.name,
        theme_description = theme.description,
        theme_basis = theme.scientific_basis,
        cycle_focus = input.cycle.focus,
        volume = input.week.volume,
        intensity = input.week.intensity,
        class_size = input.class_size,
    )
}
