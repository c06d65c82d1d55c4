//! Response schemas for each generation operation.
//!
//! Schemas use the service's OpenAPI subset (`OBJECT`, `ARRAY`, `STRING`,
//! `NUMBER`, `INTEGER`).

use serde_json::{json, Value};

use crate::core::{EquipmentCategory, WeeklyTheme};

/// Schema for studio photo analysis: floor area estimate plus equipment list.
pub fn studio_analysis_schema() -> Value {
    let categories: Vec<&str> = EquipmentCategory::ALL.iter().map(|c| c.as_str()).collect();

    json!({
        "type": "OBJECT",
        "properties": {
            "sizeEstimate": { "type": "NUMBER" },
            "equipment": {
                "type": "ARRAY",
                "items": {
                    "type": "OBJECT",
                    "properties": {
                        "name": { "type": "STRING" },
                        "quantity": { "type": "NUMBER" },
                        "category": { "type": "STRING", "enum": categories }
                    },
                    "required": ["name", "quantity", "category"]
                }
            }
        },
        "required": ["sizeEstimate", "equipment"]
    })
}

/// Schema for a macrocycle: an array of weeks.
pub fn macrocycle_schema() -> Value {
    let themes: Vec<&str> = WeeklyTheme::ALL.iter().map(|t| t.as_str()).collect();

    json!({
        "type": "ARRAY",
        "items": {
            "type": "OBJECT",
            "properties": {
                "weekNumber": { "type": "INTEGER" },
                "focus": {
                    "type": "STRING",
                    "description": "Main theme of the week (e.g. Accumulation, Deload)"
                },
                "theme": {
                    "type": "STRING",
                    "enum": themes,
                    "description": "Evidence-based weekly training theme"
                },
                "volume": { "type": "NUMBER", "description": "Estimated volume load 0-100" },
                "intensity": {
                    "type": "NUMBER",
                    "description": "Estimated average intensity 0-100"
                }
            },
            "required": ["weekNumber", "focus", "theme", "volume", "intensity"]
        }
    })
}

/// Schema for session workouts: one entry per studio.
pub fn session_schema() -> Value {
    json!({
        "type": "ARRAY",
        "items": {
            "type": "OBJECT",
            "properties": {
                "studioId": { "type": "STRING" },
                "title": { "type": "STRING" },
                "warmup": { "type": "STRING" },
                "skillStrength": { "type": "STRING" },
                "wod": { "type": "STRING" },
                "cooldown": { "type": "STRING" },
                "scalingNotes": { "type": "STRING" },
                "coachNotes": {
                    "type": "STRING",
                    "description": "Logistics for managing the class in this specific space."
                },
                "scientificReferences": {
                    "type": "ARRAY",
                    "items": { "type": "STRING" },
                    "description": "Evidence-based sources for the session design"
                }
            },
            "required": [
                "studioId", "title", "warmup", "skillStrength", "wod",
                "cooldown", "scalingNotes", "coachNotes"
            ]
        }
    })
}
