//! Generated workouts and the per-cycle workout book.

use serde::{Deserialize, Serialize};

use super::session::SessionType;

/// A workout generated for one studio, week and session type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Workout {
    pub id: String,
    pub cycle_id: String,
    pub studio_id: String,
    pub week_number: u32,
    pub session_type: SessionType,
    pub title: String,
    pub warmup: String,
    pub skill_strength: String,

    /// Main workout block
    pub wod: String,
    pub cooldown: String,

    /// Adaptations for the studio's constraints
    pub scaling_notes: String,

    /// Logistics for running the class in this space
    pub coach_notes: String,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub scientific_references: Vec<String>,

    /// Equipment this workout was asked to avoid
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub excluded_equipment: Vec<String>,
}

impl Workout {
    /// Whether this workout belongs to a week/session slot.
    pub fn is_for(&self, week_number: u32, session_type: SessionType) -> bool {
        self.week_number == week_number && self.session_type == session_type
    }
}

/// Workouts generated for the active cycle.
///
/// Workouts are keyed by `(week_number, session_type)`. Generating a slot
/// again replaces every workout previously stored for that slot.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WorkoutBook {
    workouts: Vec<Workout>,
}

impl WorkoutBook {
    /// Create an empty book.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace all workouts of a slot with a freshly generated set.
    ///
    /// Workouts of other slots keep their order; the new set is appended.
    /// Returns the number of workouts that were replaced.
    pub fn replace_slot(
        &mut self,
        week_number: u32,
        session_type: SessionType,
        workouts: Vec<Workout>,
    ) -> usize {
        let before = self.workouts.len();
        self.workouts.retain(|w| !w.is_for(week_number, session_type));
        let replaced = before - self.workouts.len();
        self.workouts.extend(workouts);
        replaced
    }

    /// Workouts stored for a slot.
    pub fn slot(&self, week_number: u32, session_type: SessionType) -> Vec<&Workout> {
        self.workouts.iter().filter(|w| w.is_for(week_number, session_type)).collect()
    }

    /// Whether a slot has been generated.
    pub fn has_slot(&self, week_number: u32, session_type: SessionType) -> bool {
        self.workouts.iter().any(|w| w.is_for(week_number, session_type))
    }

    /// All workouts of a week, ordered by session type.
    pub fn week(&self, week_number: u32) -> Vec<&Workout> {
        let mut workouts: Vec<_> =
            self.workouts.iter().filter(|w| w.week_number == week_number).collect();
        workouts.sort_by_key(|w| w.session_type);
        workouts
    }

    /// Drop every workout of a studio. Returns how many were removed.
    pub fn remove_studio(&mut self, studio_id: &str) -> usize {
        let before = self.workouts.len();
        self.workouts.retain(|w| w.studio_id != studio_id);
        before - self.workouts.len()
    }

    /// Remove everything.
    pub fn clear(&mut self) {
        self.workouts.clear();
    }

    /// All workouts in insertion order.
    pub fn all(&self) -> &[Workout] {
        &self.workouts
    }

    pub fn len(&self) -> usize {
        self.workouts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.workouts.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn workout(id: &str, studio: &str, week: u32, session: SessionType) -> Workout {
        Workout {
            id: id.to_string(),
            cycle_id: "c1".to_string(),
            studio_id: studio.to_string(),
            week_number: week,
            session_type: session,
            title: format!("Workout {id}"),
            warmup: String::new(),
            skill_strength: String::new(),
            wod: String::new(),
            cooldown: String::new(),
            scaling_notes: String::new(),
            coach_notes: String::new(),
            scientific_references: Vec::new(),
            excluded_equipment: Vec::new(),
        }
    }

    #[test]
    fn test_replace_slot_only_touches_matching_key() {
        let mut book = WorkoutBook::new();
        book.replace_slot(
            1,
            SessionType::Endurance,
            vec![
                workout("a", "s1", 1, SessionType::Endurance),
                workout("b", "s2", 1, SessionType::Endurance),
            ],
        );
        book.replace_slot(1, SessionType::Strength, vec![workout("c", "s1", 1, SessionType::Strength)]);
        book.replace_slot(2, SessionType::Endurance, vec![workout("d", "s1", 2, SessionType::Endurance)]);

        let replaced = book.replace_slot(
            1,
            SessionType::Endurance,
            vec![workout("e", "s1", 1, SessionType::Endurance)],
        );

        assert_eq!(replaced, 2);
        let ids: Vec<_> = book.all().iter().map(|w| w.id.as_str()).collect();
        assert_eq!(ids, vec!["c", "d", "e"]);
    }

    #[test]
    fn test_slot_lookup() {
        let mut book = WorkoutBook::new();
        book.replace_slot(3, SessionType::Class, vec![workout("a", "s1", 3, SessionType::Class)]);
        assert!(book.has_slot(3, SessionType::Class));
        assert!(!book.has_slot(3, SessionType::Strength));
        assert_eq!(book.slot(3, SessionType::Class).len(), 1);
    }

    #[test]
    fn test_week_is_ordered_by_session() {
        let mut book = WorkoutBook::new();
        book.replace_slot(1, SessionType::Class, vec![workout("a", "s1", 1, SessionType::Class)]);
        book.replace_slot(1, SessionType::Endurance, vec![workout("b", "s1", 1, SessionType::Endurance)]);
        let sessions: Vec<_> = book.week(1).iter().map(|w| w.session_type).collect();
        assert_eq!(sessions, vec![SessionType::Endurance, SessionType::Class]);
    }

    #[test]
    fn test_remove_studio() {
        let mut book = WorkoutBook::new();
        book.replace_slot(
            1,
            SessionType::Class,
            vec![workout("a", "s1", 1, SessionType::Class), workout("b", "s2", 1, SessionType::Class)],
        );
        assert_eq!(book.remove_studio("s1"), 1);
        assert_eq!(book.len(), 1);
    }
}
