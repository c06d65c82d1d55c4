//! Workspace state and persistence.
//!
//! Holds the studios, the active cycle and its generated workouts, and keeps
//! them in a JSON file between invocations.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use super::{demo_studios, Cycle, PlanError, PlanResult, Studio, WorkoutBook};

/// Current workspace file format version.
const WORKSPACE_VERSION: u32 = 1;

/// Stored application state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Workspace {
    /// Managed studios
    #[serde(default)]
    pub studios: Vec<Studio>,

    /// The cycle being programmed
    #[serde(default)]
    pub cycle: Option<Cycle>,

    /// Workouts generated for the active cycle
    #[serde(default)]
    pub workouts: WorkoutBook,

    /// Version for future migrations
    #[serde(default)]
    pub version: u32,
}

impl Default for Workspace {
    fn default() -> Self {
        Self {
            studios: demo_studios(),
            cycle: None,
            workouts: WorkoutBook::new(),
            version: WORKSPACE_VERSION,
        }
    }
}

impl Workspace {
    /// Look up a studio by id.
    pub fn studio(&self, id: &str) -> Option<&Studio> {
        self.studios.iter().find(|s| s.id == id)
    }

    /// Look up a studio by id for editing.
    pub fn studio_mut(&mut self, id: &str) -> PlanResult<&mut Studio> {
        self.studios
            .iter_mut()
            .find(|s| s.id == id)
            .ok_or_else(|| PlanError::StudioNotFound(id.to_string()))
    }

    /// Add a studio.
    pub fn add_studio(&mut self, studio: Studio) {
        tracing::info!(studio = %studio.id, name = %studio.name, "Studio added");
        self.studios.push(studio);
    }

    /// Remove a studio together with its generated workouts.
    pub fn remove_studio(&mut self, id: &str) -> PlanResult<Studio> {
        let index = self
            .studios
            .iter()
            .position(|s| s.id == id)
            .ok_or_else(|| PlanError::StudioNotFound(id.to_string()))?;

        let studio = self.studios.remove(index);
        let dropped = self.workouts.remove_studio(id);
        tracing::info!(studio = %id, dropped_workouts = dropped, "Studio removed");
        Ok(studio)
    }

    /// Make a cycle the active one, discarding workouts of the previous cycle.
    pub fn set_cycle(&mut self, cycle: Cycle) {
        tracing::info!(cycle = %cycle.id, weeks = cycle.weeks.len(), "Active cycle replaced");
        self.workouts.clear();
        self.cycle = Some(cycle);
    }

    /// Drop the active cycle and its workouts.
    pub fn clear_cycle(&mut self) -> Option<Cycle> {
        self.workouts.clear();
        self.cycle.take()
    }

    /// The active cycle, or an error if none exists.
    pub fn active_cycle(&self) -> PlanResult<&Cycle> {
        self.cycle.as_ref().ok_or(PlanError::NoActiveCycle)
    }
}

/// Loads and saves the workspace file.
#[derive(Debug)]
pub struct WorkspaceManager {
    /// Path to the workspace file
    path: PathBuf,
    /// Loaded state
    workspace: Workspace,
}

impl WorkspaceManager {
    /// Open the workspace at the default location.
    pub fn new() -> anyhow::Result<Self> {
        Self::with_path(Self::default_path()?)
    }

    /// Open the workspace at a custom path (for testing and `--workspace`).
    pub fn with_path(path: PathBuf) -> anyhow::Result<Self> {
        let workspace = Self::load_workspace(&path)?;
        Ok(Self { path, workspace })
    }

    /// Get the default workspace file path.
    pub fn default_path() -> anyhow::Result<PathBuf> {
        let data_dir = dirs::data_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not determine data directory"))?;
        Ok(data_dir.join("studiocycle").join("workspace.json"))
    }

    /// Load the workspace from file, falling back to defaults if absent.
    fn load_workspace(path: &Path) -> anyhow::Result<Workspace> {
        if !path.exists() {
            tracing::debug!(path = %path.display(), "No workspace file, using defaults");
            return Ok(Workspace::default());
        }

        let content = fs::read_to_string(path)?;
        let workspace: Workspace = serde_json::from_str(&content).map_err(|e| {
            anyhow::anyhow!("Workspace file {} is not valid: {e}", path.display())
        })?;
        Ok(workspace)
    }

    /// Save the workspace to file.
    pub fn save(&self) -> anyhow::Result<()> {
        let content = serde_json::to_string_pretty(&self.workspace)?;

        // Ensure parent directory exists
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }

        fs::write(&self.path, content)?;
        tracing::debug!(path = %self.path.display(), "Workspace saved");
        Ok(())
    }

    /// Path of the workspace file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read access to the state.
    pub fn workspace(&self) -> &Workspace {
        &self.workspace
    }

    /// Write access to the state. Call [`save`](Self::save) afterwards.
    pub fn workspace_mut(&mut self) -> &mut Workspace {
        &mut self.workspace
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{CycleFocus, SessionType, Workout};
    use tempfile::TempDir;

    fn workout(studio: &str) -> Workout {
        Workout {
            id: "w1".to_string(),
            cycle_id: "c1".to_string(),
            studio_id: studio.to_string(),
            week_number: 1,
            session_type: SessionType::Strength,
            title: "Sled Day".to_string(),
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
    fn test_default_workspace_has_demo_studios() {
        let workspace = Workspace::default();
        assert_eq!(workspace.studios.len(), 2);
        assert!(workspace.cycle.is_none());
        assert_eq!(workspace.active_cycle(), Err(PlanError::NoActiveCycle));
    }

    #[test]
    fn test_remove_studio_drops_workouts() {
        let mut workspace = Workspace::default();
        workspace.workouts.replace_slot(1, SessionType::Strength, vec![workout("s1"), workout("s2")]);

        let removed = workspace.remove_studio("s1").unwrap();
        assert_eq!(removed.name, "Downtown Box");
        assert_eq!(workspace.workouts.len(), 1);
        assert_eq!(
            workspace.remove_studio("s1"),
            Err(PlanError::StudioNotFound("s1".to_string()))
        );
    }

    #[test]
    fn test_set_cycle_clears_workouts() {
        let mut workspace = Workspace::default();
        workspace.workouts.replace_slot(1, SessionType::Strength, vec![workout("s1")]);
        workspace.set_cycle(Cycle::new("Next", CycleFocus::Endurance, 4, Vec::new()));
        assert!(workspace.workouts.is_empty());
        assert_eq!(workspace.active_cycle().map(|c| c.name.as_str()), Ok("Next"));
    }

    #[test]
    fn test_save_and_reload() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("nested").join("workspace.json");

        let mut manager = WorkspaceManager::with_path(path.clone()).unwrap();
        manager.workspace_mut().add_studio(Studio::new("Harbour Box", "Kiel", 150.0));
        manager.save().unwrap();

        let reloaded = WorkspaceManager::with_path(path).unwrap();
        assert_eq!(reloaded.workspace().studios.len(), 3);
        assert_eq!(reloaded.workspace().studios[2].max_capacity, 25);
    }

    #[test]
    fn test_invalid_file_is_an_error() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("workspace.json");
        fs::write(&path, "not json").unwrap();
        assert!(WorkspaceManager::with_path(path).is_err());
    }
}
