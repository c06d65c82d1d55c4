//! Studiocycle - AI-assisted training cycle planner.
//!
//! Manages studios and their equipment, plans multi-week cycles and
//! generates weekly sessions for every studio.

#![allow(clippy::single_match_else)]

use std::future::Future;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::time::Duration;

use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::{generate, Shell};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use studiocycle::core::{
    loading_message, Config, CycleFocus, Equipment, EquipmentCategory, SessionType, Studio,
    WeeklyTheme, Workout, Workspace, WorkspaceManager, HYROX_EQUIPMENT, HYROX_EQUIPMENT_NAMES,
    SCIENTIFIC_SOURCES,
};
use studiocycle::security::{SecretValue, SecretsError, SecretsManager};

/// AI-assisted training cycle planner for functional fitness studios
#[derive(Parser)]
#[command(name = "studiocycle")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Subcommand to run
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Workspace file to use instead of the default
    #[arg(long, global = true, env = "STUDIOCYCLE_WORKSPACE")]
    workspace: Option<PathBuf>,

    /// Gemini API key (overrides the stored key)
    #[arg(long, global = true)]
    api_key: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Dashboard overview of studios and the active cycle
    Status,

    /// Manage studios and their equipment
    Studio {
        /// Studio operation
        #[command(subcommand)]
        operation: StudioOperation,
    },

    /// Plan and inspect the training cycle
    Cycle {
        /// Cycle operation
        #[command(subcommand)]
        operation: CycleOperation,
    },

    /// Generate and view weekly sessions
    Session {
        /// Session operation
        #[command(subcommand)]
        operation: SessionOperation,
    },

    /// Show session types, weekly themes, HYROX equipment and sources
    Catalog,

    /// Manage the stored Gemini API key
    Key {
        /// Key operation
        #[command(subcommand)]
        operation: KeyOperation,
    },

    /// Show or update the coach profile
    Profile {
        /// Profile operation
        #[command(subcommand)]
        operation: ProfileOperation,
    },

    /// Show configuration
    Config {
        /// Show config file path
        #[arg(long)]
        path: bool,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        shell: Shell,
    },
}

#[derive(Subcommand)]
enum StudioOperation {
    /// List all studios
    List {
        /// Output format (text, json)
        #[arg(short, long, default_value = "text")]
        format: String,
    },

    /// Add a studio manually
    Add {
        /// Studio name
        name: String,

        /// Location (city, district)
        #[arg(short, long, default_value = "")]
        location: String,

        /// Open floor area in square meters
        #[arg(short, long)]
        size: f64,

        /// Maximum athletes per class (derived from size if omitted)
        #[arg(short, long)]
        capacity: Option<u32>,
    },

    /// Add a studio by analysing a photo of it
    Analyze {
        /// Photo of the studio floor
        photo: PathBuf,

        /// Name for the new studio
        #[arg(short, long)]
        name: Option<String>,
    },

    /// Remove a studio and its generated workouts
    Remove {
        /// Studio ID
        id: String,
    },

    /// Add or update an equipment item
    Equip {
        /// Studio ID
        id: String,

        /// Equipment name
        name: String,

        /// How many the studio has
        #[arg(short, long, default_value = "1")]
        quantity: u32,

        /// Category (cardio, weight, gymnastic, other)
        #[arg(short, long, default_value = "other")]
        category: EquipmentCategory,
    },

    /// Remove an equipment item
    Unequip {
        /// Studio ID
        id: String,

        /// Equipment name
        name: String,
    },
}

#[derive(Subcommand)]
enum CycleOperation {
    /// Generate a new cycle (replaces the active one)
    Create {
        /// Cycle name
        #[arg(short, long)]
        name: Option<String>,

        /// Focus (hyrox, crossfit, general_strength, endurance)
        #[arg(short, long, default_value = "hyrox")]
        focus: CycleFocus,

        /// Duration in weeks
        #[arg(short, long)]
        weeks: Option<u32>,

        /// Limit every session to this equipment (repeatable)
        #[arg(short, long)]
        equipment: Vec<String>,

        /// Limit every session to the core HYROX station equipment
        #[arg(long, conflicts_with = "equipment")]
        hyrox_equipment: bool,
    },

    /// Show the active cycle
    Show {
        /// Output format (text, json)
        #[arg(short, long, default_value = "text")]
        format: String,
    },

    /// Drop the active cycle and its workouts
    Clear,
}

#[derive(Subcommand)]
enum SessionOperation {
    /// Generate workouts for every studio (replaces earlier results for the slot)
    Generate {
        /// Week number
        #[arg(short, long)]
        week: u32,

        /// Session type (endurance, strength, class)
        #[arg(short = 't', long = "type")]
        session_type: SessionType,

        /// Equipment to leave out of this session (repeatable)
        #[arg(short = 'x', long)]
        exclude: Vec<String>,
    },

    /// Show generated workouts
    Show {
        /// Week number
        #[arg(short, long)]
        week: u32,

        /// Only this session type
        #[arg(short = 't', long = "type")]
        session_type: Option<SessionType>,

        /// Only this studio
        #[arg(short, long)]
        studio: Option<String>,

        /// Output format (text, json)
        #[arg(short, long, default_value = "text")]
        format: String,
    },
}

#[derive(Subcommand)]
enum KeyOperation {
    /// Store the API key in the system keychain
    Set {
        /// API key (read from stdin if omitted)
        key: Option<String>,
    },

    /// Show whether a key is available
    Status,

    /// Remove the stored key
    Clear,
}

#[derive(Subcommand)]
enum ProfileOperation {
    /// Show the coach profile
    Show,

    /// Update profile fields
    Set {
        /// Coach name
        #[arg(long)]
        name: Option<String>,

        /// Role
        #[arg(long)]
        role: Option<String>,

        /// Email address
        #[arg(long)]
        email: Option<String>,

        /// Gym name
        #[arg(long)]
        gym_name: Option<String>,
    },
}

fn main() -> Result<()> {
    let _ = dotenvy::dotenv();
    let cli = Cli::parse();

    // Setup logging
    let filter = if cli.verbose { EnvFilter::new("debug") } else { EnvFilter::new("warn") };

    tracing_subscriber::registry().with(fmt::layer().with_target(false)).with(filter).init();

    let ctx = Context { workspace: cli.workspace, api_key: cli.api_key };

    match cli.command {
        Commands::Status => cmd_status(&ctx)?,
        Commands::Studio { operation } => cmd_studio(&ctx, operation)?,
        Commands::Cycle { operation } => cmd_cycle(&ctx, operation)?,
        Commands::Session { operation } => cmd_session(&ctx, operation)?,
        Commands::Catalog => cmd_catalog(),
        Commands::Key { operation } => cmd_key(&ctx, operation)?,
        Commands::Profile { operation } => cmd_profile(operation)?,
        Commands::Config { path } => cmd_config(path)?,
        Commands::Completions { shell } => cmd_completions(shell),
    }

    Ok(())
}

/// Global options shared by subcommands.
struct Context {
    workspace: Option<PathBuf>,
    api_key: Option<String>,
}

impl Context {
    /// Open the workspace from `--workspace`, the config file, or the default location.
    fn open_workspace(&self, config: &Config) -> Result<WorkspaceManager> {
        match self.workspace.clone().or_else(|| config.general.workspace.clone()) {
            Some(path) => WorkspaceManager::with_path(path),
            None => WorkspaceManager::new(),
        }
    }

    /// Resolve the API key from `--api-key`, the environment or the keychain.
    fn api_key(&self) -> Result<SecretValue> {
        if let Some(key) = self.api_key.as_deref().map(str::trim).filter(|k| !k.is_empty()) {
            return Ok(SecretValue::new(key));
        }

        match SecretsManager::new().get_gemini_api_key() {
            Ok((secret, _)) => Ok(secret),
            Err(SecretsError::NotFound(_)) => Err(studiocycle::AIError::MissingApiKey.into()),
            Err(e) => {
                tracing::warn!(error = %e, "Keychain unavailable");
                Err(studiocycle::AIError::MissingApiKey.into())
            }
        }
    }
}

/// Build a planner backed by Gemini.
#[cfg(feature = "ai")]
fn build_planner(
    ctx: &Context,
    config: &Config,
) -> Result<studiocycle::Planner<studiocycle::GeminiProvider>> {
    let provider = studiocycle::GeminiProvider::new(&config.ai, ctx.api_key()?)?;
    Ok(studiocycle::Planner::with_config(provider, &config.planning))
}

#[cfg(not(feature = "ai"))]
fn build_planner(_ctx: &Context, _config: &Config) -> Result<studiocycle::Planner<NoGeneration>> {
    anyhow::bail!("Generation is not available - compile with the 'ai' feature")
}

/// Placeholder client for builds without the `ai` feature.
#[cfg(not(feature = "ai"))]
struct NoGeneration;

#[cfg(not(feature = "ai"))]
#[async_trait::async_trait]
impl studiocycle::GenerationClient for NoGeneration {
    async fn generate(&self, _request: &studiocycle::GenerationRequest) -> Result<String> {
        anyhow::bail!("Generation is not available")
    }

    fn name(&self) -> &str {
        "none"
    }
}

/// Run a future to completion, printing rotating loading messages to stderr.
fn run_with_progress<F, T>(messages: bool, future: F) -> Result<T>
where
    F: Future<Output = Result<T>>,
{
    let rt = tokio::runtime::Runtime::new()?;

    rt.block_on(async {
        tokio::pin!(future);

        if !messages {
            eprintln!("Generating...");
            return future.await;
        }

        let mut interval = tokio::time::interval(Duration::from_millis(2500));
        let mut tick = 0usize;

        loop {
            tokio::select! {
                result = &mut future => return result,
                _ = interval.tick() => {
                    eprintln!("{}", loading_message(tick));
                    tick += 1;
                }
            }
        }
    })
}

fn print_json<T: serde::Serialize + ?Sized>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Dashboard overview.
fn cmd_status(ctx: &Context) -> Result<()> {
    let config = Config::load()?;
    let manager = ctx.open_workspace(&config)?;
    let workspace = manager.workspace();

    println!("{} ({})\n", config.profile.gym_name, config.profile.name);
    println!("Active studios: {}", workspace.studios.len());

    let Some(cycle) = &workspace.cycle else {
        println!("Current phase:  none - run `studiocycle cycle create`");
        return Ok(());
    };

    println!(
        "Current phase:  {} ({} weeks, {})",
        cycle.name, cycle.duration_weeks, cycle.focus
    );
    println!("Workouts:       {}", workspace.workouts.len());
    if let Some(peak) = cycle.peak_volume_week() {
        println!("Peak volume:    week {} ({:.0})", peak.week_number, peak.volume);
    }
    println!();

    println!("Volume load projection:");
    for week in &cycle.weeks {
        let sessions: Vec<&str> = SessionType::ALL
            .iter()
            .filter(|s| workspace.workouts.has_slot(week.week_number, **s))
            .map(|s| s.as_str())
            .collect();

        println!(
            "  W{:<2} vol {:>3.0} {:<10} int {:>3.0} {:<10} {}",
            week.week_number,
            week.volume,
            bar(week.volume),
            week.intensity,
            bar(week.intensity),
            sessions.join(",")
        );
    }

    Ok(())
}

/// Ten-character bar for a 0-100 value.
fn bar(value: f64) -> String {
    let filled = (value.clamp(0.0, 100.0) / 10.0).round() as usize;
    format!("{}{}", "#".repeat(filled), ".".repeat(10 - filled))
}

/// Handle studio commands.
fn cmd_studio(ctx: &Context, operation: StudioOperation) -> Result<()> {
    let config = Config::load()?;
    let mut manager = ctx.open_workspace(&config)?;

    match operation {
        StudioOperation::List { format } => {
            let studios = &manager.workspace().studios;
            if format == "json" {
                return print_json(studios);
            }

            if studios.is_empty() {
                println!("No studios configured.");
            }
            for studio in studios {
                print_studio(studio);
            }
            return Ok(());
        }

        StudioOperation::Add { name, location, size, capacity } => {
            if !size.is_finite() || size <= 0.0 {
                anyhow::bail!("Size must be a positive number of square meters");
            }

            let mut studio = Studio::new(name, location, size).with_capacity(
                studiocycle::core::capacity_for_area(size, config.planning.sqm_per_athlete),
            );
            if let Some(capacity) = capacity {
                studio = studio.with_capacity(capacity);
            }

            println!("Added studio {} ({})", studio.name, studio.id);
            manager.workspace_mut().add_studio(studio);
        }

        StudioOperation::Analyze { photo, name } => {
            let image = studiocycle::ImagePayload::from_path(&photo)?;
            let planner = build_planner(ctx, &config)?;

            let studio = run_with_progress(
                false,
                planner.studio_from_photo(name.as_deref(), &image, Some(photo.clone())),
            )?;

            print_studio(&studio);
            manager.workspace_mut().add_studio(studio);
        }

        StudioOperation::Remove { id } => {
            let studio = manager.workspace_mut().remove_studio(&id)?;
            println!("Removed studio {} ({})", studio.name, studio.id);
        }

        StudioOperation::Equip { id, name, quantity, category } => {
            let studio = manager.workspace_mut().studio_mut(&id)?;
            let item = Equipment::new(name.trim(), quantity, category);
            let summary = item.summary();
            if studio.set_equipment(item) {
                println!("Updated {summary} in {}", studio.name);
            } else {
                println!("Added {summary} to {}", studio.name);
            }
        }

        StudioOperation::Unequip { id, name } => {
            let studio = manager.workspace_mut().studio_mut(&id)?;
            if !studio.remove_equipment(&name) {
                anyhow::bail!("{} has no equipment named '{}'", studio.name, name);
            }
            println!("Removed {} from {}", name, studio.name);
        }
    }

    manager.save()
}

fn print_studio(studio: &Studio) {
    println!(
        "{} [{}] - {} | {} sqm | max {} athletes",
        studio.name, studio.id, studio.location, studio.size_sqm, studio.max_capacity
    );
    for category in EquipmentCategory::ALL {
        let items: Vec<String> = studio
            .equipment
            .iter()
            .filter(|e| e.category == category)
            .map(Equipment::summary)
            .collect();
        if !items.is_empty() {
            println!("    {:<10} {}", category, items.join(", "));
        }
    }
    if let Some(photo) = &studio.photo {
        println!("    photo      {}", photo.display());
    }
}

/// Handle cycle commands.
fn cmd_cycle(ctx: &Context, operation: CycleOperation) -> Result<()> {
    let config = Config::load()?;
    let mut manager = ctx.open_workspace(&config)?;

    match operation {
        CycleOperation::Create { name, focus, weeks, equipment, hyrox_equipment } => {
            let name = name.unwrap_or_else(|| config.planning.cycle_name.clone());
            let weeks = weeks.unwrap_or(config.planning.cycle_weeks);
            let equipment = if hyrox_equipment {
                HYROX_EQUIPMENT_NAMES.iter().map(|e| (*e).to_string()).collect()
            } else {
                equipment
            };

            let planner = build_planner(ctx, &config)?;
            let cycle =
                run_with_progress(true, planner.create_cycle(&name, focus, weeks, equipment))?;

            print_cycle(&cycle);
            manager.workspace_mut().set_cycle(cycle);
            manager.save()?;
        }

        CycleOperation::Show { format } => {
            let cycle = manager.workspace().active_cycle()?;
            if format == "json" {
                return print_json(cycle);
            }
            print_cycle(cycle);
        }

        CycleOperation::Clear => match manager.workspace_mut().clear_cycle() {
            Some(cycle) => {
                manager.save()?;
                println!("Cleared cycle {}", cycle.name);
            }
            None => println!("No active cycle."),
        },
    }

    Ok(())
}

fn print_cycle(cycle: &studiocycle::Cycle) {
    println!(
        "{} [{}] - {} weeks, {} focus, started {}",
        cycle.name,
        cycle.id,
        cycle.duration_weeks,
        cycle.focus,
        cycle.start_date.format("%Y-%m-%d")
    );
    if !cycle.available_equipment.is_empty() {
        println!("Equipment: {}", cycle.available_equipment.join(", "));
    }
    println!();

    for week in &cycle.weeks {
        println!(
            "  Week {:<2} {:<28} {:<24} vol {:>3.0}  int {:>3.0}",
            week.week_number,
            week.focus,
            week.theme.info().name,
            week.volume,
            week.intensity
        );
    }
}

/// Handle session commands.
fn cmd_session(ctx: &Context, operation: SessionOperation) -> Result<()> {
    let config = Config::load()?;
    let mut manager = ctx.open_workspace(&config)?;

    match operation {
        SessionOperation::Generate { week, session_type, exclude } => {
            let planner = build_planner(ctx, &config)?;
            let workspace: &mut Workspace = manager.workspace_mut();

            let outcome = run_with_progress(
                false,
                planner.regenerate_session(workspace, week, session_type, &exclude),
            )?;

            if outcome.replaced > 0 {
                println!("Replaced {} earlier workout(s).\n", outcome.replaced);
            }
            for workout in &outcome.workouts {
                print_workout(manager.workspace(), workout);
            }
            manager.save()?;
        }

        SessionOperation::Show { week, session_type, studio, format } => {
            let workspace = manager.workspace();
            let workouts: Vec<&Workout> = workspace
                .workouts
                .week(week)
                .into_iter()
                .filter(|w| session_type.map_or(true, |t| w.session_type == t))
                .filter(|w| studio.as_deref().map_or(true, |s| w.studio_id == s))
                .collect();

            if format == "json" {
                return print_json(&workouts);
            }

            if workouts.is_empty() {
                println!("No workouts generated for week {week} yet.");
            }
            for workout in workouts {
                print_workout(workspace, workout);
            }
        }
    }

    Ok(())
}

fn print_workout(workspace: &Workspace, workout: &Workout) {
    let studio = workspace
        .studio(&workout.studio_id)
        .map_or(workout.studio_id.as_str(), |s| s.name.as_str());
    let session = workout.session_type.config();

    println!("== {} | {} | Week {} ==", studio, session.name, workout.week_number);
    println!("{}\n", workout.title);

    for (label, body) in [
        ("WARM-UP", &workout.warmup),
        ("SKILL / STRENGTH", &workout.skill_strength),
        ("WOD", &workout.wod),
        ("COOL-DOWN", &workout.cooldown),
        ("SCALING", &workout.scaling_notes),
        ("COACH NOTES", &workout.coach_notes),
    ] {
        if !body.trim().is_empty() {
            println!("{label}\n{}\n", body.trim());
        }
    }

    if !workout.excluded_equipment.is_empty() {
        println!("Excluded: {}\n", workout.excluded_equipment.join(", "));
    }
    if !workout.scientific_references.is_empty() {
        println!("REFERENCES");
        for reference in &workout.scientific_references {
            println!("  - {reference}");
        }
        println!();
    }
}

/// Print the static planning catalogs.
fn cmd_catalog() {
    println!("Session types:");
    for session in SessionType::ALL {
        let config = session.config();
        println!("  {:<10} {} - {}", session.as_str(), config.name, config.description);
    }

    println!("\nWeekly themes:");
    for theme in WeeklyTheme::ALL {
        let info = theme.info();
        println!(
            "  {:<16} {} - {} [{}]",
            theme.as_str(),
            info.name,
            info.description,
            info.scientific_basis
        );
    }

    println!("\nCycle focus: {}", CycleFocus::ALL.map(|f| f.as_str()).join(", "));

    println!("\nHYROX equipment:");
    for item in HYROX_EQUIPMENT {
        println!("  - {item}");
    }

    println!("\nScientific sources:");
    for source in SCIENTIFIC_SOURCES {
        println!("  - {source}");
    }
}

/// Handle API key commands.
fn cmd_key(ctx: &Context, operation: KeyOperation) -> Result<()> {
    let secrets = SecretsManager::new();

    match operation {
        KeyOperation::Set { key } => {
            let key = match key {
                Some(key) => key,
                None => {
                    print!("Gemini API key: ");
                    io::stdout().flush()?;
                    let mut input = String::new();
                    io::stdin().lock().read_line(&mut input)?;
                    input
                }
            };

            let secret = SecretValue::new(key.trim());
            secrets.store_gemini_api_key(&secret)?;
            println!("API key stored ({}).", secret.masked());
        }

        KeyOperation::Status => {
            if ctx.api_key.is_some() {
                println!("Using key from --api-key");
                return Ok(());
            }
            match secrets.get_gemini_api_key() {
                Ok((secret, source)) => println!("API key {} from {}", secret.masked(), source),
                Err(SecretsError::NotFound(_)) => {
                    println!("No API key configured. Run `studiocycle key set`.");
                }
                Err(e) => return Err(e.into()),
            }
        }

        KeyOperation::Clear => match secrets.delete_gemini_api_key() {
            Ok(()) => println!("API key removed."),
            Err(SecretsError::NotFound(_)) => println!("No stored API key."),
            Err(e) => return Err(e.into()),
        },
    }

    Ok(())
}

/// Handle profile commands.
fn cmd_profile(operation: ProfileOperation) -> Result<()> {
    let mut config = Config::load()?;

    match operation {
        ProfileOperation::Show => {}
        ProfileOperation::Set { name, role, email, gym_name } => {
            let profile = &mut config.profile;
            if let Some(name) = name {
                profile.name = name;
            }
            if let Some(role) = role {
                profile.role = role;
            }
            if let Some(email) = email {
                profile.email = email;
            }
            if let Some(gym_name) = gym_name {
                profile.gym_name = gym_name;
            }
            config.save()?;
            println!("Profile updated.\n");
        }
    }

    let profile = &config.profile;
    println!("Name:  {}", profile.name);
    println!("Role:  {}", profile.role);
    println!("Email: {}", profile.email);
    println!("Gym:   {}", profile.gym_name);

    Ok(())
}

fn cmd_config(show_path: bool) -> Result<()> {
    if show_path {
        if let Some(path) = Config::config_path() {
            println!("{}", path.display());
        }
        return Ok(());
    }

    let config = Config::load()?;
    let toml = toml::to_string_pretty(&config)?;
    println!("{toml}");

    Ok(())
}

/// Generate shell completions.
fn cmd_completions(shell: Shell) {
    let mut cmd = Cli::command();
    generate(shell, &mut cmd, "studiocycle", &mut io::stdout());
}
