use clap::Parser;
use colored::*;
use eyre::{Context, Result};
use log::info;
use std::fs;
use std::path::{Path, PathBuf};

use freqsched::config::Config;
use freqsched::domain::{FrequencyClass, Schedule, ScheduleDraft};
use freqsched::scheduler::expand_tokens;
use freqsched::store::{FrequencyStore, load_session, save_session};

mod cli;

use cli::Cli;
use cli::commands::Commands;

fn setup_logging(level: Option<&str>) -> Result<()> {
    // Create log directory
    let log_dir = dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("freqsched")
        .join("logs");

    fs::create_dir_all(&log_dir).context("Failed to create log directory")?;

    let log_file = log_dir.join("freqsched.log");

    // Setup env_logger with file output
    let target = Box::new(
        fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&log_file)
            .context("Failed to open log file")?,
    );

    // RUST_LOG wins over the configured level
    let mut builder = env_logger::Builder::new();
    if let Some(level) = level {
        builder.parse_filters(level);
    }
    builder
        .parse_default_env()
        .target(env_logger::Target::Pipe(target))
        .init();

    info!("Logging initialized, writing to: {}", log_file.display());
    Ok(())
}

fn read_draft(path: &Path) -> Result<ScheduleDraft> {
    let content = fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))?;
    let draft: ScheduleDraft =
        serde_yaml::from_str(&content).with_context(|| format!("Failed to parse schedule draft {}", path.display()))?;
    Ok(draft)
}

fn describe(schedule: &Schedule) -> String {
    let definition = &schedule.definition;
    let mut line = format!(
        "{:>3}  {:<18} {}",
        schedule.schedule_prefix_id,
        definition.frequency.label(),
        definition.submit_time()
    );
    if let Some(interval) = definition.interval.as_ref().filter(|_| definition.has_intervals) {
        line.push_str(&format!(
            " every {}h{:02}m until {}",
            interval.step_hour,
            interval.step_minute,
            interval.end()
        ));
    }
    if !definition.run_days.is_empty() {
        line.push_str(&format!("  days: {}", definition.run_days.join(", ")));
    }
    if !definition.run_months.is_empty() {
        line.push_str(&format!("  months: {}", definition.run_months.join(", ")));
    }
    if let Some(action) = definition.holiday_action {
        line.push_str(&format!("  holiday: {}", action));
    }
    line
}

fn run_application(cli: &Cli, config: &Config) -> Result<()> {
    info!("Starting application");

    if cli.is_verbose() {
        println!("{}", "Verbose mode enabled".yellow());
    }

    let session_path = cli.session.clone().unwrap_or_else(|| config.session.path.clone());

    match &cli.command {
        Commands::Expand { file } => handle_expand_command(file, config),
        Commands::Check { file } => handle_check_command(file, &session_path, config),
        Commands::Add { file } => handle_add_command(file, &session_path, config),
        Commands::Update { id, file } => handle_update_command(id, file, &session_path, config),
        Commands::Remove { id } => handle_remove_command(id, &session_path, config),
        Commands::List { class } => handle_list_command(class.as_deref(), &session_path, config),
        Commands::Clear => handle_clear_command(&session_path, config),
    }
}

fn open_store(session_path: &Path, config: &Config) -> Result<FrequencyStore> {
    load_session(session_path, config.limits())
        .with_context(|| format!("Failed to load session {}", session_path.display()))
}

fn persist(store: &FrequencyStore, session_path: &Path) -> Result<()> {
    save_session(store, session_path).with_context(|| format!("Failed to save session {}", session_path.display()))
}

fn handle_expand_command(file: &Path, config: &Config) -> Result<()> {
    info!("Expanding draft: {}", file.display());
    let draft = read_draft(file)?;
    draft.validate(config.schedules.min_interval_minutes)?;
    let tokens = expand_tokens(&draft)?;
    println!("{} {}", "Run times:".green(), tokens.join(", "));
    Ok(())
}

fn handle_check_command(file: &Path, session_path: &Path, config: &Config) -> Result<()> {
    info!("Checking draft: {}", file.display());
    let draft = read_draft(file)?;
    let store = open_store(session_path, config)?;

    match store.check_schedule(&draft) {
        Ok(prefix_id) => {
            println!("{} would be added as {}", "OK:".green(), prefix_id);
            Ok(())
        }
        Err(e) => {
            println!("{} {}", "Rejected:".red(), e);
            Err(e.into())
        }
    }
}

fn handle_add_command(file: &Path, session_path: &Path, config: &Config) -> Result<()> {
    info!("Adding draft: {}", file.display());
    let draft = read_draft(file)?;
    let mut store = open_store(session_path, config)?;

    let added = store.add_schedule(draft).context("Schedule was not added")?;
    println!("{} {}", "Added:".green(), describe(added));

    persist(&store, session_path)
}

fn handle_update_command(id: &str, file: &Path, session_path: &Path, config: &Config) -> Result<()> {
    info!("Updating schedule {} from {}", id, file.display());
    let draft = read_draft(file)?;
    let mut store = open_store(session_path, config)?;

    // Accept the prefix id as well as the opaque id
    let target = store
        .get_schedule(id)
        .map(|s| s.id.clone())
        .ok_or_else(|| freqsched::FreqError::ScheduleNotFound(id.to_string()))?;

    let updated = store.update_schedule(&target, draft).context("Schedule was not updated")?;
    println!("{} {}", "Updated:".green(), describe(updated));

    persist(&store, session_path)
}

fn handle_remove_command(id: &str, session_path: &Path, config: &Config) -> Result<()> {
    info!("Removing schedule: {}", id);
    let mut store = open_store(session_path, config)?;

    let removed = store.remove_schedule(id)?;
    println!("{} {}", "Removed:".yellow(), describe(&removed));

    persist(&store, session_path)
}

fn handle_list_command(class: Option<&str>, session_path: &Path, config: &Config) -> Result<()> {
    info!("Listing schedules - class: {:?}", class);
    let store = open_store(session_path, config)?;

    let schedules: Vec<&Schedule> = match class {
        Some(c) => {
            let class: FrequencyClass = c.parse()?;
            store.schedules_in_class(class)
        }
        None => store.schedules().iter().collect(),
    };

    if schedules.is_empty() {
        println!("{}", "No schedules".cyan());
        return Ok(());
    }

    for schedule in schedules {
        println!(
            "{}  {}",
            describe(schedule),
            schedule.created_at.format("(added %Y-%m-%d %H:%M)").to_string().dimmed()
        );
    }
    Ok(())
}

fn handle_clear_command(session_path: &Path, config: &Config) -> Result<()> {
    info!("Clearing session: {}", session_path.display());
    let mut store = open_store(session_path, config)?;
    store.clear();
    println!("{}", "Session cleared".cyan());
    persist(&store, session_path)
}

fn main() -> Result<()> {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Load configuration
    let config = Config::load(cli.config.as_ref()).context("Failed to load configuration")?;

    // Setup logging with the configured level
    setup_logging(config.log_level.as_deref()).context("Failed to setup logging")?;

    info!("Starting with config from: {:?}", cli.config);

    // Run the main application logic
    run_application(&cli, &config).context("Application failed")?;

    Ok(())
}
