//! Lorecraft - Entry Point
//!
//! Loads configuration, axioms and a world, then runs a line-based loop
//! that issues progression commands against the simulator.

use clap::Parser;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use lorecraft::axioms::{create_default_axioms, load_axioms};
use lorecraft::command::{parse_command, CommandExecutor};
use lorecraft::core::{LoreConfig, LoreResult};
use lorecraft::core::types::TenantId;
use lorecraft::export::SymbolicExporter;
use lorecraft::simulation::Simulator;
use lorecraft::state::load_world;

/// Lorecraft - axiom-governed character progression
#[derive(Parser, Debug)]
#[command(name = "lorecraft")]
#[command(about = "Simulate character progression under immutable lore axioms")]
struct Args {
    /// Configuration file (TOML)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Axiom file; overrides the config, defaults to the built-in set
    #[arg(long)]
    axioms: Option<PathBuf>,

    /// World file; overrides the config
    #[arg(long)]
    world: Option<PathBuf>,

    /// Export directory; overrides the config
    #[arg(long)]
    export_dir: Option<PathBuf>,

    /// Print command responses as JSON
    #[arg(long, default_value_t = false)]
    json: bool,
}

fn main() -> LoreResult<()> {
    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => LoreConfig::load(path)?,
        None => LoreConfig::default(),
    };
    if let Some(path) = args.axioms {
        config.axioms_file = Some(path);
    }
    if let Some(path) = args.world {
        config.world_file = path;
    }
    if let Some(dir) = args.export_dir {
        config.export.directory = dir;
    }

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.log_filter.as_str()));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    tracing::info!("Lorecraft starting...");

    let axioms = match &config.axioms_file {
        Some(path) => load_axioms(path)?,
        None => create_default_axioms()?,
    };
    let seed = load_world(&config.world_file)?;
    let mut simulator = Simulator::new(TenantId::new(config.tenant.as_str())?, axioms, seed)?;

    println!("\n=== LORECRAFT ===");
    println!("Character progression under immutable lore axioms");
    println!();
    println!("Commands:");
    println!("  levelup <id>                      - Advance a character one level");
    println!("  gain <id> <amount> [source]       - Award experience");
    println!("  stat <id> <stat> <amount> [why]   - Raise a stat");
    println!("  status / s                        - Show the current world");
    println!("  history / h                       - Show the observation log");
    println!("  export [dir]                      - Write the symbolic export");
    println!("  audit                             - Check history against the axioms");
    println!("  replay                            - Rebuild the world from the event log");
    println!("  quit / q                          - Exit");
    println!();

    display_status(&simulator);

    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();
    loop {
        print!("> ");
        io::stdout().flush()?;

        let Some(line) = lines.next() else {
            break;
        };
        let line = line?;
        let input = line.trim();

        if input.is_empty() {
            continue;
        }

        if input == "quit" || input == "q" {
            break;
        }

        if input == "status" || input == "s" {
            display_status(&simulator);
            continue;
        }

        if input == "history" || input == "h" {
            if simulator.history().is_empty() {
                println!("No events yet.");
            }
            for event in simulator.history() {
                print!("{}", event.get_observation_log());
            }
            continue;
        }

        if input == "export" || input.starts_with("export ") {
            let dir = input
                .strip_prefix("export")
                .map(str::trim)
                .filter(|rest| !rest.is_empty())
                .map(PathBuf::from)
                .unwrap_or_else(|| config.export.directory.clone());
            match SymbolicExporter::new(&simulator)
                .with_file_names(&config.export)
                .export(&dir)
            {
                Ok(report) => {
                    for file in report.files() {
                        println!("  {} ({} clauses)", file.path.display(), file.clauses);
                    }
                }
                Err(e) => println!("Export failed: {}", e),
            }
            continue;
        }

        if input == "audit" {
            let violations = simulator.audit();
            if violations.is_empty() {
                println!("No violations across {} events.", simulator.history().len());
            }
            for violation in &violations {
                println!("  {}", violation);
            }
            continue;
        }

        if input == "replay" {
            match simulator.verify_replay() {
                Ok(()) => println!(
                    "Replay of {} events reproduces t{}.",
                    simulator.history().len(),
                    simulator.current_state().time_point()
                ),
                Err(e) => println!("Replay failed: {}", e),
            }
            continue;
        }

        let command = match parse_command(input) {
            Ok(command) => command,
            Err(e) => {
                println!("Could not parse command: {}", e);
                continue;
            }
        };

        let response = match CommandExecutor::execute(&mut simulator, &command) {
            Ok(response) => response,
            Err(e) => {
                tracing::error!("Command '{}' failed: {}", input, e);
                println!("Command failed: {}", e);
                continue;
            }
        };
        if args.json {
            println!("{}", serde_json::to_string_pretty(&response)?);
        } else if let Some(error) = &response.error {
            println!("Denied: {}", error);
        } else if let Some(result) = &response.result {
            for observation in &result.observations {
                print!("{}", observation);
            }
        }
    }

    println!(
        "\nGoodbye! Final state: {} events, world at t{}.",
        simulator.history().len(),
        simulator.current_state().time_point()
    );
    Ok(())
}

/// Display every character in the current snapshot
fn display_status(simulator: &Simulator) {
    let world = simulator.current_state();
    println!();
    println!(
        "--- {} | t{} | {} characters ---",
        world.world(),
        world.time_point(),
        world.len()
    );

    for character in world.characters() {
        let level = character
            .level()
            .map(|l| l.to_string())
            .unwrap_or_else(|| "-".to_string());
        let class = character
            .class()
            .map(|c| c.to_string())
            .unwrap_or_else(|| "classless".to_string());
        let experience = character
            .experience()
            .map(|x| x.to_string())
            .unwrap_or_else(|| "-".to_string());
        let stats: Vec<String> = character
            .stats()
            .iter()
            .map(|(stat, value)| format!("{} {}", stat, value))
            .collect();

        println!(
            "  {} - level {} {}, {} xp, {}",
            character.id(),
            level,
            class,
            experience,
            if stats.is_empty() { "no stats".to_string() } else { stats.join(", ") }
        );
    }
    println!();
}
