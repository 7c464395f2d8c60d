//! Tatter CLI: headless cloth runs, presets and snapshot inspection.

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "tatter")]
#[command(version, about = "Tatter: tearable Verlet cloth simulator")]
struct Cli {
    /// Log at debug level (overridden by RUST_LOG).
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a scene headlessly and report metrics.
    Simulate {
        /// Path to run config (TOML). Defaults apply when omitted.
        #[arg(short, long)]
        config: Option<String>,

        /// Scene to load (DEFAULT, CURTAIN, CORNERS, SPHERE, TABLE, all).
        #[arg(short, long)]
        scene: Option<String>,

        /// Material preset applied over the config's state.
        #[arg(short, long)]
        material: Option<String>,

        /// Number of ticks to run.
        #[arg(short, long)]
        ticks: Option<u64>,

        /// Output CSV file path.
        #[arg(short, long)]
        output: Option<String>,

        /// Write the final cloth state to this snapshot file.
        #[arg(long)]
        snapshot: Option<String>,

        /// Forward every cloth event to the log.
        #[arg(long)]
        events: bool,
    },

    /// List the built-in scenes.
    Scenes,

    /// List the material presets.
    Materials,

    /// Inspect a cloth snapshot file.
    Inspect {
        /// Path to snapshot file.
        path: String,
    },

    /// Validate a run config file.
    Validate {
        /// Path to config file (TOML).
        path: String,
    },
}

fn main() {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level)),
        )
        .init();

    let result = match cli.command {
        Commands::Simulate {
            config,
            scene,
            material,
            ticks,
            output,
            snapshot,
            events,
        } => commands::simulate(commands::SimulateArgs {
            config: config.as_deref(),
            scene: scene.as_deref(),
            material: material.as_deref(),
            ticks,
            output: output.as_deref(),
            snapshot: snapshot.as_deref(),
            events,
        }),
        Commands::Scenes => commands::scenes(),
        Commands::Materials => commands::materials(),
        Commands::Inspect { path } => commands::inspect(&path),
        Commands::Validate { path } => commands::validate(&path),
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
