use clap::{CommandFactory, Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

mod commands;
mod common;

#[derive(Parser)]
#[command(name = "focusboard", version, about = "Focusboard focus timer CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Timer control
    Timer {
        #[command(subcommand)]
        action: commands::timer::TimerAction,
    },
    /// Session history
    Session {
        #[command(subcommand)]
        action: commands::session::SessionAction,
    },
    /// Per-category default durations
    Preset {
        #[command(subcommand)]
        action: commands::preset::PresetAction,
    },
    /// Daily and weekly goals
    Goal {
        #[command(subcommand)]
        action: commands::goal::GoalAction,
    },
    /// Session statistics
    Stats {
        /// Number of trailing days in the daily breakdown (at most 366)
        #[arg(long, default_value = "7", value_parser = clap::value_parser!(u32).range(1..=366))]
        days: u32,
    },
    /// Current day streak
    Streak,
    /// Export sessions as JSON or CSV
    Export {
        /// Output format (defaults to export.default_format)
        #[arg(long)]
        format: Option<String>,
        /// Write to a file instead of stdout
        #[arg(long, short)]
        output: Option<std::path::PathBuf>,
    },
    /// Import sessions from a JSON export
    Import {
        path: std::path::PathBuf,
    },
    /// User preferences stored with the session data
    Settings {
        #[command(subcommand)]
        action: commands::settings::SettingsAction,
    },
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
    /// Print shell completions
    Completions {
        shell: clap_complete::Shell,
    },
}

/// Initialize tracing subscriber with environment filter
fn init_tracing() {
    let env_filter = EnvFilter::try_from_env("FOCUSBOARD_LOG")
        .unwrap_or_else(|_| EnvFilter::new("focusboard_core=warn,focusboard=warn"));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn main() {
    init_tracing();
    let cli = Cli::parse();
    let result = match cli.command {
        Commands::Timer { action } => commands::timer::run(action),
        Commands::Session { action } => commands::session::run(action),
        Commands::Preset { action } => commands::preset::run(action),
        Commands::Goal { action } => commands::goal::run(action),
        Commands::Stats { days } => commands::stats::run_stats(days),
        Commands::Streak => commands::stats::run_streak(),
        Commands::Export { format, output } => commands::transfer::export(format, output),
        Commands::Import { path } => commands::transfer::import(&path),
        Commands::Settings { action } => commands::settings::run(action),
        Commands::Config { action } => commands::config::run(action),
        Commands::Completions { shell } => {
            clap_complete::generate(shell, &mut Cli::command(), "focusboard", &mut std::io::stdout());
            Ok(())
        }
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
