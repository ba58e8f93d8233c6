use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "habitquest", version, about = "HabitQuest CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create a guest character with the starter stats
    Init {
        /// Character name (defaults to the configured display name)
        #[arg(long)]
        name: Option<String>,
        /// Avatar emoji
        #[arg(long)]
        avatar: Option<String>,
        /// Overwrite an existing guest record
        #[arg(long)]
        force: bool,
    },
    /// Character sheet: title, level, XP progress
    Status {
        /// Machine-readable output
        #[arg(long)]
        json: bool,
    },
    /// Complete a habit for today (by stat name or id)
    Complete { stat: String },
    /// Stat overview
    Stats {
        #[command(subcommand)]
        action: commands::stats::StatsAction,
    },
    /// Habit log queries
    Log {
        #[command(subcommand)]
        action: commands::log::LogAction,
    },
    /// Title tier table and progress to the next tier
    Titles,
    /// Align the stored title with the XP-derived tier
    Reconcile,
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let result = match cli.command {
        Commands::Init { name, avatar, force } => commands::init::run(name, avatar, force).await,
        Commands::Status { json } => commands::status::run(json).await,
        Commands::Complete { stat } => commands::complete::run(&stat).await,
        Commands::Stats { action } => commands::stats::run(action).await,
        Commands::Log { action } => commands::log::run(action).await,
        Commands::Titles => commands::titles::run().await,
        Commands::Reconcile => commands::reconcile::run().await,
        Commands::Config { action } => commands::config::run(action),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
