use clap::Subcommand;

#[derive(Subcommand)]
pub enum StatsAction {
    /// List stats in display order
    List {
        /// Machine-readable output
        #[arg(long)]
        json: bool,
    },
}

pub async fn run(action: StatsAction) -> Result<(), Box<dyn std::error::Error>> {
    let session = super::load_session().await?;

    match action {
        StatsAction::List { json } => {
            if json {
                println!("{}", serde_json::to_string_pretty(session.stats())?);
                return Ok(());
            }
            if session.stats().is_empty() {
                println!("No stats yet. Run `habitquest init` to create the starter set.");
                return Ok(());
            }
            for stat in session.stats() {
                let marker = if session.can_complete(stat.id) { " " } else { "✓" };
                let description = stat.habit_description.as_deref().unwrap_or("");
                println!(
                    "{marker} {} {:<14} {:>4} pts  {description}",
                    stat.emoji, stat.stat_name, stat.total_points
                );
            }
        }
    }
    Ok(())
}
