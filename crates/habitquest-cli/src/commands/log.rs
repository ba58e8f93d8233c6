use clap::Subcommand;

use habitquest_core::HabitLog;

#[derive(Subcommand)]
pub enum LogAction {
    /// Entries for the current local calendar day
    Today,
    /// Every logged completion
    All,
}

fn print_entries(entries: &[&HabitLog]) {
    if entries.is_empty() {
        println!("No completions logged.");
        return;
    }
    for entry in entries {
        let name = entry.stat_name_snapshot.as_deref().unwrap_or("(unknown stat)");
        println!("{}  {}", entry.completed_date, name);
    }
}

pub async fn run(action: LogAction) -> Result<(), Box<dyn std::error::Error>> {
    let session = super::load_session().await?;

    match action {
        LogAction::Today => print_entries(&session.today_logs()),
        LogAction::All => {
            let mut entries: Vec<_> = session.all_logs().iter().collect();
            entries.sort_by_key(|l| l.completed_date);
            print_entries(&entries);
        }
    }
    Ok(())
}
