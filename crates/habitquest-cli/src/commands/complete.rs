//! Complete a habit for today.

use habitquest_core::progression::{star_count_for_title, Completion};

use super::star_bar;

pub async fn run(stat: &str) -> Result<(), Box<dyn std::error::Error>> {
    let mut session = super::load_session().await?;
    let Some(stat_id) = super::resolve_stat_id(&session, stat) else {
        return Err(format!("no stat named '{stat}'").into());
    };

    match session.complete_stat(stat_id).await {
        Completion::Completed {
            leveled_up,
            new_level,
            new_title_unlocked,
        } => {
            println!("Completed! +1 XP");
            if leveled_up {
                println!("Level up! You are now level {new_level}.");
            }
            if let Some(title) = new_title_unlocked {
                println!(
                    "New title unlocked: {} {}",
                    title,
                    star_bar(star_count_for_title(&title))
                );
            }
            Ok(())
        }
        Completion::Rejected { message } => Err(message.into()),
    }
}
