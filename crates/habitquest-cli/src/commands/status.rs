//! Character sheet output.

use habitquest_core::progression::{resolve_tier, star_count_for_title, xp_to_next_tier};

use super::star_bar;

pub async fn run(json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let session = super::load_session().await?;
    let Some(profile) = session.profile() else {
        println!("No character yet. Run `habitquest init` to create one.");
        return Ok(());
    };

    let title = profile
        .current_title
        .clone()
        .unwrap_or_else(|| resolve_tier(profile.total_xp).name.to_string());
    let stars = star_count_for_title(&title);

    if json {
        let payload = serde_json::json!({
            "character_name": profile.character_name,
            "avatar": profile.avatar,
            "total_xp": profile.total_xp,
            "level": session.level(),
            "xp_progress": session.xp_progress(),
            "xp_to_next_level": session.xp_to_next_level(),
            "title": title,
            "stars": stars,
            "xp_to_next_title": xp_to_next_tier(profile.total_xp),
            "completed_today": session.today_logs().len(),
            "stat_count": session.stats().len(),
        });
        println!("{}", serde_json::to_string_pretty(&payload)?);
        return Ok(());
    }

    println!("{} {}", profile.avatar, profile.character_name);
    println!("{} {}", title, star_bar(stars));
    println!(
        "Level {} · {} XP · {} XP to next level",
        session.level(),
        profile.total_xp,
        session.xp_to_next_level()
    );
    println!(
        "Completed today: {}/{}",
        session.today_logs().len(),
        session.stats().len()
    );
    Ok(())
}
