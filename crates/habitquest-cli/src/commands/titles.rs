//! Title tier table.

use habitquest_core::progression::{
    next_tier, resolve_tier, star_count_for_title, xp_to_next_tier, TITLE_TIERS,
};

use super::star_bar;

pub async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let session = super::load_session().await?;
    let total_xp = session.profile().map(|p| p.total_xp).unwrap_or(0);
    let current = resolve_tier(total_xp);

    for tier in TITLE_TIERS {
        let marker = if tier.name == current.name { ">" } else { " " };
        println!(
            "{marker} {:>6} XP  {:<16} {}",
            tier.min_xp,
            tier.name,
            star_bar(star_count_for_title(tier.name))
        );
    }

    match next_tier(total_xp) {
        Some(next) => println!(
            "\n{} XP to go until {} ({} / {})",
            xp_to_next_tier(total_xp),
            next.name,
            total_xp,
            next.min_xp
        ),
        None => println!("\nTop of the table. Nothing left to unlock."),
    }
    Ok(())
}
