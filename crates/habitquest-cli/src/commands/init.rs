//! Guest onboarding: seed the local mirror with a starter record.

use habitquest_core::storage::local::LocalMirror;
use habitquest_core::{Config, GuestRecord};

pub async fn run(
    name: Option<String>,
    avatar: Option<String>,
    force: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load_or_default();
    let mirror = LocalMirror::open()?;

    if mirror.path().exists() && !force {
        return Err("a guest record already exists; re-run with --force to replace it".into());
    }

    let name = name.unwrap_or_else(|| config.display.character_name.clone());
    let avatar = avatar.unwrap_or_else(|| config.display.avatar.clone());
    let record = GuestRecord::starter(&name, &avatar);
    mirror.initialize(&record)?;

    println!("{avatar} {name} is ready.");
    println!("Starter stats:");
    for stat in &record.stats {
        println!("  {} {}", stat.emoji, stat.stat_name);
    }
    println!("Complete one with `habitquest complete <stat>`.");
    Ok(())
}
