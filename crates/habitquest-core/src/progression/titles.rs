//! Title tiers and the resolver mapping accumulated XP to a title.
//!
//! The tier table is a process-wide constant, ascending by threshold with
//! the first entry at zero. Resolution picks the highest threshold not
//! exceeding the input, so the resolved title is monotonic non-decreasing
//! in XP.

/// A named milestone unlocked once XP crosses a fixed threshold.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TitleTier {
    pub min_xp: u32,
    pub name: &'static str,
}

/// Ordered tier table. Thresholds are strictly increasing and unique.
pub const TITLE_TIERS: &[TitleTier] = &[
    TitleTier { min_xp: 0, name: "New Traveler" },
    TitleTier { min_xp: 50, name: "Rising Flame" },
    TitleTier { min_xp: 150, name: "Iron Will" },
    TitleTier { min_xp: 300, name: "Dawn Breaker" },
    TitleTier { min_xp: 600, name: "Storm Chaser" },
    TitleTier { min_xp: 1000, name: "Unbroken" },
    TitleTier { min_xp: 2000, name: "Titan Awakened" },
    TitleTier { min_xp: 3500, name: "Void Walker" },
    TitleTier { min_xp: 5000, name: "Eternal Flame" },
    TitleTier { min_xp: 8000, name: "Mythic" },
    TitleTier { min_xp: 12000, name: "Ascended" },
    TitleTier { min_xp: 20000, name: "Legend Forged" },
    TitleTier { min_xp: 35000, name: "Immortal" },
    TitleTier { min_xp: 50000, name: "Origin" },
    TitleTier { min_xp: 75000, name: "Apex" },
    TitleTier { min_xp: 100000, name: "Shadow Monarch" },
];

/// The highest tier whose threshold does not exceed `total_xp`.
pub fn resolve_tier(total_xp: u32) -> &'static TitleTier {
    let mut current = &TITLE_TIERS[0];
    for tier in TITLE_TIERS {
        if total_xp >= tier.min_xp {
            current = tier;
        } else {
            break;
        }
    }
    current
}

/// The tier immediately above the resolved one, or `None` at the top.
pub fn next_tier(total_xp: u32) -> Option<&'static TitleTier> {
    TITLE_TIERS.iter().find(|tier| tier.min_xp > total_xp)
}

/// XP still needed to reach the next tier, 0 when already at the top.
pub fn xp_to_next_tier(total_xp: u32) -> u32 {
    next_tier(total_xp)
        .map(|tier| tier.min_xp - total_xp)
        .unwrap_or(0)
}

/// Star rating for a title, bucketed by tier index.
///
/// Unknown names fall back to one star rather than failing -- stored
/// titles may predate a table change.
pub fn star_count_for_title(title: &str) -> u8 {
    let Some(index) = TITLE_TIERS.iter().position(|tier| tier.name == title) else {
        return 1;
    };
    match index {
        0..=2 => 1,  // New Traveler -> Iron Will
        3..=5 => 2,  // Dawn Breaker -> Unbroken
        6..=8 => 3,  // Titan Awakened -> Eternal Flame
        9..=12 => 4, // Mythic -> Legend Forged
        _ => 5,      // Immortal -> Shadow Monarch
    }
}
