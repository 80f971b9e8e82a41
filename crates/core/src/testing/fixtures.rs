//! Builders for test data.

use crate::catalog::GameDraft;
use crate::feed::{FeedDocument, FeedEntry};

/// Build a valid draft with the given identity fields.
pub fn game_draft(name: &str, platform: &str, store_id: &str) -> GameDraft {
    GameDraft {
        publisher_id: "1234".to_string(),
        name: name.to_string(),
        platform: platform.to_string(),
        store_id: store_id.to_string(),
        bundle_id: format!("com.example.{}", store_id),
        app_version: "1.0.0".to_string(),
        is_published: true,
    }
}

/// Build a feed candidate with the given identity fields.
pub fn feed_entry(name: &str, platform: &str, store_id: &str) -> FeedEntry {
    FeedEntry {
        name: name.to_string(),
        platform: platform.to_string(),
        publisher_id: "1234".to_string(),
        store_id: store_id.to_string(),
        bundle_id: format!("com.example.{}", store_id),
        app_version: "1.0.0".to_string(),
    }
}

/// Serialize entries into the feed file format.
pub fn feed_json(entries: &[FeedEntry]) -> String {
    serde_json::to_string_pretty(&FeedDocument {
        games: entries.to_vec(),
    })
    .unwrap()
}

/// Five android candidates with distinct store ids.
pub fn android_top5() -> Vec<FeedEntry> {
    [
        ("PUBG Mobile", "com.tencent.ig"),
        ("Candy Crush Saga", "com.king.candycrushsaga"),
        ("Free Fire", "com.dts.freefireth"),
        ("Subway Surfers", "com.kiloo.subwaysurf"),
        ("Clash of Clans", "com.supercell.clashofclans"),
    ]
    .iter()
    .map(|(name, store_id)| feed_entry(name, "android", store_id))
    .collect()
}

/// Five ios candidates with distinct store ids.
pub fn ios_top5() -> Vec<FeedEntry> {
    [
        ("Roblox", "431946152"),
        ("Minecraft", "479516143"),
        ("Among Us!", "1351168404"),
        ("Monopoly GO!", "1621328561"),
        ("Royal Match", "1482155847"),
    ]
    .iter()
    .map(|(name, store_id)| feed_entry(name, "ios", store_id))
    .collect()
}
