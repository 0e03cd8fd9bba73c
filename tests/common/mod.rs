use pvl_admin::store::{Document, MemoryStore};
use serde_json::{json, Value};

pub fn doc(value: Value) -> Document {
    value.as_object().expect("fixture must be an object").clone()
}

/// a store shaped like production right before the mock-data cleanup ran
pub fn seeded_store() -> MemoryStore {
    let store = MemoryStore::new();

    store.insert(
        "leagues",
        "pvl_2025_season1",
        doc(json!({ "name": "PVL 2025 Season 1" })),
    );
    store.insert(
        "leagues",
        "real_league",
        doc(json!({ "name": "Pro Volleyball League" })),
    );

    for id in ["team_hyderabad_hawks", "team_chennai_blitz"] {
        store.insert("teams", id, doc(json!({ "name": id })));
    }
    store.insert(
        "teams",
        "team_pvl_69",
        doc(json!({ "name": "Ahmedabad Defenders", "logo": "/assets/amd.png" })),
    );

    for i in 1..=4 {
        let id = format!("player_pvl_{i:03}");
        store.insert("players", &id, doc(json!({ "playerId": id })));
    }
    store.insert(
        "players",
        "42",
        doc(json!({
            "playerId": "42",
            "defaultCategory": "setter",
            "defaultCredits": 16.5,
            "nationality": "India"
        })),
    );

    store.insert(
        "teamPlayers",
        "assoc_player_pvl_001",
        doc(json!({ "associationId": "assoc_player_pvl_001", "playerId": "player_pvl_001" })),
    );
    store.insert(
        "teamPlayers",
        "1",
        doc(json!({ "associationId": "1", "playerId": "42" })),
    );

    store.insert(
        "matches",
        "pvl_match_1",
        doc(json!({ "matchId": "pvl_match_1" })),
    );
    store.insert(
        "matches",
        "real_match_1",
        doc(json!({ "matchId": "real_match_1" })),
    );

    store
}
