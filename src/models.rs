use crate::store::Document;
use crate::AdminError;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// credit values the import rotates through instead of the original's
/// random pick, so reruns produce identical documents
pub const CREDIT_VALUES: [f64; 3] = [16.0, 16.5, 17.0];

pub fn category_for_position(position: &str) -> &'static str {
    match position {
        "Setter" => "setter",
        "Attacker" | "Outside Hitter" => "attacker",
        "Universal" => "universal",
        "Blocker" | "Middle Blocker" => "blocker",
        "Libero" => "libero",
        _ => "universal",
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Player {
    pub player_id: String,
    pub name: String,
    pub position: String,
    pub nationality: String,
    pub default_category: String,
    pub default_credits: f64,
}

impl Player {
    pub fn new(
        player_id: String,
        name: String,
        position: &str,
        nationality: String,
        default_credits: f64,
    ) -> Self {
        Self {
            player_id,
            name,
            position: position.to_string(),
            nationality,
            default_category: category_for_position(position).to_string(),
            default_credits,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamPlayer {
    pub association_id: String,
    pub player_id: String,
    pub team_id: String,
    pub league_id: String,
    pub season: String,
    pub jersey_number: i64,
    pub role: String,
    pub start_date: String,
    pub end_date: String,
    pub is_active: bool,
    pub created_at: String,
}

impl TeamPlayer {
    pub fn new(
        association_id: String,
        player_id: String,
        team_id: String,
        league_id: &str,
        role: String,
        jersey_number: i64,
    ) -> Self {
        Self {
            association_id,
            player_id,
            team_id,
            league_id: league_id.to_string(),
            season: "2025".to_string(),
            jersey_number,
            role,
            start_date: "2025-02-01".to_string(),
            end_date: "2025-04-30".to_string(),
            is_active: true,
            created_at: Utc::now().to_rfc3339(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TeamRef {
    pub name: String,
    pub code: String,
    pub logo: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchInfo {
    pub match_id: String,
    pub team1: TeamRef,
    pub team2: TeamRef,
    pub start_time: String,
    pub status: String,
    pub league: String,
}

/// serde structs -> the field map the store speaks
pub fn to_document<T: Serialize>(value: &T) -> Result<Document, AdminError> {
    match serde_json::to_value(value)? {
        Value::Object(fields) => Ok(fields),
        other => Err(AdminError::MalformedResponse(format!(
            "expected an object, serialized to {other}"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_player_document_uses_store_field_names() {
        let player = Player::new(
            "42".to_string(),
            "Mohan Ukkrapandian".to_string(),
            "Setter",
            "India".to_string(),
            16.5,
        );
        let doc = to_document(&player).unwrap();
        assert_eq!(Some("setter"), doc.get("defaultCategory").and_then(|v| v.as_str()));
        assert_eq!(Some(16.5), doc.get("defaultCredits").and_then(|v| v.as_f64()));
        assert_eq!(Some("India"), doc.get("nationality").and_then(|v| v.as_str()));
    }

    #[test]
    fn test_position_category_mapping() {
        assert_eq!("blocker", category_for_position("Middle Blocker"));
        assert_eq!("attacker", category_for_position("Outside Hitter"));
        assert_eq!("universal", category_for_position("Something New"));
    }

    #[test]
    fn test_match_round_trips_through_json() {
        let json = serde_json::json!({
            "matchId": "match_1",
            "team1": { "name": "Mumbai Thunder", "code": "MUM", "logo": "l1" },
            "team2": { "name": "Delhi Dynamos", "code": "DEL", "logo": "l2" },
            "startTime": "2025-02-01T18:00:00Z",
            "status": "upcoming",
            "league": "Pro Volleyball League"
        });
        let m: MatchInfo = serde_json::from_value(json).unwrap();
        assert_eq!("match_1", m.match_id);
        let doc = to_document(&m).unwrap();
        assert!(doc.contains_key("startTime"));
    }
}
