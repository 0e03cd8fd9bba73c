pub const SERVICE_ACCOUNT_FILE_VAR: &str = "SERVICE_ACCOUNT_FILE";
pub const STORE_PROJECT_ID_VAR: &str = "STORE_PROJECT_ID";
pub const STORE_HOST_VAR: &str = "STORE_HOST";
pub const STORE_AUTH_TOKEN_VAR: &str = "STORE_AUTH_TOKEN";

pub const LOG4RS_CONF_FILE_VAR: &str = "LOG4RS_CONFIG_FILE";

pub const DEFAULT_STORE_HOST: &str = "https://firestore.googleapis.com";

/// hard cap the store enforces on writes per atomic commit
pub const MAX_BATCH: usize = 500;

/// how many ids a run report keeps per phase for operator visibility
pub const SAMPLE_LIMIT: usize = 5;

pub const LEAGUES: &str = "leagues";
pub const TEAMS: &str = "teams";
pub const PLAYERS: &str = "players";
pub const TEAM_PLAYERS: &str = "teamPlayers";
pub const MATCHES: &str = "matches";
pub const MATCH_SQUADS: &str = "matchSquads";
pub const MATCH_PLAYERS: &str = "matchPlayers";

pub const MOCK_LEAGUE_ID: &str = "pvl_2025_season1";

pub const MOCK_TEAM_IDS: [&str; 10] = [
    "team_hyderabad_hawks",
    "team_calicut_heroes",
    "team_goa_guardians",
    "team_bengaluru_torpedoes",
    "team_kochi_spikers",
    "team_kolkata_thunderbolts",
    "team_mumbai_meteors",
    "team_delhi_toofans",
    "team_ahmedabad_defenders",
    "team_chennai_blitz",
];

/// team document id -> short code, used for code-based logo references
pub const TEAM_CODE_MAPPING: [(&str, &str); 10] = [
    ("team_pvl_69", "AMD"),
    ("team_pvl_72", "BT"),
    ("team_pvl_70", "CH"),
    ("team_pvl_68", "CB"),
    ("team_pvl_372", "DT"),
    ("team_pvl_381", "GG"),
    ("team_pvl_64", "HBH"),
    ("team_pvl_67", "KBS"),
    ("team_pvl_71", "KTB"),
    ("team_pvl_259", "MM"),
];

/// full team name (as it appears in squad CSVs) -> (numeric team id, code)
pub const TEAM_NAME_MAPPING: [(&str, i64, &str); 10] = [
    ("Ahmedabad Defenders", 69, "AMD"),
    ("Bengaluru Torpedoes", 72, "BT"),
    ("Calicut Heroes", 70, "CH"),
    ("Chennai Blitz", 68, "CB"),
    ("Delhi Toofans", 372, "DT"),
    ("Goa Guardians", 381, "GG"),
    ("Hyderabad Black Hawks", 64, "HBH"),
    ("Kochi Blue Spikers", 67, "KBS"),
    ("Kolkata Thunderbolts", 71, "KTB"),
    ("Mumbai Meteors", 259, "MM"),
];
