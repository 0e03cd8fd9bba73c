use clap::Parser;
use pvl_admin::batch::{apply_in_batches, delete_in_batches};
use pvl_admin::constants::{MOCK_LEAGUE_ID, PLAYERS, TEAM_NAME_MAPPING, TEAM_PLAYERS};
use pvl_admin::models::{to_document, Player, TeamPlayer, CREDIT_VALUES};
use pvl_admin::report::RunReport;
use pvl_admin::store::{store_from_env, Document, DocumentStore, Mutation};
use serde::Deserialize;
use std::collections::HashMap;

#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Args {
    /// Squad CSV exported from the league site (Team,First Name,Last Name,Country,Position)
    #[arg(short, long)]
    csv: String,
}

#[derive(Debug, Deserialize)]
struct SquadRow {
    #[serde(rename = "Team")]
    team: String,
    #[serde(rename = "First Name")]
    first_name: String,
    #[serde(rename = "Last Name")]
    last_name: String,
    #[serde(rename = "Country")]
    country: String,
    #[serde(rename = "Position")]
    position: String,
}

/// rebuilds the players and teamPlayers collections from a squad CSV with
/// clean sequential numeric ids
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();
    pvl_admin::utils::init_logging();
    let args = Args::parse();
    let store = store_from_env()?;
    let mut report = RunReport::new("import-squads");

    let team_for: HashMap<&str, (i64, &str)> = TEAM_NAME_MAPPING
        .into_iter()
        .map(|(name, id, code)| (name, (id, code)))
        .collect();

    // start from an empty collection so a rerun never leaves stale
    // associations behind when the CSV shrinks or ids get renumbered
    println!("Clearing existing team-player associations...");
    let existing: Vec<String> = store
        .scan(TEAM_PLAYERS)
        .await?
        .into_iter()
        .map(|(key, _)| key)
        .collect();
    let n = delete_in_batches(&store, TEAM_PLAYERS, &existing).await?;
    report.record("old associations cleared", n, &existing);
    println!("Cleared {n} old associations");

    let mut rdr = csv::Reader::from_path(&args.csv)?;
    let mut player_docs: HashMap<String, Document> = HashMap::new();
    let mut assoc_docs: HashMap<String, Document> = HashMap::new();
    let mut player_keys = vec![];
    let mut assoc_keys = vec![];
    let mut skipped_rows = 0usize;

    for result in rdr.deserialize() {
        let row: SquadRow = result?;
        if row.position.trim().is_empty() || row.team.trim().is_empty() {
            skipped_rows += 1;
            continue;
        }
        let Some((team_id, _code)) = team_for.get(row.team.as_str()) else {
            println!("No team mapping found for {}", row.team);
            skipped_rows += 1;
            continue;
        };

        let player_id = (player_keys.len() + 1).to_string();
        let name = format!("{} {}", row.first_name.trim(), row.last_name.trim())
            .trim()
            .to_string();
        let credits = CREDIT_VALUES[player_keys.len() % CREDIT_VALUES.len()];
        let player = Player::new(player_id.clone(), name, &row.position, row.country, credits);

        let association_id = (assoc_keys.len() + 1).to_string();
        let association = TeamPlayer::new(
            association_id.clone(),
            player_id.clone(),
            format!("team_pvl_{team_id}"),
            MOCK_LEAGUE_ID,
            player.default_category.clone(),
            (player_keys.len() % 99 + 1) as i64,
        );

        player_docs.insert(player_id.clone(), to_document(&player)?);
        assoc_docs.insert(association_id.clone(), to_document(&association)?);
        player_keys.push(player_id);
        assoc_keys.push(association_id);
    }

    println!(
        "Parsed {} players from {} ({} rows skipped)",
        player_keys.len(),
        args.csv,
        skipped_rows
    );

    println!("Creating player documents...");
    let n = apply_in_batches(&store, PLAYERS, &player_keys, |key| {
        Mutation::Set(player_docs[key].clone())
    })
    .await?;
    report.record("players created", n, &player_keys);

    println!("Creating team-player associations...");
    let n = apply_in_batches(&store, TEAM_PLAYERS, &assoc_keys, |key| {
        Mutation::Set(assoc_docs[key].clone())
    })
    .await?;
    report.record("associations created", n, &assoc_keys);
    report.record("rows skipped", skipped_rows, &[]);

    report.print_summary();
    Ok(())
}
