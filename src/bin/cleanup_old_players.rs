use itertools::Itertools;
use pvl_admin::batch::delete_in_batches;
use pvl_admin::constants::{PLAYERS, SAMPLE_LIMIT, TEAM_PLAYERS};
use pvl_admin::report::RunReport;
use pvl_admin::select::NUMERIC_ID;
use pvl_admin::store::{store_from_env, DocumentStore};
use serde_json::Value;

/// drops the pre-renumbering player documents (anything whose id isn't a
/// plain integer) along with the team-player associations that still point
/// at those old ids
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();
    pvl_admin::utils::init_logging();
    let store = store_from_env()?;
    let mut report = RunReport::new("cleanup-old-players");

    println!("Cleaning up old player documents");

    let players = store.scan(PLAYERS).await?;
    let (new_players, old_players): (Vec<_>, Vec<_>) = players
        .into_iter()
        .map(|(key, _)| key)
        .partition(|key| NUMERIC_ID.is_match(key));

    println!(
        "Found {} total player documents:",
        new_players.len() + old_players.len()
    );
    println!("   - {} new documents (numeric IDs)", new_players.len());
    println!("   - {} old documents (messy IDs)", old_players.len());

    if old_players.is_empty() {
        println!("No old documents to clean up!");
    } else {
        println!(
            "Sample old IDs to be deleted: {}",
            old_players.iter().take(SAMPLE_LIMIT).join(", ")
        );
        println!("Deleting {} old player documents...", old_players.len());
    }
    let n = delete_in_batches(&store, PLAYERS, &old_players).await?;
    report.record("old player documents", n, &old_players);

    println!("\nCleaning up old team-player associations...");
    let old_associations: Vec<String> = store
        .scan(TEAM_PLAYERS)
        .await?
        .into_iter()
        .filter(|(_, doc)| {
            // only associations that carry an old-format playerId
            doc.get("playerId")
                .and_then(Value::as_str)
                .map_or(false, |id| !NUMERIC_ID.is_match(id))
        })
        .map(|(key, _)| key)
        .collect();
    println!(
        "Found {} old team-player associations to delete",
        old_associations.len()
    );
    let n = delete_in_batches(&store, TEAM_PLAYERS, &old_associations).await?;
    report.record("old team-player associations", n, &old_associations);

    report.print_summary();
    println!(
        "\nKept {} new player documents with numeric IDs",
        new_players.len()
    );
    Ok(())
}
