use pvl_admin::batch::delete_in_batches;
use pvl_admin::constants::{
    LEAGUES, MATCHES, MATCH_PLAYERS, MATCH_SQUADS, PLAYERS, TEAMS, TEAM_PLAYERS,
};
use pvl_admin::report::RunReport;
use pvl_admin::select::{FieldPredicate, Selection};
use pvl_admin::store::{store_from_env, DocumentStore};

/// one-off migration to the normalized schema: drops the legacy per-player
/// matchPlayers documents, players still on the old schema (missing
/// defaultCategory/defaultCredits/nationality), and leftover test matches
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();
    pvl_admin::utils::init_logging();
    let store = store_from_env()?;
    let mut report = RunReport::new("cleanup-old-data");

    println!("Starting cleanup of old fragmented data...");

    println!("\n1. Cleaning up old matchPlayers collection...");
    let keys: Vec<String> = store
        .scan(MATCH_PLAYERS)
        .await?
        .into_iter()
        .map(|(key, _)| key)
        .collect();
    let n = delete_in_batches(&store, MATCH_PLAYERS, &keys).await?;
    report.record("old matchPlayers documents", n, &keys);
    match n {
        0 => println!("No matchPlayers documents to delete"),
        n => println!("Deleted {n} old matchPlayers documents"),
    }

    println!("\n2. Cleaning up old player documents with incomplete schema...");
    let incomplete = Selection::Where(FieldPredicate::MissingAnyOf(vec![
        "defaultCategory".to_string(),
        "defaultCredits".to_string(),
        "nationality".to_string(),
    ]));
    let keys = incomplete.resolve(&store, PLAYERS).await?;
    let n = delete_in_batches(&store, PLAYERS, &keys).await?;
    report.record("incomplete player documents", n, &keys);
    match n {
        0 => println!("No incomplete player documents to delete"),
        n => println!("Deleted {n} old player documents with incomplete schema"),
    }

    println!("\n3. Cleaning up test data...");
    let test_matches = Selection::Where(FieldPredicate::Equals(
        "matchId".to_string(),
        serde_json::json!("test123"),
    ));
    let keys = test_matches.resolve(&store, MATCHES).await?;
    let n = delete_in_batches(&store, MATCHES, &keys).await?;
    report.record("test match documents", n, &keys);
    match n {
        0 => println!("No test match documents to delete"),
        n => println!("Deleted {n} test match documents"),
    }

    println!("\nRemaining data after cleanup:");
    for collection in [PLAYERS, TEAMS, LEAGUES, MATCHES, TEAM_PLAYERS, MATCH_SQUADS] {
        let size = store.scan(collection).await?.len();
        println!("   {collection}: {size} documents");
    }

    report.print_summary();
    Ok(())
}
