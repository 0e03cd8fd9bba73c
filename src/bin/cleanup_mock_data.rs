use pvl_admin::batch::delete_in_batches;
use pvl_admin::constants::{
    LEAGUES, MATCHES, MATCH_SQUADS, MOCK_LEAGUE_ID, MOCK_TEAM_IDS, PLAYERS, TEAMS, TEAM_PLAYERS,
};
use pvl_admin::report::RunReport;
use pvl_admin::select::Selection;
use pvl_admin::store::{store_from_env, DocumentStore};
use pvl_admin::AdminError;

/// removes the unauthorized mock records that were seeded before the real
/// PVL extraction existed: the fake league, the ten fake teams, and every
/// player/association/match document in the synthetic id families
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();
    pvl_admin::utils::init_logging();
    let store = store_from_env()?;
    let mut report = RunReport::new("cleanup-mock-data");

    println!("Cleaning up unauthorized mock data...");

    println!("Removing mock league...");
    let n = delete_selected(
        &store,
        LEAGUES,
        Selection::ids([MOCK_LEAGUE_ID]),
        &mut report,
        "mock league",
    )
    .await?;
    println!("{n} mock league removed");

    println!("Removing mock teams...");
    let n = delete_selected(
        &store,
        TEAMS,
        Selection::ids(MOCK_TEAM_IDS),
        &mut report,
        "mock teams",
    )
    .await?;
    println!("{n} mock teams removed");

    println!("Removing mock players...");
    let n = delete_selected(
        &store,
        PLAYERS,
        Selection::field_range("playerId", "player_pvl_001", "player_pvl_999"),
        &mut report,
        "mock players",
    )
    .await?;
    println!("{n} mock players removed");

    println!("Removing mock team-player associations...");
    let n = delete_selected(
        &store,
        TEAM_PLAYERS,
        Selection::prefix("associationId", "assoc_player_pvl"),
        &mut report,
        "mock associations",
    )
    .await?;
    println!("{n} mock associations removed");

    println!("Removing mock matches...");
    let n = delete_selected(
        &store,
        MATCHES,
        Selection::prefix("matchId", "pvl_match"),
        &mut report,
        "mock matches",
    )
    .await?;
    println!("{n} mock matches removed");

    println!("Removing mock match squads...");
    let n = delete_selected(
        &store,
        MATCH_SQUADS,
        Selection::prefix("matchId", "pvl_match"),
        &mut report,
        "mock match squads",
    )
    .await?;
    println!("{n} mock match squads removed");

    report.print_summary();
    println!("\nThe database is now clean and ready for real PVL data.");
    Ok(())
}

async fn delete_selected<S: DocumentStore>(
    store: &S,
    collection: &str,
    selection: Selection,
    report: &mut RunReport,
    label: &str,
) -> Result<usize, AdminError> {
    let keys = selection.resolve(store, collection).await?;
    let n = delete_in_batches(store, collection, &keys).await?;
    report.record(label, n, &keys);
    Ok(n)
}
