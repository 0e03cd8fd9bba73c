use chrono::Utc;
use pvl_admin::batch::apply_in_batches;
use pvl_admin::constants::{TEAMS, TEAM_CODE_MAPPING};
use pvl_admin::report::RunReport;
use pvl_admin::store::{store_from_env, Document, DocumentStore, Mutation};
use serde_json::json;
use std::collections::HashMap;

/// points every mapped team at a `team-logo:CODE` reference instead of a
/// bundler-dependent file path; the frontend resolves codes to imported assets
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();
    pvl_admin::utils::init_logging();
    let store = store_from_env()?;
    let mut report = RunReport::new("update-team-logos");

    let code_for: HashMap<&str, &str> = TEAM_CODE_MAPPING.into_iter().collect();

    println!("Fetching teams from database...");
    let teams = store.scan(TEAMS).await?;
    if teams.is_empty() {
        println!("No teams found in database");
        return Ok(());
    }
    println!("Found {} teams in database", teams.len());

    let stamped = Utc::now().to_rfc3339();
    // keep scan order so commits and the report read the same on every run
    let mut updates: Vec<(String, Document)> = vec![];
    let mut skipped = vec![];
    for (team_id, doc) in &teams {
        let Some(code) = code_for.get(team_id.as_str()) else {
            let name = doc.get("name").and_then(|v| v.as_str()).unwrap_or("Unknown");
            println!("No code mapping found for team: {team_id} ({name})");
            skipped.push(team_id.clone());
            continue;
        };
        let fields = json!({
            "logo": format!("team-logo:{code}"),
            "logoCode": code,
            "updatedAt": stamped,
        });
        updates.push((team_id.clone(), fields.as_object().cloned().unwrap_or_default()));
        println!("Queued logo update for {team_id}: team-logo:{code}");
    }

    let keys: Vec<String> = updates.iter().map(|(key, _)| key.clone()).collect();
    let fields_for: HashMap<&str, &Document> =
        updates.iter().map(|(key, fields)| (key.as_str(), fields)).collect();
    println!("\nCommitting {} logo updates...", keys.len());
    let n = apply_in_batches(&store, TEAMS, &keys, |key| {
        Mutation::Update(fields_for[key].clone())
    })
    .await?;

    report.record("teams updated", n, &keys);
    report.record("teams skipped", skipped.len(), &skipped);
    report.print_summary();
    Ok(())
}
