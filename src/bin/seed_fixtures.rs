use pvl_admin::batch::apply_in_batches;
use pvl_admin::constants::MATCHES;
use pvl_admin::models::{to_document, MatchInfo};
use pvl_admin::report::RunReport;
use pvl_admin::store::{store_from_env, Document, Mutation};
use std::collections::HashMap;
use std::error::Error;
use std::fs::File;
use std::io::BufReader;

/// seeds the matches collection from a JSON fixture file (one array of
/// match objects); existing documents with the same ids get replaced
#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    dotenv::dotenv().ok();
    pvl_admin::utils::init_logging();
    let mut args = std::env::args().skip(1);
    let filename = args.next().ok_or("Need fixture filename!")?;
    if args.next().is_some() {
        return Err("One argument only!!!!".into());
    }

    let f = File::open(filename)?;
    let br = BufReader::new(f);
    let matches: Vec<MatchInfo> = serde_json::from_reader(br)?;

    let store = store_from_env()?;
    let mut report = RunReport::new("seed-fixtures");

    let mut docs: HashMap<String, Document> = HashMap::new();
    let mut keys = vec![];
    for m in &matches {
        docs.insert(m.match_id.clone(), to_document(m)?);
        keys.push(m.match_id.clone());
        println!("Queued {} ({} vs {})", m.match_id, m.team1.name, m.team2.name);
    }

    let n = apply_in_batches(&store, MATCHES, &keys, |key| {
        Mutation::Set(docs[key].clone())
    })
    .await?;
    report.record("matches seeded", n, &keys);
    report.print_summary();
    Ok(())
}
