use pvl_admin::patch::patch_file;
use std::path::Path;

const CONTESTS_PAGE: &str = "frontend/src/pages/ContestsPage.tsx";

const START_MARKER: &str = "console.error('Error fetching contests', error);";
const END_MARKER: &str = "const sortContests = (contests: Contest[]) => {";

const REPLACEMENT: &str = r#"console.error('Error fetching contests:', error);

      // Show empty state if no real contests available
      setContests([]);
    } finally {
      setLoading(false);
    }
  };

  "#;

/// one-off fix removing the mock-data fallback from the ContestsPage catch block
fn main() -> anyhow::Result<()> {
    if patch_file(Path::new(CONTESTS_PAGE), START_MARKER, END_MARKER, REPLACEMENT)? {
        println!("ContestsPage fixed");
    } else {
        println!("Could not find the sections to fix");
    }
    Ok(())
}
