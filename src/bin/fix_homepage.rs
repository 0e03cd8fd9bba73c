use pvl_admin::patch::patch_file;
use std::path::Path;

const HOMEPAGE: &str = "frontend/src/pages/HomePage.tsx";

const START_MARKER: &str = "} catch (error) {";
const END_MARKER: &str = "const [currentTime, setCurrentTime] = useState(new Date());";

const REPLACEMENT: &str = r#"} catch (error) {
      console.error('Error fetching matches:', error);

      // Show empty state if no real matches available
      setMatches([]);
    } finally {
      setLoading(false);
    }
  };

  "#;

/// one-off fix for the broken fetchMatches error handling on the HomePage
fn main() -> anyhow::Result<()> {
    if patch_file(Path::new(HOMEPAGE), START_MARKER, END_MARKER, REPLACEMENT)? {
        println!("HomePage fetchMatches function fixed");
    } else {
        println!("Could not find the broken section to fix");
    }
    Ok(())
}
