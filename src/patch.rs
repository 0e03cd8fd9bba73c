use crate::AdminError;
use std::fs;
use std::path::Path;

/// Replaces the span `[start_marker, end_marker)` with `replacement`. The end
/// marker is searched at or after the start marker, stays in the output, and
/// `None` means one of the markers wasn't found.
pub fn replace_span(
    content: &str,
    start_marker: &str,
    end_marker: &str,
    replacement: &str,
) -> Option<String> {
    let start = content.find(start_marker)?;
    let end = start + content[start..].find(end_marker)?;
    Some(format!(
        "{}{}{}",
        &content[..start],
        replacement,
        &content[end..]
    ))
}

/// Splices a file in place. Returns false (file untouched) when the markers
/// aren't there; callers report that on the console and move on.
pub fn patch_file(
    path: &Path,
    start_marker: &str,
    end_marker: &str,
    replacement: &str,
) -> Result<bool, AdminError> {
    let content = fs::read_to_string(path)?;
    match replace_span(&content, start_marker, end_marker, replacement) {
        Some(patched) => {
            fs::write(path, patched)?;
            Ok(true)
        }
        None => Ok(false),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SOURCE: &str = "const a = 1;\n} catch (error) {\n  old();\n}\nconst b = 2;\n";

    #[test]
    fn test_replace_span_keeps_end_marker() {
        let patched = replace_span(SOURCE, "} catch (error) {", "const b", "// gone\n").unwrap();
        assert_eq!("const a = 1;\n// gone\nconst b = 2;\n", patched);
    }

    #[test]
    fn test_missing_start_marker() {
        assert!(replace_span(SOURCE, "} finally {", "const b", "x").is_none());
    }

    #[test]
    fn test_missing_end_marker() {
        assert!(replace_span(SOURCE, "} catch (error) {", "const c", "x").is_none());
    }

    #[test]
    fn test_end_marker_only_matches_after_start() {
        // "const a" appears before the start marker; it must not terminate the span
        assert!(replace_span(SOURCE, "} catch (error) {", "const a", "x").is_none());
    }

    #[test]
    fn test_patch_file_round_trip() -> anyhow::Result<()> {
        let dir = std::env::temp_dir().join("pvl-admin-patch-test");
        fs::create_dir_all(&dir)?;
        let path = dir.join("HomePage.tsx");
        fs::write(&path, SOURCE)?;

        let patched = patch_file(&path, "} catch (error) {", "const b", "// fixed\n")?;
        assert!(patched);
        assert_eq!("const a = 1;\n// fixed\nconst b = 2;\n", fs::read_to_string(&path)?);

        // markers are gone now, second run is a no-op
        let patched_again = patch_file(&path, "} catch (error) {", "const b", "// fixed\n")?;
        assert!(!patched_again);
        Ok(())
    }
}
