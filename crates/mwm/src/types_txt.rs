//! Loads the external `types.txt` line list that maps a feature's type
//! indices (stored in `dat`) to human-readable type strings. The file
//! itself lives outside any MWM container; the reference implementation
//! looked it up relative to the install directory, but this crate takes an
//! explicit path instead.

use std::path::Path;

/// Read `path` into an ordered list of type strings, one per line, with `|`
/// replaced by `-` (the on-disk separator the reference data uses is not
/// valid in this crate's `Feature::types` representation). A missing file
/// is not an error: the caller simply gets an empty list, so a reader that
/// never needs type names doesn't need the file to exist.
pub fn read_types(path: &Path) -> Vec<String> {
    let Ok(contents) = std::fs::read_to_string(path) else {
        log::warn!("types.txt not found at {}, type names will be unavailable", path.display());
        return Vec::new();
    };

    contents
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(|line| line.replace('|', "-"))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_yields_empty_list() {
        assert!(read_types(Path::new("/nonexistent/types.txt")).is_empty());
    }

    #[test]
    fn blank_lines_are_skipped_to_keep_indices_aligned() {
        let path = std::env::temp_dir().join("mwm_types_txt_blank_lines_test.txt");
        std::fs::write(&path, "highway-primary\n\n   \nnatural|wood\n").unwrap();
        let types = read_types(&path);
        std::fs::remove_file(&path).ok();
        assert_eq!(types, vec!["highway-primary".to_string(), "natural-wood".to_string()]);
    }
}
