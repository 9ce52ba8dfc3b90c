use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use preview_engine::{Document, Files};
use preview_logging::preview_debug;
use serde_json::Value;
use walkdir::WalkDir;

/// Read every regular file below `root`, keyed by its `/`-separated relative path.
pub fn load_files(root: &Path) -> Result<Files> {
    let mut files = Files::new();
    for entry in WalkDir::new(root).follow_links(true) {
        let entry = entry.with_context(|| format!("walking {}", root.display()))?;
        if !entry.file_type().is_file() {
            continue;
        }
        let relative = entry
            .path()
            .strip_prefix(root)
            .with_context(|| format!("{} is outside {}", entry.path().display(), root.display()))?;
        let key = relative
            .components()
            .map(|c| c.as_os_str().to_string_lossy())
            .collect::<Vec<_>>()
            .join("/");
        let bytes =
            fs::read(entry.path()).with_context(|| format!("reading {}", entry.path().display()))?;
        preview_debug!("loaded {key:?} ({} bytes)", bytes.len());
        files.insert(key, Document::from_bytes(bytes));
    }
    Ok(files)
}

/// Options file contents; a missing path means "all defaults".
pub fn load_options(path: Option<&Path>) -> Result<Value> {
    let Some(path) = path else {
        return Ok(Value::Null);
    };
    let text =
        fs::read_to_string(path).with_context(|| format!("reading options {}", path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("parsing options {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::{load_files, load_options};
    use serde_json::json;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn loads_nested_files_with_slash_keys() {
        let temp = TempDir::new().unwrap();
        fs::create_dir_all(temp.path().join("posts/2024")).unwrap();
        fs::write(temp.path().join("index.md"), "home").unwrap();
        fs::write(temp.path().join("posts/2024/first.md"), "first post").unwrap();

        let files = load_files(temp.path()).unwrap();
        let keys: Vec<_> = files.keys().cloned().collect();
        assert_eq!(keys, vec!["index.md", "posts/2024/first.md"]);
        assert_eq!(
            &files["posts/2024/first.md"].buffer().unwrap()[..],
            b"first post"
        );
    }

    #[test]
    fn missing_options_path_means_defaults() {
        assert_eq!(load_options(None).unwrap(), serde_json::Value::Null);
    }

    #[test]
    fn options_file_is_parsed() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("preview.json");
        fs::write(&path, r#"{ "words": 12 }"#).unwrap();
        assert_eq!(load_options(Some(path.as_path())).unwrap(), json!({ "words": 12 }));
    }

    #[test]
    fn malformed_options_file_is_an_error() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("preview.json");
        fs::write(&path, "{ words: ").unwrap();
        assert!(load_options(Some(path.as_path())).is_err());
    }
}
