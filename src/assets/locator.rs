//! Asset locator
//!
//! Maps a folder, a domain and a leaf name to the storage key shared by
//! the local and remote backends.

use std::fmt;

/// Folder used when a route does not pin one
pub const SCREENSHOTS_FOLDER: &str = "screenshots";

/// Folder the script routes are pinned to
pub const SCRIPTS_FOLDER: &str = "scripts";

/// Storage-relative asset path: `{folder}/{domain}/{leaf}`
///
/// The value is built per request and is not normalized or escaped.
/// Containment is checked by the local sender.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetPath {
    key: String,
    leaf_start: usize,
}

impl AssetPath {
    /// Build the path, falling back to [`SCREENSHOTS_FOLDER`] without a folder hint
    pub fn locate(folder: Option<&str>, domain: &str, leaf: &str) -> Self {
        let folder = folder.unwrap_or(SCREENSHOTS_FOLDER);
        let key = format!("{folder}/{domain}/{leaf}");
        let leaf_start = key.len() - leaf.len();
        Self { key, leaf_start }
    }

    pub fn as_str(&self) -> &str {
        &self.key
    }

    /// The leaf segment (the `cdnPath` route parameter)
    pub fn leaf(&self) -> &str {
        &self.key[self.leaf_start..]
    }

    /// Extension of the leaf, used for content type detection
    pub fn extension(&self) -> Option<&str> {
        let leaf = self.leaf();
        let (stem, ext) = leaf.rsplit_once('.')?;
        if stem.is_empty() || ext.is_empty() {
            None
        } else {
            Some(ext)
        }
    }
}

impl fmt::Display for AssetPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_folder() {
        let path = AssetPath::locate(None, "example.com", "shot1.png");
        assert_eq!(path.as_str(), "screenshots/example.com/shot1.png");
    }

    #[test]
    fn test_scripts_folder() {
        let path = AssetPath::locate(Some(SCRIPTS_FOLDER), "example.com", "fix.js");
        assert_eq!(path.as_str(), "scripts/example.com/fix.js");
        assert_eq!(path.leaf(), "fix.js");
    }

    #[test]
    fn test_no_normalization() {
        let path = AssetPath::locate(None, "a.com", "../b.png");
        assert_eq!(path.as_str(), "screenshots/a.com/../b.png");
        assert_eq!(path.leaf(), "../b.png");
    }

    #[test]
    fn test_extension() {
        assert_eq!(AssetPath::locate(None, "a.com", "x.PNG").extension(), Some("PNG"));
        assert_eq!(AssetPath::locate(None, "a.com", "archive.tar.gz").extension(), Some("gz"));
        assert_eq!(AssetPath::locate(None, "a.com", "README").extension(), None);
        assert_eq!(AssetPath::locate(None, "a.com", ".hidden").extension(), None);
    }
}
