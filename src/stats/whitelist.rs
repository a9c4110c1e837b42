use crate::error::{Error, Result};
use serde::Deserialize;
use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::Path;

/// Last `/`-separated segment of a model identifier
pub fn short_name(model: &str) -> &str {
    model.rsplit('/').next().unwrap_or(model)
}

#[derive(Debug, Deserialize)]
struct WhitelistRow {
    name: Option<String>,
    #[serde(default)]
    display: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct SuffixEntry {
    short_lower: String,
    target: String,
}

/// Raw model name to display name mapping
#[derive(Debug, Clone, Default)]
pub struct Whitelist {
    exact: HashMap<String, String>,
    suffixes: Vec<SuffixEntry>,
}

impl Whitelist {
    /// Load from a CSV file with a `name` column and an optional `display` column.
    ///
    /// Returns `Ok(None)` when the file does not exist. Rows without a usable name
    /// are skipped.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Option<Self>> {
        let path = path.as_ref();
        let content = match fs::read(path) {
            Ok(content) => content,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                tracing::info!(path = %path.display(), "No whitelist found, skipping name mapping");
                return Ok(None);
            }
            Err(e) => return Err(Error::Io(e)),
        };

        let whitelist = Self::from_reader(content.as_slice()).map_err(|e| Error::Whitelist {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;

        tracing::info!(
            path = %path.display(),
            entries = whitelist.len(),
            "Loaded model whitelist"
        );

        Ok(Some(whitelist))
    }

    pub fn from_reader<R: io::Read>(reader: R) -> std::result::Result<Self, csv::Error> {
        let mut rdr = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .flexible(true)
            .from_reader(reader);

        let has_name = match rdr.headers() {
            Ok(headers) => headers.iter().any(|h| h == "name"),
            Err(e) => {
                tracing::warn!("Unreadable whitelist header, every row ignored: {}", e);
                return Ok(Self::default());
            }
        };
        if !has_name {
            tracing::warn!("Whitelist has no \"name\" column, every row ignored");
            return Ok(Self::default());
        }

        let mut whitelist = Self::default();
        let mut skipped = 0usize;

        for row in rdr.deserialize::<WhitelistRow>() {
            let row = match row {
                Ok(row) => row,
                Err(e) => {
                    tracing::debug!("Skipping whitelist row: {}", e);
                    skipped += 1;
                    continue;
                }
            };

            match row.name.filter(|n| !n.is_empty()) {
                Some(name) => whitelist.insert(name, row.display),
                None => skipped += 1,
            }
        }

        if skipped > 0 {
            tracing::warn!(skipped, "Ignored unusable whitelist rows");
        }

        Ok(whitelist)
    }

    /// Build from explicit `(raw, display)` pairs
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let mut whitelist = Self::default();
        for (name, display) in pairs {
            whitelist.insert(name.into(), Some(display.into()));
        }
        whitelist
    }

    fn insert(&mut self, name: String, display: Option<String>) {
        let target = match display.filter(|d| !d.is_empty()) {
            Some(display) => display,
            None => short_name(&name).to_string(),
        };

        let short_lower = short_name(&name).to_lowercase();
        if !short_lower.is_empty() && !self.suffixes.iter().any(|e| e.short_lower == short_lower) {
            self.suffixes.push(SuffixEntry {
                short_lower,
                target: target.clone(),
            });
        }

        // First entry for a name wins
        self.exact.entry(name).or_insert(target);
    }

    pub fn len(&self) -> usize {
        self.exact.len()
    }

    pub fn is_empty(&self) -> bool {
        self.exact.is_empty()
    }

    /// Exact lookup of a raw model name
    pub fn lookup(&self, model: &str) -> Option<&str> {
        self.exact.get(model).map(String::as_str)
    }

    /// Entry whose short name is the longest case-insensitive suffix of the model's short name
    pub fn lookup_suffix(&self, model: &str) -> Option<&str> {
        let raw_lower = short_name(model).to_lowercase();
        self.suffixes
            .iter()
            .filter(|e| raw_lower.ends_with(&e.short_lower))
            .max_by_key(|e| e.short_lower.len())
            .map(|e| e.target.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_name() {
        assert_eq!(short_name("koboldcpp/Llama-3-8B"), "Llama-3-8B");
        assert_eq!(short_name("a/b/c"), "c");
        assert_eq!(short_name("plain"), "plain");
    }

    #[test]
    fn test_from_reader_with_display_column() {
        let csv = "name,display\nraw-name-x,Friendly Name\nkoboldcpp/Llama-3-8B,\n";
        let whitelist = Whitelist::from_reader(csv.as_bytes()).unwrap();

        assert_eq!(whitelist.len(), 2);
        assert_eq!(whitelist.lookup("raw-name-x"), Some("Friendly Name"));
        assert_eq!(whitelist.lookup("koboldcpp/Llama-3-8B"), Some("Llama-3-8B"));
        assert_eq!(whitelist.lookup("Llama-3-8B"), None);
    }

    #[test]
    fn test_from_reader_name_only_with_extra_columns() {
        let csv = "name,tags\nKoboldAI/LLaMA2-13B-Tiefighter,popular\n,orphan\n";
        let whitelist = Whitelist::from_reader(csv.as_bytes()).unwrap();

        assert_eq!(whitelist.len(), 1);
        assert_eq!(
            whitelist.lookup("KoboldAI/LLaMA2-13B-Tiefighter"),
            Some("LLaMA2-13B-Tiefighter")
        );
    }

    #[test]
    fn test_missing_name_column_yields_empty() {
        let csv = "model,display\nfoo,Foo\n";
        let whitelist = Whitelist::from_reader(csv.as_bytes()).unwrap();
        assert!(whitelist.is_empty());
    }

    #[test]
    fn test_undecodable_header_yields_empty() {
        let csv: &[u8] = b"na\xffme,display\nraw-name-x,Friendly Name\n";
        let whitelist = Whitelist::from_reader(csv).unwrap();
        assert!(whitelist.is_empty());
    }

    #[test]
    fn test_ragged_rows_are_tolerated() {
        let csv = "name,display\nonly-name\nfull,Full Name,extra\n";
        let whitelist = Whitelist::from_reader(csv.as_bytes()).unwrap();
        assert_eq!(whitelist.lookup("only-name"), Some("only-name"));
    }

    #[test]
    fn test_lookup_suffix_prefers_longest() {
        let whitelist = Whitelist::from_pairs([
            ("org/13B", "Generic"),
            ("org/Tiefighter-13B", "Tiefighter"),
        ]);

        assert_eq!(
            whitelist.lookup_suffix("koboldcpp/LLaMA2-tiefighter-13b"),
            Some("Tiefighter")
        );
        assert_eq!(whitelist.lookup_suffix("aphrodite/Other-13B"), Some("Generic"));
        assert_eq!(whitelist.lookup_suffix("aphrodite/Other-7B"), None);
    }

    #[test]
    fn test_load_missing_file_is_none() {
        let dir = tempfile::tempdir().unwrap();
        let result = Whitelist::load(dir.path().join("models.csv")).unwrap();
        assert!(result.is_none());
    }
}
