//! The installed-package manifest and its `packages.toml` encoding.
//!
//! Each installed repository is one TOML table keyed by repository name:
//!
//! ```toml
//! [widget]
//! owner = "acme"
//! version = "v2"
//! ```
//!
//! Keys are unique case-insensitively and always written in case-insensitive
//! ascending order, so the file stays stable under repeated installs and is
//! easy to edit by hand.
//!
//! Only `owner` and `version` are written back. Anything else a hand edit
//! leaves in the file (extra fields, a second spelling of the same name) is
//! reported by [`Manifest::parse`] as a [`RejectedEntry`], since the next
//! write will not keep it.

use crate::core::{GhpmError, GhpmResult};
use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};
use std::collections::BTreeMap;

/// File name of the manifest.
pub const MANIFEST_FILE: &str = "packages.toml";

/// One installed repository.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackageRecord {
    pub repo_name: String,
    pub owner: String,
    /// Release tag recorded at install time. Opaque, compared verbatim.
    pub version: String,
}

impl PackageRecord {
    pub fn new(
        repo_name: impl Into<String>,
        owner: impl Into<String>,
        version: impl Into<String>,
    ) -> Self {
        Self {
            repo_name: repo_name.into(),
            owner: owner.into(),
            version: version.into(),
        }
    }

    /// The `owner/repo` identifier this record was installed from.
    pub fn target(&self) -> String {
        format!("{}/{}", self.owner, self.repo_name)
    }
}

/// Table body as read from disk. `author` is the field name older
/// manifests used for the owner.
#[derive(Debug, Deserialize)]
struct RecordBody {
    #[serde(alias = "author")]
    owner: String,
    version: String,
}

const KNOWN_FIELDS: [&str; 3] = ["owner", "author", "version"];

#[derive(Serialize)]
struct RecordBodyRef<'a> {
    owner: &'a str,
    version: &'a str,
}

/// Content present in the file that a rewrite will not keep: an undecodable
/// table, an unknown field, or a case-insensitive duplicate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RejectedEntry {
    pub key: String,
    pub reason: String,
}

/// Result of decoding a manifest document.
#[derive(Debug, Clone, Default)]
pub struct ParsedManifest {
    pub manifest: Manifest,
    /// Content that was skipped while decoding.
    pub rejected: Vec<RejectedEntry>,
}

/// Installed packages, keyed case-insensitively by repository name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Manifest {
    // Keyed by the lowercased repo name, so iteration is the on-disk order.
    entries: BTreeMap<String, PackageRecord>,
}

fn sort_key(repo_name: &str) -> String {
    repo_name.to_lowercase()
}

impl Manifest {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Look up a record, ignoring case.
    pub fn get(&self, repo_name: &str) -> Option<&PackageRecord> {
        self.entries.get(&sort_key(repo_name))
    }

    /// Insert or replace the record for `record.repo_name`.
    ///
    /// A name differing only in case replaces the existing entry and the new
    /// spelling is kept. Returns the replaced record.
    pub fn upsert(&mut self, record: PackageRecord) -> Option<PackageRecord> {
        self.entries.insert(sort_key(&record.repo_name), record)
    }

    /// Records in case-insensitive ascending order of repository name.
    pub fn iter(&self) -> impl Iterator<Item = &PackageRecord> {
        self.entries.values()
    }
    /// Decode a manifest document.
    ///
    /// Fails only when `content` is not TOML at all. Tables that are TOML but
    /// not valid records, unknown fields, and names that repeat an earlier
    /// name case-insensitively are listed in [`ParsedManifest::rejected`].
    /// Of two case-insensitive duplicates the later one is kept.
    pub fn parse(content: &str) -> GhpmResult<ParsedManifest> {
        let table: toml::Table =
            toml::from_str(content).map_err(|e| GhpmError::Parse(e.to_string()))?;

        let mut parsed = ParsedManifest::default();
        for (key, value) in table {
            let unknown: Vec<String> = value
                .as_table()
                .map(|fields| {
                    fields
                        .keys()
                        .filter(|field| !KNOWN_FIELDS.contains(&field.as_str()))
                        .cloned()
                        .collect()
                })
                .unwrap_or_default();

            let body = match value.try_into::<RecordBody>() {
                Ok(body) => body,
                Err(e) => {
                    parsed.rejected.push(RejectedEntry {
                        key,
                        reason: e.to_string().trim().to_string(),
                    });
                    continue;
                }
            };

            for field in unknown {
                parsed.rejected.push(RejectedEntry {
                    key: format!("{}.{}", key, field),
                    reason: "unknown field, not kept on rewrite".to_string(),
                });
            }

            let record = PackageRecord::new(key.as_str(), body.owner, body.version);
            if let Some(previous) = parsed.manifest.upsert(record) {
                parsed.rejected.push(RejectedEntry {
                    reason: format!("duplicate of [{}] (names are case-insensitive)", key),
                    key: previous.repo_name,
                });
            }
        }

        Ok(parsed)
    }

    /// Encode the manifest in its canonical (sorted) form.
    pub fn to_toml_string(&self) -> GhpmResult<String> {
        toml::to_string(self).map_err(|e| GhpmError::Serialize(e.to_string()))
    }
}

impl Serialize for Manifest {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for record in self.iter() {
            map.serialize_entry(
                &record.repo_name,
                &RecordBodyRef {
                    owner: &record.owner,
                    version: &record.version,
                },
            )?;
        }
        map.end()
    }
}

impl<'a> IntoIterator for &'a Manifest {
    type Item = &'a PackageRecord;
    type IntoIter = std::collections::btree_map::Values<'a, String, PackageRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.values()
    }
}
