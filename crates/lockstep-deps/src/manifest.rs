//! package.json `resolutions` store and merge

use crate::update::replace_file;
use crate::{AppliedPin, Error, ResolutionMerge, ResolutionRecord, Result};
use lockstep_fs::FileSystem;
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

const RESOLUTIONS_KEY: &str = "resolutions";
const PEER_DEPENDENCIES_KEY: &str = "peerDependencies";

/// The parts of a project manifest lockstep reads and writes.
///
/// The whole document is kept so that a rewrite only touches `resolutions`.
#[derive(Debug, Clone, PartialEq)]
pub struct PackageManifest {
    document: Map<String, Value>,
    /// Existing pins, or `None` when the manifest has no `resolutions` key
    pub resolutions: Option<BTreeMap<String, String>>,
    /// Declared peer dependency ranges
    pub peer_dependencies: BTreeMap<String, String>,
}

impl PackageManifest {
    /// Parse and validate manifest text.
    ///
    /// # Errors
    /// Returns [`Error::ManifestParse`] if the text is not a JSON object or
    /// if `resolutions` / `peerDependencies` are not string maps.
    pub fn parse(path: &Path, text: &str) -> Result<Self> {
        let invalid = |reason: String| Error::ManifestParse(path.to_path_buf(), reason);

        let value: Value = serde_json::from_str(text).map_err(|e| invalid(e.to_string()))?;
        let Value::Object(document) = value else {
            return Err(invalid("top level is not an object".to_string()));
        };

        let resolutions = document
            .get(RESOLUTIONS_KEY)
            .map(|v| string_map(RESOLUTIONS_KEY, v))
            .transpose()
            .map_err(invalid)?;

        let peer_dependencies = document
            .get(PEER_DEPENDENCIES_KEY)
            .map(|v| string_map(PEER_DEPENDENCIES_KEY, v))
            .transpose()
            .map_err(invalid)?
            .unwrap_or_default();

        Ok(Self {
            document,
            resolutions,
            peer_dependencies,
        })
    }

    /// Render the manifest with `overrides` as its `resolutions`.
    ///
    /// Other keys keep their position and value, and so do existing pins;
    /// new pins are appended. Output uses 2-space indentation and ends with
    /// a newline.
    pub fn render_with_resolutions(&self, overrides: &BTreeMap<String, String>) -> Result<String> {
        let mut document = self.document.clone();
        let mut pins = match document.get(RESOLUTIONS_KEY) {
            Some(Value::Object(existing)) => existing.clone(),
            _ => Map::new(),
        };
        pins.retain(|name, _| overrides.contains_key(name));
        for (name, version) in overrides {
            pins.insert(name.clone(), Value::String(version.clone()));
        }
        document.insert(RESOLUTIONS_KEY.to_string(), Value::Object(pins));

        let mut rendered = serde_json::to_string_pretty(&Value::Object(document))?;
        rendered.push('\n');
        Ok(rendered)
    }
}

fn string_map(key: &str, value: &Value) -> std::result::Result<BTreeMap<String, String>, String> {
    let Value::Object(entries) = value else {
        return Err(format!("\"{}\" is not an object", key));
    };

    entries
        .iter()
        .map(|(name, version)| match version {
            Value::String(version) => Ok((name.clone(), version.clone())),
            other => Err(format!(
                "\"{}\".\"{}\" must be a string, found {}",
                key, name, other
            )),
        })
        .collect()
}

/// Merge resolved versions into an override map.
///
/// - A missing map is created and counts as a change.
/// - Each resolved package is pinned if absent or pinned to another version.
/// - Pins for packages outside `record.resolved` are left alone.
/// - Unresolvable and invalid packages are never pinned.
pub fn apply_resolutions(
    existing: Option<&BTreeMap<String, String>>,
    record: &ResolutionRecord,
) -> ResolutionMerge {
    let mut changed = existing.is_none();
    let mut overrides = existing.cloned().unwrap_or_default();
    let mut applied = Vec::new();

    for (package, version) in &record.resolved {
        let old_version = overrides.get(package).cloned();
        if old_version.as_deref() == Some(version.as_str()) {
            continue;
        }

        overrides.insert(package.clone(), version.clone());
        applied.push(AppliedPin {
            package: package.clone(),
            old_version,
            new_version: version.clone(),
        });
        changed = true;
    }

    ResolutionMerge {
        overrides,
        applied,
        changed,
    }
}

/// Reads and writes a `package.json` through a [`FileSystem`].
#[derive(Debug, Clone)]
pub struct PackageJsonStore {
    path: PathBuf,
}

impl PackageJsonStore {
    /// Create a store for the manifest at `path`
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Path of the manifest
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read and validate the manifest.
    ///
    /// # Errors
    /// Returns an IO error if the file cannot be read and
    /// [`Error::ManifestParse`] if it is not a valid manifest.
    pub async fn load<F: FileSystem>(&self, fs: &F) -> Result<PackageManifest> {
        let text = fs.read_to_string(&self.path).await?;
        let manifest = PackageManifest::parse(&self.path, &text)?;
        debug!(
            path = %self.path.display(),
            pins = manifest.resolutions.as_ref().map(BTreeMap::len).unwrap_or(0),
            peers = manifest.peer_dependencies.len(),
            "loaded manifest"
        );
        Ok(manifest)
    }

    /// Replace the manifest's `resolutions` with `overrides` atomically.
    ///
    /// # Errors
    /// Returns an error if the manifest cannot be rendered or written
    pub async fn save_resolutions<F: FileSystem>(
        &self,
        fs: &F,
        manifest: &PackageManifest,
        overrides: &BTreeMap<String, String>,
    ) -> Result<()> {
        if manifest.resolutions.is_none() {
            info!("No resolutions key found in {}, adding one", self.path.display());
        }
        let rendered = manifest.render_with_resolutions(overrides)?;
        replace_file(fs, &self.path, &rendered).await?;
        info!(pins = overrides.len(), "Updated {} resolutions", self.path.display());
        Ok(())
    }
}
