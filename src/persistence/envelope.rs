//! Versioned bundle envelope
//!
//! ```json
//! { "type": "level",  "version": 1, "level": { ... } }
//! { "type": "portal", "version": 1, "portal": { "name": "..." }, "levels": [ ... ] }
//! ```

use std::fmt;
use std::fs;
use std::io;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::quest::LevelPack;
use crate::sim::Level;

/// Newest envelope version this build understands
pub const BUNDLE_VERSION: u32 = 1;

/// Metadata for a multi-level pack
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PackInfo {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// An exported level or level pack
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Bundle {
    Level {
        version: u32,
        level: Level,
    },
    Portal {
        version: u32,
        portal: PackInfo,
        levels: Vec<Level>,
    },
}

/// Failure importing or exporting a bundle
#[derive(Debug)]
pub enum BundleError {
    Io(io::Error),
    Json(serde_json::Error),
    UnsupportedVersion { found: u32, supported: u32 },
}

impl fmt::Display for BundleError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(err) => write!(f, "bundle i/o error: {err}"),
            Self::Json(err) => write!(f, "bundle is not valid JSON: {err}"),
            Self::UnsupportedVersion { found, supported } => write!(
                f,
                "bundle version {found} is newer than supported version {supported}"
            ),
        }
    }
}

impl std::error::Error for BundleError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(err) => Some(err),
            Self::Json(err) => Some(err),
            Self::UnsupportedVersion { .. } => None,
        }
    }
}

impl From<io::Error> for BundleError {
    fn from(err: io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<serde_json::Error> for BundleError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err)
    }
}

impl Bundle {
    /// Wrap a single level at the current version
    pub fn from_level(level: Level) -> Self {
        Self::Level {
            version: BUNDLE_VERSION,
            level,
        }
    }

    /// Wrap a pack at the current version
    pub fn from_pack(pack: LevelPack) -> Self {
        Self::Portal {
            version: BUNDLE_VERSION,
            portal: PackInfo {
                name: pack.name,
                author: pack.author,
                description: pack.description,
            },
            levels: pack.levels,
        }
    }

    pub fn version(&self) -> u32 {
        match self {
            Self::Level { version, .. } | Self::Portal { version, .. } => *version,
        }
    }

    /// Parse and version-check a bundle
    pub fn from_json(json: &str) -> Result<Self, BundleError> {
        let bundle: Bundle = serde_json::from_str(json)?;
        if bundle.version() > BUNDLE_VERSION {
            return Err(BundleError::UnsupportedVersion {
                found: bundle.version(),
                supported: BUNDLE_VERSION,
            });
        }
        Ok(bundle)
    }

    pub fn to_json(&self) -> Result<String, BundleError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Resolve into a playable pack (a lone level becomes a one-level pack)
    pub fn into_pack(self) -> LevelPack {
        match self {
            Self::Level { level, .. } => LevelPack::single(level),
            Self::Portal { portal, levels, .. } => LevelPack {
                name: portal.name,
                author: portal.author,
                description: portal.description,
                levels,
            },
        }
    }
}

/// Read a bundle from disk
pub fn load_bundle(path: &Path) -> Result<Bundle, BundleError> {
    let json = fs::read_to_string(path)?;
    let bundle = Bundle::from_json(&json)?;
    log::info!(
        "Loaded bundle from {} (version {})",
        path.display(),
        bundle.version()
    );
    Ok(bundle)
}

/// Write a bundle to disk
pub fn save_bundle(path: &Path, bundle: &Bundle) -> Result<(), BundleError> {
    fs::write(path, bundle.to_json()?)?;
    log::info!("Saved bundle to {}", path.display());
    Ok(())
}
