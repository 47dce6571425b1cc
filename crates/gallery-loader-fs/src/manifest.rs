//! Chapter package manifests.

use std::collections::BTreeMap;

use gallery_links::LinkBundle;
use serde::Deserialize;

/// Manifest filename inside a chapter package directory.
pub const MANIFEST_FILENAME: &str = "chapter.toml";

/// Error type for manifest parsing.
#[derive(Debug, thiserror::Error)]
pub enum ManifestError {
    /// TOML parsing error.
    #[error("invalid manifest: {0}")]
    Parse(#[from] toml::de::Error),
    /// Structural problem in an otherwise valid document.
    #[error("invalid manifest: {0}")]
    Invalid(String),
}

/// A parsed `chapter.toml`.
#[derive(Clone, Debug, Deserialize)]
pub struct Manifest {
    /// Package identity.
    pub package: PackageSection,
    /// Chapter presentation.
    pub chapter: ChapterSection,
    /// Link maps, by category.
    #[serde(default)]
    pub links: LinksSection,
    /// Navigation tree declaration.
    pub nav: NavEntry,
}

impl Manifest {
    /// Parse a manifest document.
    ///
    /// # Errors
    ///
    /// Returns [`ManifestError`] for malformed TOML or for nav routes
    /// without a `path`.
    pub fn parse(content: &str) -> Result<Self, ManifestError> {
        let manifest: Self = toml::from_str(content)?;
        manifest.nav.validate(true)?;
        Ok(manifest)
    }

    /// The chapter's link maps as a [`LinkBundle`].
    #[must_use]
    pub fn link_bundle(&self) -> LinkBundle {
        LinkBundle {
            ext_links: self.links.ext.clone(),
            api_links: self.links.api.clone(),
            cross_links: self.links.cross.clone(),
            github_links: self.links.github.clone(),
        }
    }
}

/// `[package]` section.
#[derive(Clone, Debug, Deserialize)]
pub struct PackageSection {
    /// Package name, including any scope prefix.
    pub name: String,
    /// Concrete version, `major.minor.patch`.
    pub version: String,
}

/// `[chapter]` section.
#[derive(Clone, Debug, Deserialize)]
pub struct ChapterSection {
    /// Display title.
    pub title: String,
    /// Abstract markdown; may embed cross-references.
    #[serde(rename = "abstract")]
    pub abstract_md: String,
}

/// `[links]` section: four key → target maps.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default)]
pub struct LinksSection {
    pub ext: BTreeMap<String, String>,
    pub api: BTreeMap<String, String>,
    pub cross: BTreeMap<String, String>,
    pub github: BTreeMap<String, String>,
}

/// One navigation node declaration.
///
/// The same shape serves the `[nav]` root (no `path`), inline
/// `[[nav.routes]]` children (`path` required) and standalone deferred
/// nav manifests (no `path`).
#[derive(Clone, Debug, Deserialize)]
pub struct NavEntry {
    /// Path segment, required for child routes.
    pub path: Option<String>,
    /// Display name.
    pub name: String,
    /// Header icon class.
    pub icon: Option<String>,
    /// Markdown asset for the page layout.
    pub layout: Option<String>,
    /// Widget kind (e.g. `"notebook"`); the layout asset becomes the
    /// widget source.
    pub widget: Option<String>,
    /// Separate nav manifest for a lazily-loaded subtree. Mutually
    /// exclusive with `layout` and `routes`.
    pub manifest: Option<String>,
    /// Inline child routes.
    #[serde(default)]
    pub routes: Vec<NavEntry>,
}

impl NavEntry {
    /// Parse a standalone nav manifest (the target of `manifest = ...`).
    ///
    /// # Errors
    ///
    /// Returns [`ManifestError`] for malformed TOML or routes without a
    /// `path`.
    pub fn parse(content: &str) -> Result<Self, ManifestError> {
        // Standalone nav manifests nest the tree under `[nav]`.
        #[derive(Deserialize)]
        struct Standalone {
            nav: NavEntry,
        }
        let standalone: Standalone = toml::from_str(content)?;
        standalone.nav.validate(true)?;
        Ok(standalone.nav)
    }

    fn validate(&self, is_root: bool) -> Result<(), ManifestError> {
        if !is_root && self.path.is_none() {
            return Err(ManifestError::Invalid(format!(
                "route `{}` has no path",
                self.name
            )));
        }
        if self.manifest.is_some() && (self.layout.is_some() || !self.routes.is_empty()) {
            return Err(ManifestError::Invalid(format!(
                "route `{}` mixes `manifest` with inline content",
                self.name
            )));
        }
        for child in &self.routes {
            child.validate(false)?;
        }
        Ok(())
    }
}
