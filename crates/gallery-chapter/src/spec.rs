//! Package locators.
//!
//! A chapter table maps a navigation key to a versioned module
//! reference such as `@w3gallery/tdse-1d#^0.1.0`. Version requirements
//! are caret ranges or exact versions — the only forms chapter tables
//! use.

use std::fmt;
use std::str::FromStr;

/// Error parsing a package locator or version.
#[derive(Debug, thiserror::Error)]
pub enum SpecError {
    /// Locator has no package name.
    #[error("package locator has no name: `{0}`")]
    MissingName(String),
    /// Malformed version number.
    #[error("invalid version `{0}`")]
    InvalidVersion(String),
}

/// A package version, `major.minor.patch`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub struct Version {
    pub major: u64,
    pub minor: u64,
    pub patch: u64,
}

impl Version {
    #[must_use]
    pub fn new(major: u64, minor: u64, patch: u64) -> Self {
        Self {
            major,
            minor,
            patch,
        }
    }
}

impl FromStr for Version {
    type Err = SpecError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parts = s.split('.');
        let mut next = || {
            parts
                .next()
                .and_then(|p| p.parse::<u64>().ok())
                .ok_or_else(|| SpecError::InvalidVersion(s.to_owned()))
        };
        let version = Self::new(next()?, next()?, next()?);
        if parts.next().is_some() {
            return Err(SpecError::InvalidVersion(s.to_owned()));
        }
        Ok(version)
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)
    }
}

/// A version requirement.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum VersionReq {
    /// Any version satisfies.
    Any,
    /// Exactly this version.
    Exact(Version),
    /// Caret range: compatible with this version.
    Caret(Version),
}

impl VersionReq {
    /// Whether a concrete version satisfies this requirement.
    ///
    /// Caret semantics: updates that do not change the leftmost
    /// non-zero component are compatible (`^0.1.2` accepts `0.1.x >=
    /// 0.1.2` but not `0.2.0`; `^0.0.3` accepts only `0.0.3`).
    #[must_use]
    pub fn matches(self, version: Version) -> bool {
        match self {
            Self::Any => true,
            Self::Exact(base) => version == base,
            Self::Caret(base) => {
                if version < base {
                    return false;
                }
                if base.major > 0 {
                    version.major == base.major
                } else if base.minor > 0 {
                    version.major == 0 && version.minor == base.minor
                } else {
                    version == base
                }
            }
        }
    }
}

impl FromStr for VersionReq {
    type Err = SpecError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if let Some(base) = s.strip_prefix('^') {
            return Ok(Self::Caret(base.parse()?));
        }
        Ok(Self::Exact(s.parse()?))
    }
}

impl fmt::Display for VersionReq {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Any => f.write_str("*"),
            Self::Exact(v) => write!(f, "{v}"),
            Self::Caret(v) => write!(f, "^{v}"),
        }
    }
}

/// A versioned module reference from a chapter table.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PackageSpec {
    name: String,
    req: VersionReq,
}

impl PackageSpec {
    /// Parse a locator of the form `name#req`.
    ///
    /// A locator without `#` places no version constraint.
    ///
    /// # Errors
    ///
    /// [`SpecError::MissingName`] for an empty name part and
    /// [`SpecError::InvalidVersion`] for a malformed requirement.
    pub fn parse(locator: &str) -> Result<Self, SpecError> {
        let (name, req) = match locator.split_once('#') {
            Some((name, req)) => (name, req.parse()?),
            None => (locator, VersionReq::Any),
        };
        if name.is_empty() {
            return Err(SpecError::MissingName(locator.to_owned()));
        }
        Ok(Self {
            name: name.to_owned(),
            req,
        })
    }

    /// Package name, including any scope prefix.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Version requirement.
    #[must_use]
    pub fn req(&self) -> VersionReq {
        self.req
    }
}

impl fmt::Display for PackageSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.req {
            VersionReq::Any => f.write_str(&self.name),
            req => write!(f, "{}#{req}", self.name),
        }
    }
}
