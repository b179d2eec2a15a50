//! Schema version types
//!
//! A database schema advertises a `major.minor.patch` version. Capability
//! operations declare the range of schema versions they work against, so
//! this module provides both the version triple and a range over it.
//!
//! ## Ordering
//!
//! Versions are totally ordered: major first, then minor, then patch.
//! `Version::NULL` (`0.0.0`) is the smallest version and doubles as the
//! "no bound declared" marker when ranges are built from declared strings.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::Bound;
use std::str::FromStr;

/// Dotted-triple schema version
///
/// ## Invariants
///
/// - Field order is the comparison order, so the derived `Ord` is the
///   version ordering.
/// - `Display` and `FromStr` round-trip.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Version {
    /// Major component
    pub major: u32,
    /// Minor component
    pub minor: u32,
    /// Patch component
    pub patch: u32,
}

impl Version {
    /// The zero version, used as "unset" in declared bounds
    pub const NULL: Version = Version::new(0, 0, 0);

    // =========================================================================
    // Constructors
    // =========================================================================

    /// Create a version from its three components
    pub const fn new(major: u32, minor: u32, patch: u32) -> Self {
        Version {
            major,
            minor,
            patch,
        }
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    /// Check if this is the zero version
    #[inline]
    pub const fn is_null(&self) -> bool {
        self.major == 0 && self.minor == 0 && self.patch == 0
    }
}

impl Default for Version {
    /// Default is `Version::NULL`
    fn default() -> Self {
        Version::NULL
    }
}

impl FromStr for Version {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let mut parts = s.trim().split('.');
        let mut next = || -> Result<u32> {
            parts
                .next()
                .and_then(|p| p.parse::<u32>().ok())
                .ok_or_else(|| Error::invalid_version(s))
        };
        let version = Version::new(next()?, next()?, next()?);
        if parts.next().is_some() {
            return Err(Error::invalid_version(s));
        }
        Ok(version)
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)
    }
}

// ============================================================================
// VersionRange
// ============================================================================

/// Range of schema versions an operation supports
///
/// The lower bound is inclusive when present. The upper bound may be
/// inclusive or exclusive, as declared.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct VersionRange {
    from: Option<Version>,
    until: Bound<Version>,
}

impl VersionRange {
    /// The range containing every version
    pub const ALL: VersionRange = VersionRange {
        from: None,
        until: Bound::Unbounded,
    };

    /// Every version `>= from`
    pub const fn at_least(from: Version) -> Self {
        VersionRange {
            from: Some(from),
            until: Bound::Unbounded,
        }
    }

    /// Every version `<= until`
    pub const fn at_most(until: Version) -> Self {
        VersionRange {
            from: None,
            until: Bound::Included(until),
        }
    }

    /// Every version `< until`
    pub const fn before(until: Version) -> Self {
        VersionRange {
            from: None,
            until: Bound::Excluded(until),
        }
    }

    /// `from <= v <= until`
    pub const fn closed(from: Version, until: Version) -> Self {
        VersionRange {
            from: Some(from),
            until: Bound::Included(until),
        }
    }

    /// `from <= v < until`
    pub const fn closed_open(from: Version, until: Version) -> Self {
        VersionRange {
            from: Some(from),
            until: Bound::Excluded(until),
        }
    }

    /// Build an inclusive range from declared bound strings
    ///
    /// A bound equal to `Version::NULL` means "not declared", which matches
    /// how operations that only care about one end are written down.
    pub fn from_declared(from: &str, until: &str) -> Result<Self> {
        let from: Version = from.parse()?;
        let until: Version = until.parse()?;
        Ok(VersionRange {
            from: (!from.is_null()).then_some(from),
            until: if until.is_null() {
                Bound::Unbounded
            } else {
                Bound::Included(until)
            },
        })
    }

    /// Lower bound, if any
    pub fn from(&self) -> Option<Version> {
        self.from
    }

    /// Upper bound
    pub fn until(&self) -> Bound<Version> {
        self.until
    }

    /// Check if this range places no constraint at all
    pub fn is_all(&self) -> bool {
        self.from.is_none() && matches!(self.until, Bound::Unbounded)
    }

    /// Check if `version` falls inside the range
    pub fn contains(&self, version: &Version) -> bool {
        if let Some(from) = &self.from {
            if version < from {
                return false;
            }
        }
        match &self.until {
            Bound::Included(until) => version <= until,
            Bound::Excluded(until) => version < until,
            Bound::Unbounded => true,
        }
    }
}

impl Default for VersionRange {
    fn default() -> Self {
        VersionRange::ALL
    }
}

impl fmt::Display for VersionRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.from {
            Some(from) => write!(f, "[{}..", from)?,
            None => write!(f, "(-inf..")?,
        }
        match &self.until {
            Bound::Included(until) => write!(f, "{}]", until),
            Bound::Excluded(until) => write!(f, "{})", until),
            Bound::Unbounded => write!(f, "+inf)"),
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
