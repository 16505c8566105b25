//! Access levels for a single field.
//!
//! Defines 3 levels with decreasing privileges:
//! - All: read and write (least restrictive)
//! - ReadOnly: read but not edit
//! - None: hidden (most restrictive)

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Effective access to a field.
///
/// Variants are ordered from most to least permissive in the derived `Ord`:
/// None < ReadOnly < All
///
/// so the most restrictive of two rights is simply their minimum.
#[derive(
    Debug, Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum AccessRight {
    /// Field is hidden entirely.
    None,

    /// Field is visible but cannot be edited.
    ReadOnly,

    /// Field is visible and editable.
    #[default]
    All,
}

impl AccessRight {
    /// Returns whether the field may be displayed.
    pub fn can_read(&self) -> bool {
        match self {
            AccessRight::None => false,
            AccessRight::ReadOnly => true,
            AccessRight::All => true,
        }
    }

    /// Returns whether the field may be edited.
    pub fn can_write(&self) -> bool {
        match self {
            AccessRight::None => false,
            AccessRight::ReadOnly => false,
            AccessRight::All => true,
        }
    }

    /// Returns the permissiveness level (0 = most restrictive).
    pub fn permissiveness(&self) -> u8 {
        match self {
            AccessRight::None => 0,
            AccessRight::ReadOnly => 1,
            AccessRight::All => 2,
        }
    }

    /// Returns the more restrictive of `self` and `other`.
    ///
    /// # Examples
    ///
    /// ```
    /// use fieldgate::AccessRight;
    ///
    /// assert_eq!(AccessRight::All.most_restrictive(AccessRight::ReadOnly), AccessRight::ReadOnly);
    /// assert_eq!(AccessRight::None.most_restrictive(AccessRight::ReadOnly), AccessRight::None);
    /// ```
    #[must_use]
    pub fn most_restrictive(self, other: AccessRight) -> AccessRight {
        self.min(other)
    }

    /// Combines any number of rights into the most restrictive one.
    ///
    /// An empty input yields [`AccessRight::All`]: silence is permissive.
    pub fn combine<I>(rights: I) -> AccessRight
    where
        I: IntoIterator<Item = AccessRight>,
    {
        rights
            .into_iter()
            .fold(AccessRight::All, AccessRight::most_restrictive)
    }

    /// Returns the canonical lowercase name.
    pub fn as_str(&self) -> &'static str {
        match self {
            AccessRight::None => "none",
            AccessRight::ReadOnly => "read_only",
            AccessRight::All => "all",
        }
    }
}

impl fmt::Display for AccessRight {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an unknown access right name.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unknown access right: {0:?} (expected all, read_only or none)")]
pub struct ParseAccessRightError(String);

impl FromStr for AccessRight {
    type Err = ParseAccessRightError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "all" => Ok(AccessRight::All),
            "read_only" => Ok(AccessRight::ReadOnly),
            "none" => Ok(AccessRight::None),
            _ => Err(ParseAccessRightError(s.to_string())),
        }
    }
}
