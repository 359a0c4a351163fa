#![forbid(unsafe_code)]

//! Project template tag.

use std::fmt;
use std::str::FromStr;

#[cfg(any(feature = "serde", feature = "config"))]
use serde::{Deserialize, Serialize};

/// Which project template the document exports to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(any(feature = "serde", feature = "config"), derive(Serialize, Deserialize))]
pub enum ProjectType {
    #[default]
    #[cfg_attr(any(feature = "serde", feature = "config"), serde(rename = "Classic React"))]
    ClassicReact,
    #[cfg_attr(any(feature = "serde", feature = "config"), serde(rename = "Next.js"))]
    NextJs,
    #[cfg_attr(any(feature = "serde", feature = "config"), serde(rename = "Gatsby.js"))]
    Gatsby,
}

impl ProjectType {
    /// Every template, in menu order.
    pub const ALL: [ProjectType; 3] = [Self::ClassicReact, Self::NextJs, Self::Gatsby];

    /// The display tag (`"Classic React"`, `"Next.js"`, `"Gatsby.js"`).
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::ClassicReact => "Classic React",
            Self::NextJs => "Next.js",
            Self::Gatsby => "Gatsby.js",
        }
    }
}

impl fmt::Display for ProjectType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a string is not a known project tag.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown project type: {0}")]
pub struct UnknownProjectType(pub String);

impl FromStr for ProjectType {
    type Err = UnknownProjectType;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| UnknownProjectType(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_round_trips_display() {
        for kind in ProjectType::ALL {
            assert_eq!(kind.to_string().parse::<ProjectType>(), Ok(kind));
        }
    }

    #[test]
    fn parse_is_case_insensitive() {
        assert_eq!("next.JS".parse::<ProjectType>(), Ok(ProjectType::NextJs));
    }

    #[test]
    fn parse_rejects_unknown() {
        assert_eq!(
            "Svelte".parse::<ProjectType>(),
            Err(UnknownProjectType("Svelte".into()))
        );
    }
}
