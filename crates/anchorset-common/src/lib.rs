//! Anchorset Common - Shared types and errors
//!
//! This crate provides the foundational types used across all Anchorset components:
//! - The application error enum
//! - Bar type and theme key enums shared by storage and configuration

pub mod error;

use serde::{Deserialize, Serialize};

pub use error::AnchorsetError;

/// Bar type of an anchor: threaded rod or reinforcing bar
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BarType {
    Threaded,
    Rebar,
}

impl BarType {
    pub fn as_str(self) -> &'static str {
        match self {
            BarType::Threaded => "threaded",
            BarType::Rebar => "rebar",
        }
    }
}

impl std::fmt::Display for BarType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for BarType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "threaded" => Ok(BarType::Threaded),
            "rebar" => Ok(BarType::Rebar),
            _ => Err(format!("Invalid bar type: {}", s)),
        }
    }
}

/// Keys accepted by the theme settings table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ThemeKey {
    BrandColor,
    PageBackground,
    CardBackground,
}

impl ThemeKey {
    pub const ALL: [ThemeKey; 3] = [
        ThemeKey::BrandColor,
        ThemeKey::PageBackground,
        ThemeKey::CardBackground,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            ThemeKey::BrandColor => "brandColor",
            ThemeKey::PageBackground => "pageBackground",
            ThemeKey::CardBackground => "cardBackground",
        }
    }
}

impl std::fmt::Display for ThemeKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for ThemeKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ThemeKey::ALL
            .into_iter()
            .find(|key| key.as_str() == s)
            .ok_or_else(|| format!("Invalid theme key: {}", s))
    }
}
