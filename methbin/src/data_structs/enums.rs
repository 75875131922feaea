use std::fmt::Display;
use std::str::FromStr;

use serde::{
    Deserialize,
    Serialize,
};

use super::typedef::ContextCode;
use crate::error::FetchError;

/// Sequence context of a cytosine, in the code order used by the writers
/// of the record files.
#[derive(Eq, Hash, PartialEq, Copy, Clone, Debug, PartialOrd, Ord)]
pub enum Context {
    /// CG context.
    CG,
    /// CHG context.
    CHG,
    /// CHH context.
    CHH,
}

impl Context {
    /// Decodes a stored context code. Codes outside `0..=2` have no named
    /// context.
    pub fn from_code(code: ContextCode) -> Option<Self> {
        match code {
            0 => Some(Context::CG),
            1 => Some(Context::CHG),
            2 => Some(Context::CHH),
            _ => None,
        }
    }

    pub fn code(self) -> ContextCode {
        match self {
            Context::CG => 0,
            Context::CHG => 1,
            Context::CHH => 2,
        }
    }
}

impl Display for Context {
    #[cfg_attr(coverage_nightly, coverage(off))]
    fn fmt(
        &self,
        f: &mut std::fmt::Formatter<'_>,
    ) -> std::fmt::Result {
        match self {
            Context::CG => write!(f, "CG"),
            Context::CHG => write!(f, "CHG"),
            Context::CHH => write!(f, "CHH"),
        }
    }
}

impl FromStr for Context {
    type Err = FetchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "CG" => Ok(Context::CG),
            "CHG" => Ok(Context::CHG),
            "CHH" => Ok(Context::CHH),
            other => {
                Err(FetchError::invalid_parameter(
                    "context",
                    format!("unknown context '{}'", other),
                ))
            },
        }
    }
}

impl Serialize for Context {
    fn serialize<S>(
        &self,
        serializer: S,
    ) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer, {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for Context {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>, {
        let s = String::deserialize(deserializer)?;
        FromStr::from_str(&s).map_err(serde::de::Error::custom)
    }
}

/// Output shape of a fetch.
#[derive(Eq, Hash, PartialEq, Copy, Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FetchMode {
    /// Filtered methylated counts, filtered total counts and raw context
    /// codes.
    #[default]
    Counts,
    /// Methylation ratio, `-1.0` for filtered sites.
    Ratio,
}

impl Display for FetchMode {
    fn fmt(
        &self,
        f: &mut std::fmt::Formatter<'_>,
    ) -> std::fmt::Result {
        match self {
            FetchMode::Counts => write!(f, "counts"),
            FetchMode::Ratio => write!(f, "ratio"),
        }
    }
}

impl FromStr for FetchMode {
    type Err = FetchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "counts" => Ok(FetchMode::Counts),
            "ratio" => Ok(FetchMode::Ratio),
            other => {
                Err(FetchError::invalid_parameter(
                    "mode",
                    format!("expected 'counts' or 'ratio', got '{}'", other),
                ))
            },
        }
    }
}
