//! Installation path declarations
//!
//! An interactive hook set declares one or more named installation paths.
//! Each path carries a display label, a path type governing which inputs
//! are prompted, and an ordered list of action specs executed before the
//! standard installation.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Path type, governing parameter collection policy
///
/// Unknown values fail to deserialize; the set of types is closed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PathType {
    /// Prompt for every declared input, required and optional
    Full,
    /// Prompt only for required inputs, substitute defaults for the rest
    Default,
    /// Prompt for nothing; the path exits without installing
    Exit,
}

/// Configuration of a single installation path
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PathConfig {
    /// Display label shown in the path choice list
    pub label: String,

    /// Parameter collection policy
    #[serde(rename = "type")]
    pub path_type: PathType,

    /// Actions executed in declaration order before installation
    #[serde(default)]
    pub actions: Vec<ActionSpec>,
}

/// Declarative action invocation
///
/// `type` selects an implementation from the action registry; every other
/// key is passed through as a constructor argument. An unregistered type
/// is an execution-time error, not a parse error.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActionSpec {
    /// Registered action type name
    #[serde(rename = "type")]
    pub action_type: String,

    /// Arbitrary keyword arguments for the action constructor
    #[serde(flatten)]
    pub args: IndexMap<String, serde_json::Value>,
}
