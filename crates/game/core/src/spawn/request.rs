use std::collections::BTreeMap;
use std::fmt;

use crate::state::{DefinitionId, Position};

/// Loosely typed override value as authored in content or commands.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(untagged))]
pub enum OverrideValue {
    Bool(bool),
    Int(i64),
    Text(String),
}

impl OverrideValue {
    pub fn as_i32(&self) -> Option<i32> {
        match self {
            OverrideValue::Int(value) => i32::try_from(*value).ok(),
            _ => None,
        }
    }

    pub fn as_u32(&self) -> Option<u32> {
        match self {
            OverrideValue::Int(value) => u32::try_from(*value).ok(),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            OverrideValue::Bool(value) => Some(*value),
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            OverrideValue::Text(value) => Some(value),
            _ => None,
        }
    }
}

impl fmt::Display for OverrideValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OverrideValue::Bool(value) => write!(f, "{value}"),
            OverrideValue::Int(value) => write!(f, "{value}"),
            OverrideValue::Text(value) => f.write_str(value),
        }
    }
}

impl From<bool> for OverrideValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<i64> for OverrideValue {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<&str> for OverrideValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_owned())
    }
}

/// Field overrides keyed by field name. Unknown keys are ignored.
pub type Overrides = BTreeMap<String, OverrideValue>;

/// "Spawn `count` of `definition`, optionally at `position`, with tweaks."
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SpawnRequest {
    pub definition: DefinitionId,
    #[cfg_attr(feature = "serde", serde(default = "default_count"))]
    pub count: u32,
    #[cfg_attr(feature = "serde", serde(default))]
    pub position: Option<Position>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub overrides: Overrides,
}

#[cfg(feature = "serde")]
fn default_count() -> u32 {
    1
}

impl SpawnRequest {
    /// One instance of `definition` at the default position.
    pub fn new(definition: impl Into<String>) -> Self {
        Self {
            definition: DefinitionId::new(definition),
            count: 1,
            position: None,
            overrides: Overrides::new(),
        }
    }

    pub fn with_count(mut self, count: u32) -> Self {
        self.count = count;
        self
    }

    pub fn at(mut self, position: Position) -> Self {
        self.position = Some(position);
        self
    }

    pub fn with_override(mut self, key: impl Into<String>, value: impl Into<OverrideValue>) -> Self {
        self.overrides.insert(key.into(), value.into());
        self
    }
}
