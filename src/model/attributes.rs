//! Player attributes: the five stats weapons scale with and require.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Attribute {
    Str,
    Dex,
    Int,
    Fai,
    Arc,
}

pub const ALL_ATTRIBUTES: [Attribute; 5] = [
    Attribute::Str,
    Attribute::Dex,
    Attribute::Int,
    Attribute::Fai,
    Attribute::Arc,
];

impl Attribute {
    /// Short code used in data files and sort keys (`str`, `dex`, ...).
    pub fn code(self) -> &'static str {
        match self {
            Attribute::Str => "str",
            Attribute::Dex => "dex",
            Attribute::Int => "int",
            Attribute::Fai => "fai",
            Attribute::Arc => "arc",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Attribute::Str => "Strength",
            Attribute::Dex => "Dexterity",
            Attribute::Int => "Intelligence",
            Attribute::Fai => "Faith",
            Attribute::Arc => "Arcane",
        }
    }
}

impl fmt::Display for Attribute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Attribute {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ALL_ATTRIBUTES
            .iter()
            .copied()
            .find(|a| a.code() == s)
            .ok_or_else(|| format!("unknown attribute: {}", s))
    }
}

/// A character's attribute values. No range is enforced here; the UI keeps them in 1..=99.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct Attributes {
    #[serde(rename = "str")]
    pub strength: u32,
    #[serde(rename = "dex")]
    pub dexterity: u32,
    #[serde(rename = "int")]
    pub intelligence: u32,
    #[serde(rename = "fai")]
    pub faith: u32,
    #[serde(rename = "arc")]
    pub arcane: u32,
}

impl Attributes {
    /// All five attributes at the same value.
    pub const fn uniform(value: u32) -> Self {
        Self {
            strength: value,
            dexterity: value,
            intelligence: value,
            faith: value,
            arcane: value,
        }
    }

    pub fn get(&self, attribute: Attribute) -> u32 {
        match attribute {
            Attribute::Str => self.strength,
            Attribute::Dex => self.dexterity,
            Attribute::Int => self.intelligence,
            Attribute::Fai => self.faith,
            Attribute::Arc => self.arcane,
        }
    }

    pub fn set(&mut self, attribute: Attribute, value: u32) {
        match attribute {
            Attribute::Str => self.strength = value,
            Attribute::Dex => self.dexterity = value,
            Attribute::Int => self.intelligence = value,
            Attribute::Fai => self.faith = value,
            Attribute::Arc => self.arcane = value,
        }
    }

    pub fn with(mut self, attribute: Attribute, value: u32) -> Self {
        self.set(attribute, value);
        self
    }
}

impl Default for Attributes {
    fn default() -> Self {
        Self::uniform(crate::config::DEFAULT_ATTRIBUTE_VALUE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn attribute_codes_parse_back() {
        for a in ALL_ATTRIBUTES {
            assert_eq!(a.code().parse::<Attribute>().unwrap(), a);
        }
        assert!("luck".parse::<Attribute>().is_err());
    }

    #[test]
    fn attributes_json_uses_short_codes() {
        let attrs = Attributes::uniform(10).with(Attribute::Arc, 45);
        let json = serde_json::to_value(attrs).unwrap();
        assert_eq!(json["str"], 10);
        assert_eq!(json["arc"], 45);
    }
}
