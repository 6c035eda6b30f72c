//! Source document model
//!
//! The input JSON is deserialized straight into these types, so a document
//! with a missing collection or a wrongly-typed field is rejected before
//! anything touches the database.

use clap::ValueEnum;
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;
use crate::{Error, Result};

/// Rarity tiers, lowest to highest
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum RarityTier {
    Rare,
    Epic,
    Legendary,
    Mythical,
}

impl RarityTier {
    pub const ALL: [RarityTier; 4] = [
        RarityTier::Rare,
        RarityTier::Epic,
        RarityTier::Legendary,
        RarityTier::Mythical,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            RarityTier::Rare => "rare",
            RarityTier::Epic => "epic",
            RarityTier::Legendary => "legendary",
            RarityTier::Mythical => "mythical",
        }
    }

    /// Display label, as used for relic rarity values
    pub fn label(&self) -> &'static str {
        match self {
            RarityTier::Rare => "Rare",
            RarityTier::Epic => "Epic",
            RarityTier::Legendary => "Legendary",
            RarityTier::Mythical => "Mythical",
        }
    }

    /// Column holding this tier's share of a craft composition
    pub fn composition_column(&self) -> &'static str {
        match self {
            RarityTier::Rare => "comp_rare",
            RarityTier::Epic => "comp_epic",
            RarityTier::Legendary => "comp_legendary",
            RarityTier::Mythical => "comp_mythical",
        }
    }

    /// Column holding this tier's yield in a craft result
    pub fn result_column(&self) -> &'static str {
        match self {
            RarityTier::Rare => "result_rare",
            RarityTier::Epic => "result_epic",
            RarityTier::Legendary => "result_legendary",
            RarityTier::Mythical => "result_mythical",
        }
    }
}

impl FromStr for RarityTier {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "rare" => Ok(RarityTier::Rare),
            "epic" => Ok(RarityTier::Epic),
            "legendary" => Ok(RarityTier::Legendary),
            "mythical" => Ok(RarityTier::Mythical),
            _ => Err(Error::UnknownRarity(s.to_string())),
        }
    }
}

impl fmt::Display for RarityTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Percentages per rarity tier. Used for both the composition fed into a
/// craft and the yield it produced.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RarityMix {
    pub rare: f64,
    pub epic: f64,
    pub legendary: f64,
    pub mythical: f64,
}

impl RarityMix {
    pub fn new(rare: f64, epic: f64, legendary: f64, mythical: f64) -> Self {
        Self { rare, epic, legendary, mythical }
    }

    pub fn get(&self, tier: RarityTier) -> f64 {
        match tier {
            RarityTier::Rare => self.rare,
            RarityTier::Epic => self.epic,
            RarityTier::Legendary => self.legendary,
            RarityTier::Mythical => self.mythical,
        }
    }
}

/// One observed crafting outcome
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CraftResult {
    pub composition: RarityMix,
    pub result: RarityMix,
}

/// A named collectible relic
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Relic {
    pub name: String,
    pub group: String,
    pub rarity: String,
    pub image: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub description: String,
}

impl Relic {
    pub fn new(
        name: impl Into<String>,
        group: impl Into<String>,
        rarity: impl Into<String>,
        image: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            group: group.into(),
            rarity: rarity.into(),
            image: image.into(),
            description: String::new(),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }
}

fn null_as_empty<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

/// The whole input document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RelicDocument {
    pub relic_craft_results: Vec<CraftResult>,
    pub relics: Vec<Relic>,
}

/// Which half of a craft result a warning refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MixSide {
    Composition,
    Result,
}

impl MixSide {
    pub fn as_str(&self) -> &'static str {
        match self {
            MixSide::Composition => "composition",
            MixSide::Result => "result",
        }
    }
}

/// A percentage outside 0..=100. Reported, never rejected.
#[derive(Debug, Clone, PartialEq)]
pub struct ConsistencyWarning {
    /// Position of the craft result in the document
    pub index: usize,
    pub side: MixSide,
    pub tier: RarityTier,
    pub value: f64,
}

impl fmt::Display for ConsistencyWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "relic_craft_results[{}].{}.{} = {} is outside 0-100",
            self.index,
            self.side.as_str(),
            self.tier.as_str(),
            self.value
        )
    }
}

impl RelicDocument {
    /// Parse a document from JSON text
    pub fn from_json(text: &str) -> Result<Self> {
        serde_json::from_str(text).map_err(|e| Error::Parse(e.to_string()))
    }

    /// Read and parse a document from disk
    pub fn from_path(path: &std::path::Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json(&text)
    }

    pub fn consistency_warnings(&self) -> Vec<ConsistencyWarning> {
        let mut warnings = Vec::new();
        for (index, craft) in self.relic_craft_results.iter().enumerate() {
            for (side, mix) in [
                (MixSide::Composition, &craft.composition),
                (MixSide::Result, &craft.result),
            ] {
                for tier in RarityTier::ALL {
                    let value = mix.get(tier);
                    if !(0.0..=100.0).contains(&value) {
                        warnings.push(ConsistencyWarning { index, side, tier, value });
                    }
                }
            }
        }
        warnings
    }
}
