//! Staked NFT descriptors and rarity-derived voting power.
//!
//! Callers supply NFT metadata in one of two upstream conventions, carrying
//! the rarity-bearing text under either `content.fields` or `display.data`.
//! Both are normalized to one internal descriptor before any power math
//! runs, so the rest of the engine never sees the shape difference.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A staked NFT as supplied by the caller.
///
/// `stakedAt` is milliseconds since epoch; it defaults to zero when the
/// caller omits it, which makes the NFT old enough for any stake-duration
/// rule. When both metadata shapes are present, `content` wins.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StakedNft {
    /// Token identifier, unique per chain.
    pub id: String,
    /// Stake timestamp in milliseconds since epoch.
    #[serde(default)]
    pub staked_at: u64,
    /// Object-content metadata shape.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<NftContent>,
    /// Display-standard metadata shape.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display: Option<NftDisplay>,
}

/// Metadata nested under `content.fields`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NftContent {
    /// Field bag holding name and attributes.
    #[serde(default)]
    pub fields: NftFields,
}

/// Metadata nested under `display.data`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NftDisplay {
    /// Field bag holding name and attributes.
    #[serde(default)]
    pub data: NftFields,
}

/// Rarity-bearing text fields common to both shapes.
///
/// Attributes arrive as arbitrary JSON; only string entries take part in
/// rarity matching, everything else is ignored.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NftFields {
    /// Token display name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Free-form attribute list.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub attributes: Vec<Value>,
}

impl StakedNft {
    /// Build a descriptor with neither metadata shape populated.
    pub fn new(id: impl Into<String>, staked_at: u64) -> Self {
        Self {
            id: id.into(),
            staked_at,
            content: None,
            display: None,
        }
    }

    /// Normalize into the internal shape the engine computes with.
    pub fn descriptor(&self) -> NftDescriptor {
        let fields = self
            .content
            .as_ref()
            .map(|content| &content.fields)
            .or_else(|| self.display.as_ref().map(|display| &display.data));

        let name = fields
            .and_then(|fields| fields.name.clone())
            .unwrap_or_default();
        let attributes = fields
            .map(|fields| {
                fields
                    .attributes
                    .iter()
                    .filter_map(|attr| attr.as_str().map(str::to_owned))
                    .collect()
            })
            .unwrap_or_default();

        NftDescriptor {
            id: self.id.clone(),
            staked_at_ms: self.staked_at,
            name,
            attributes,
        }
    }
}

/// Shape-independent view of a staked NFT.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NftDescriptor {
    /// Token identifier.
    pub id: String,
    /// Stake timestamp in milliseconds since epoch.
    pub staked_at_ms: u64,
    /// Display name, empty when absent.
    pub name: String,
    /// String attributes only.
    pub attributes: Vec<String>,
}

impl NftDescriptor {
    /// Rarity tier derived from name and attribute text.
    pub fn rarity(&self) -> Rarity {
        Rarity::classify(self)
    }

    /// Voting power contributed by this NFT.
    pub fn voting_power(&self) -> u64 {
        self.rarity().power()
    }
}

/// Cached per-NFT power, persisted in the voting-rights map.
///
/// Last write wins; no history is kept.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NftVotingRight {
    /// Power computed at the last refresh.
    pub power: u64,
    /// User the NFT was counted for.
    pub user_principal: String,
    /// Refresh timestamp in milliseconds since epoch.
    pub last_updated: u64,
}

/// Rarity tier of an NFT, ordered by the multiplier it grants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Rarity {
    /// 1.0x multiplier; the fallback tier.
    Common,
    /// 1.5x multiplier.
    Uncommon,
    /// 2.0x multiplier.
    Rare,
    /// 3.0x multiplier.
    Epic,
    /// 5.0x multiplier; `"mythic"` text also lands here.
    Legendary,
}

/// Base power of a single staked NFT before the rarity multiplier.
const BASE_POWER: f64 = 1.0;

/// Tiers with their probe words, highest priority first. The first tier
/// whose probe matches wins; tiers never combine.
const TIER_PROBES: [(Rarity, &[&str]); 4] = [
    (Rarity::Legendary, &["legendary", "mythic"]),
    (Rarity::Epic, &["epic"]),
    (Rarity::Rare, &["rare"]),
    (Rarity::Uncommon, &["uncommon"]),
];

impl Rarity {
    /// Voting power multiplier for this tier.
    pub fn multiplier(self) -> f64 {
        match self {
            Rarity::Common => 1.0,
            Rarity::Uncommon => 1.5,
            Rarity::Rare => 2.0,
            Rarity::Epic => 3.0,
            Rarity::Legendary => 5.0,
        }
    }

    /// Integer voting power granted per NFT of this tier.
    pub fn power(self) -> u64 {
        (BASE_POWER * self.multiplier()).floor() as u64
    }

    /// Classify by case-insensitive substring matching: name first, then
    /// attribute strings, each attribute checked individually.
    pub fn classify(descriptor: &NftDescriptor) -> Rarity {
        let name = descriptor.name.to_lowercase();
        if !name.is_empty() {
            for (tier, probes) in TIER_PROBES {
                if probes.iter().any(|probe| name.contains(probe)) {
                    return tier;
                }
            }
        }

        for (tier, probes) in TIER_PROBES {
            let hit = descriptor.attributes.iter().any(|attr| {
                let attr = attr.to_lowercase();
                probes.iter().any(|probe| attr.contains(probe))
            });
            if hit {
                return tier;
            }
        }

        Rarity::Common
    }
}
