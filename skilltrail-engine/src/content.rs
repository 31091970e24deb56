//! Journey content model shared by the catalog, repository and stores.
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// User archetype a journey is written for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Persona {
    Builder,
    Creator,
    Strategist,
    Investor,
    Researcher,
    Operator,
    Explorer,
}

impl Persona {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Builder => "Builder",
            Self::Creator => "Creator",
            Self::Strategist => "Strategist",
            Self::Investor => "Investor",
            Self::Researcher => "Researcher",
            Self::Operator => "Operator",
            Self::Explorer => "Explorer",
        }
    }
}

impl fmt::Display for Persona {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Persona {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "builder" => Ok(Self::Builder),
            "creator" => Ok(Self::Creator),
            "strategist" => Ok(Self::Strategist),
            "investor" => Ok(Self::Investor),
            "researcher" => Ok(Self::Researcher),
            "operator" => Ok(Self::Operator),
            "explorer" => Ok(Self::Explorer),
            _ => Err(()),
        }
    }
}

/// Canonical protocol stage of a phase: Learn → Build → Prove → Activate → Scale.
///
/// Historical content used a different naming scheme for the same five stages;
/// `FromStr` accepts both and remaps the old names onto the canonical set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ProtocolPhase {
    Learn,
    Build,
    Prove,
    Activate,
    Scale,
}

impl ProtocolPhase {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Learn => "Learn",
            Self::Build => "Build",
            Self::Prove => "Prove",
            Self::Activate => "Activate",
            Self::Scale => "Scale",
        }
    }
}

impl fmt::Display for ProtocolPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProtocolPhase {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "learn" | "cognitive" => Ok(Self::Learn),
            "build" | "synaptic" => Ok(Self::Build),
            "prove" | "neural" => Ok(Self::Prove),
            "activate" | "activation" => Ok(Self::Activate),
            "scale" | "amplification" => Ok(Self::Scale),
            _ => Err(()),
        }
    }
}

/// Identifying metadata of a journey. Immutable once loaded; `slug` is the
/// unique identifier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct JourneyMetadata {
    pub title: String,
    #[serde(default)]
    pub subtitle: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub icon: String,
    /// Persona name as free text; compared case-insensitively when filtering.
    #[serde(default)]
    pub profile_type: String,
    #[serde(default)]
    pub target: String,
    #[serde(default)]
    pub mission_type: Option<String>,
    pub slug: String,
    #[serde(default)]
    pub tagline: String,
}

/// One step of a journey. Order is the array index; there is no separate
/// authoritative phase id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct JourneyPhase {
    #[serde(default)]
    pub name: Option<String>,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub mission: String,
    #[serde(default)]
    pub xp_reward: u32,
    #[serde(default)]
    pub nft_reward: Option<String>,
    /// Tri-state gate: absent or `false` means open, `true` means gated.
    #[serde(default)]
    pub locked: Option<bool>,
    #[serde(default)]
    pub duration: Option<String>,
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default)]
    pub icon: Option<String>,
    #[serde(default)]
    pub protocol_phase: Option<ProtocolPhase>,
}

/// Reward descriptor attached to a journey.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct JourneyReward {
    #[serde(default)]
    pub milestone: String,
    #[serde(default)]
    pub proof: String,
    #[serde(default)]
    pub utility: String,
}

/// Aggregate journey content: metadata plus the ordered phase sequence and
/// narrative fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct JourneyContent {
    pub metadata: JourneyMetadata,
    #[serde(default)]
    pub phases: Vec<JourneyPhase>,
    #[serde(default)]
    pub call_to_action: Vec<String>,
    #[serde(default)]
    pub rewards: Vec<JourneyReward>,
    #[serde(default)]
    pub why_it_matters: String,
    #[serde(default)]
    pub final_role: String,
}

impl JourneyContent {
    /// Phase at `index`, if any.
    #[must_use]
    pub fn phase(&self, index: usize) -> Option<&JourneyPhase> {
        self.phases.get(index)
    }

    /// Synthetic single phase used when a journey arrives without phases.
    /// Journeys offered to users are expected to have a non-empty phase list;
    /// this is the degraded stand-in for ones that do not.
    #[must_use]
    pub fn default_phase(&self) -> JourneyPhase {
        JourneyPhase {
            title: self.metadata.title.clone(),
            description: self.metadata.description.clone(),
            mission: self.metadata.description.clone(),
            icon: Some(crate::catalog::DEFAULT_PHASE_ICON.to_string()),
            ..JourneyPhase::default()
        }
    }
}

/// Scarcity tier of a reward token, ordered from most to least common.
/// The ordering is descriptive; nothing numeric is enforced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Rarity {
    Common,
    Rare,
    Epic,
    Legendary,
}

/// Simulated collectible granted on phase completion. Created only by the
/// simulation store and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NftBadge {
    pub id: String,
    pub name: String,
    pub image_url: String,
    pub rarity: Rarity,
    #[serde(default)]
    pub utility: String,
    /// Milliseconds since the epoch, stamped at grant time.
    #[serde(default)]
    pub unlocked_at: i64,
}

/// Payload for the transient reward banner.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Reward {
    Xp { amount: u32 },
    Nft { name: String, image_url: String },
    Tokens { amount: u64 },
}
