//! Journey catalog: source-shape normalization and the bundled dataset.
//!
//! Journey content arrives in two historical shapes. The legacy shape keys a
//! journey by persona and uses the protocol stage name as each phase title;
//! the raw shape is the metadata/phases layout, possibly still carrying the
//! old stage names and the `xp` alias for `xpReward`. Both normalize into
//! [`JourneyContent`] here, with every optional field filled with a safe
//! default.
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::content::{
    JourneyContent, JourneyMetadata, JourneyPhase, JourneyReward, ProtocolPhase,
};

/// Placeholder icon for phases that arrive without one.
pub const DEFAULT_PHASE_ICON: &str = "book-open";

static SLUG_SEPARATORS: Lazy<Regex> =
    Lazy::new(|| Regex::new("[^a-z0-9]+").expect("slug separator pattern"));

/// Derive a slug from a title: lowercase, non-alphanumeric runs collapsed to
/// a single dash, leading and trailing dashes trimmed.
#[must_use]
pub fn slugify(title: &str) -> String {
    let lowered = title.to_lowercase();
    let dashed = SLUG_SEPARATORS.replace_all(&lowered, "-");
    dashed.trim_matches('-').to_string()
}

/// Legacy persona-keyed journey shape.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LegacyJourney {
    pub persona: String,
    pub label: String,
    #[serde(default)]
    pub icon: String,
    #[serde(default)]
    pub tagline: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub phases: Vec<LegacyPhase>,
    /// Reward milestones as plain strings.
    #[serde(default)]
    pub rewards: Vec<String>,
    #[serde(default)]
    pub why_it_matters: String,
    #[serde(default)]
    pub final_role: String,
}

/// Phase within a legacy journey. The title doubles as the protocol stage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LegacyPhase {
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
    #[serde(default)]
    pub locked: Option<bool>,
    #[serde(default)]
    pub duration: Option<String>,
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default)]
    pub icon: Option<String>,
}

impl LegacyPhase {
    fn into_phase(self) -> JourneyPhase {
        let protocol_phase = self.title.parse::<ProtocolPhase>().ok();
        let mission = if self.mission.is_empty() {
            self.description.clone()
        } else {
            self.mission
        };
        JourneyPhase {
            name: self.name,
            title: self.title,
            description: self.description,
            mission,
            xp_reward: self.xp_reward,
            nft_reward: self.nft_reward,
            locked: self.locked,
            duration: self.duration,
            content: self.content,
            icon: Some(self.icon.unwrap_or_else(|| DEFAULT_PHASE_ICON.to_string())),
            protocol_phase,
        }
    }
}

impl LegacyJourney {
    /// Normalize into the unified shape. The slug is generated from the label.
    #[must_use]
    pub fn into_content(self) -> JourneyContent {
        let slug = slugify(&self.label);
        JourneyContent {
            metadata: JourneyMetadata {
                title: self.label,
                subtitle: String::new(),
                description: self.description,
                icon: self.icon,
                profile_type: self.persona,
                target: String::new(),
                mission_type: None,
                slug,
                tagline: self.tagline,
            },
            phases: self.phases.into_iter().map(LegacyPhase::into_phase).collect(),
            call_to_action: Vec::new(),
            rewards: self
                .rewards
                .into_iter()
                .map(|milestone| JourneyReward {
                    milestone,
                    proof: String::new(),
                    utility: String::new(),
                })
                .collect(),
            why_it_matters: self.why_it_matters,
            final_role: self.final_role,
        }
    }
}

/// Metadata/phases journey shape, before fill rules are applied.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawJourney {
    pub metadata: JourneyMetadata,
    #[serde(default)]
    pub phases: Vec<RawPhase>,
    #[serde(default)]
    pub call_to_action: Vec<String>,
    #[serde(default)]
    pub rewards: Vec<JourneyReward>,
    #[serde(default)]
    pub why_it_matters: String,
    #[serde(default)]
    pub final_role: String,
}

/// Phase in the raw shape. `xp` is an accepted alias for `xpReward`, and
/// `protocolPhase` may still use the historical stage names.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct RawPhase {
    #[serde(default)]
    pub name: Option<String>,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub mission: Option<String>,
    #[serde(default)]
    pub xp_reward: Option<u32>,
    #[serde(default)]
    pub xp: Option<u32>,
    #[serde(default)]
    pub nft_reward: Option<String>,
    #[serde(default)]
    pub locked: Option<bool>,
    #[serde(default)]
    pub duration: Option<String>,
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default)]
    pub icon: Option<String>,
    #[serde(default)]
    pub protocol_phase: Option<String>,
}

impl RawPhase {
    /// Apply the fill rules: missing mission falls back to the description,
    /// missing XP to 0, missing icon to the placeholder, historical protocol
    /// names to the canonical stages.
    #[must_use]
    pub fn into_phase(self) -> JourneyPhase {
        let mission = self
            .mission
            .filter(|m| !m.is_empty())
            .unwrap_or_else(|| self.description.clone());
        let xp_reward = self.xp_reward.or(self.xp).unwrap_or(0);
        let icon = self
            .icon
            .filter(|i| !i.is_empty())
            .unwrap_or_else(|| DEFAULT_PHASE_ICON.to_string());
        let protocol_phase = self
            .protocol_phase
            .as_deref()
            .and_then(|p| p.parse::<ProtocolPhase>().ok());
        JourneyPhase {
            name: self.name,
            title: self.title,
            description: self.description,
            mission,
            xp_reward,
            nft_reward: self.nft_reward,
            locked: self.locked,
            duration: self.duration,
            content: self.content,
            icon: Some(icon),
            protocol_phase,
        }
    }
}

impl RawJourney {
    /// Normalize into the unified shape. A missing slug is generated from the
    /// title so every journey identifies uniquely.
    #[must_use]
    pub fn into_content(self) -> JourneyContent {
        let mut metadata = self.metadata;
        if metadata.slug.is_empty() {
            metadata.slug = slugify(&metadata.title);
        }
        JourneyContent {
            metadata,
            phases: self.phases.into_iter().map(RawPhase::into_phase).collect(),
            call_to_action: self.call_to_action,
            rewards: self.rewards,
            why_it_matters: self.why_it_matters,
            final_role: self.final_role,
        }
    }
}

/// Normalized journey set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Catalog {
    pub journeys: Vec<JourneyContent>,
}

static BUILTIN: Lazy<Catalog> = Lazy::new(|| {
    let mut catalog = Catalog::default();
    match Catalog::from_legacy_json(include_str!("../assets/legacy_journeys.json")) {
        Ok(parsed) => catalog.journeys.extend(parsed.journeys),
        Err(err) => log::error!("bundled legacy journey data is invalid: {err}"),
    }
    match Catalog::from_raw_json(include_str!("../assets/journeys.json")) {
        Ok(parsed) => catalog.journeys.extend(parsed.journeys),
        Err(err) => log::error!("bundled journey data is invalid: {err}"),
    }
    catalog
});

impl Catalog {
    /// Create an empty catalog (useful for tests).
    #[must_use]
    pub const fn empty() -> Self {
        Self { journeys: vec![] }
    }

    /// Parse a JSON array of legacy persona-keyed journeys.
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON cannot be parsed into that shape.
    pub fn from_legacy_json(json: &str) -> Result<Self, serde_json::Error> {
        let raw: Vec<LegacyJourney> = serde_json::from_str(json)?;
        Ok(Self {
            journeys: raw.into_iter().map(LegacyJourney::into_content).collect(),
        })
    }

    /// Parse a JSON array of metadata/phases journeys.
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON cannot be parsed into that shape.
    pub fn from_raw_json(json: &str) -> Result<Self, serde_json::Error> {
        let raw: Vec<RawJourney> = serde_json::from_str(json)?;
        Ok(Self {
            journeys: raw.into_iter().map(RawJourney::into_content).collect(),
        })
    }

    /// The statically bundled journey set. This is the only content source in
    /// browser-like contexts and the fallback everywhere else.
    #[must_use]
    pub fn builtin() -> &'static Self {
        &BUILTIN
    }

    #[must_use]
    pub const fn len(&self) -> usize {
        self.journeys.len()
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.journeys.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slugify_collapses_separators() {
        assert_eq!(slugify("The Strategic Investor"), "the-strategic-investor");
        assert_eq!(slugify("  DeFi 101!  "), "defi-101");
        assert_eq!(slugify("---"), "");
    }

    #[test]
    fn legacy_journey_normalizes() {
        let json = r#"[{
            "persona": "Investor",
            "label": "The Strategic Investor",
            "icon": "chart",
            "tagline": "From saver to allocator",
            "description": "Capital allocation from first principles",
            "phases": [
                {
                    "title": "Learn",
                    "description": "Understand the market map",
                    "mission": "Finish the market map primer",
                    "xpReward": 50,
                    "nftReward": "Signal Scout"
                },
                {
                    "title": "Build",
                    "description": "Assemble a model portfolio"
                }
            ],
            "rewards": ["Allocator Badge"],
            "whyItMatters": "Capital needs stewards.",
            "finalRole": "Portfolio Steward"
        }]"#;

        let catalog = Catalog::from_legacy_json(json).unwrap();
        assert_eq!(catalog.len(), 1);
        let journey = &catalog.journeys[0];
        assert_eq!(journey.metadata.slug, "the-strategic-investor");
        assert_eq!(journey.metadata.profile_type, "Investor");
        assert_eq!(journey.phases[0].protocol_phase, Some(ProtocolPhase::Learn));
        // Missing mission falls back to the description.
        assert_eq!(journey.phases[1].mission, "Assemble a model portfolio");
        assert_eq!(journey.phases[1].icon.as_deref(), Some(DEFAULT_PHASE_ICON));
        assert_eq!(journey.rewards[0].milestone, "Allocator Badge");
        assert!(journey.rewards[0].proof.is_empty());
    }

    #[test]
    fn raw_journey_applies_fill_rules() {
        let json = r#"[{
            "metadata": {
                "title": "The Content Creator",
                "slug": "creator-path",
                "profileType": "Creator"
            },
            "phases": [
                {
                    "title": "Warm Up",
                    "description": "Find your voice",
                    "xp": 25,
                    "protocolPhase": "Cognitive"
                }
            ]
        }]"#;

        let catalog = Catalog::from_raw_json(json).unwrap();
        let phase = &catalog.journeys[0].phases[0];
        assert_eq!(phase.xp_reward, 25);
        assert_eq!(phase.mission, "Find your voice");
        assert_eq!(phase.protocol_phase, Some(ProtocolPhase::Learn));
        assert_eq!(phase.icon.as_deref(), Some(DEFAULT_PHASE_ICON));
    }

    #[test]
    fn raw_journey_generates_missing_slug() {
        let json = r#"[{
            "metadata": { "title": "Chain Cartography", "slug": "" }
        }]"#;
        let catalog = Catalog::from_raw_json(json).unwrap();
        assert_eq!(catalog.journeys[0].metadata.slug, "chain-cartography");
    }

    #[test]
    fn builtin_catalog_is_well_formed() {
        let catalog = Catalog::builtin();
        assert!(!catalog.is_empty());
        for journey in &catalog.journeys {
            assert!(!journey.metadata.slug.is_empty(), "{}", journey.metadata.title);
            assert!(!journey.phases.is_empty(), "{}", journey.metadata.title);
        }
        // Slugs identify journeys uniquely.
        let mut slugs: Vec<_> = catalog.journeys.iter().map(|j| &j.metadata.slug).collect();
        slugs.sort();
        slugs.dedup();
        assert_eq!(slugs.len(), catalog.len());
    }
}
