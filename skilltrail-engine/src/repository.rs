//! Read-only journey access with source fallback and forgiving slug lookup.
use log::{debug, warn};
use std::convert::Infallible;

use crate::ContentProvider;
use crate::catalog::{Catalog, slugify};
use crate::content::{JourneyContent, JourneyMetadata};

/// Historical marketing titles mapped to the persona whose journey replaced
/// them. Consulted only after exact and substring slug matching both miss;
/// the titles here predate the current labels, which is why the substring
/// stage cannot find them.
pub const TITLE_KEYWORD_PERSONAS: &[(&str, &str)] = &[
    ("Intro to Token Investing", "Investor"),
    ("Smart Contract Bootcamp", "Builder"),
    ("Creator Economy Crash Course", "Creator"),
];

/// Known historical slugs mapped to personas. Last lookup stage before the
/// first-journey fallback.
pub const SLUG_ALIAS_PERSONAS: &[(&str, &str)] = &[
    ("investor-journey", "Investor"),
    ("builder-journey", "Builder"),
    ("creator-journey", "Creator"),
];

/// Which stage of the slug fallback chain produced a match.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlugStrategy {
    /// Slug matched exactly.
    Exact,
    /// Slug contained, or was contained in, a journey slug or title.
    Substring,
    /// A title keyword mapped the slug to a persona.
    TitleKeyword,
    /// A known historical slug mapped to a persona.
    KnownAlias,
    /// Nothing matched; the first available journey was used.
    FirstAvailable,
}

fn find_by_persona<'a>(journeys: &'a [JourneyContent], persona: &str) -> Option<&'a JourneyContent> {
    journeys
        .iter()
        .find(|j| j.metadata.profile_type.eq_ignore_ascii_case(persona))
}

/// Resolve a slug against a journey list, trying each strategy in order and
/// reporting which one hit. Empty or whitespace slugs never match. Once the
/// list is non-empty this returns `Some`; the chain is deliberately forgiving
/// of inconsistent historical slugs.
#[must_use]
pub fn resolve_slug<'a>(
    journeys: &'a [JourneyContent],
    slug: &str,
) -> Option<(&'a JourneyContent, SlugStrategy)> {
    let normalized = slug.trim().to_lowercase();
    if normalized.is_empty() {
        return None;
    }

    if let Some(journey) = journeys.iter().find(|j| j.metadata.slug == normalized) {
        return Some((journey, SlugStrategy::Exact));
    }

    if let Some(journey) = journeys.iter().find(|j| {
        j.metadata.slug.contains(&normalized)
            || normalized.contains(&j.metadata.slug)
            || j.metadata.title.to_lowercase().contains(&normalized)
    }) {
        return Some((journey, SlugStrategy::Substring));
    }

    let keyword_hit = TITLE_KEYWORD_PERSONAS.iter().find(|(title, _)| {
        let title_slug = slugify(title);
        normalized.contains(&title_slug) || title_slug.contains(&normalized)
    });
    if let Some((_, persona)) = keyword_hit
        && let Some(journey) = find_by_persona(journeys, persona)
    {
        return Some((journey, SlugStrategy::TitleKeyword));
    }

    if let Some((_, persona)) = SLUG_ALIAS_PERSONAS
        .iter()
        .find(|(alias, _)| *alias == normalized)
        && let Some(journey) = find_by_persona(journeys, persona)
    {
        return Some((journey, SlugStrategy::KnownAlias));
    }

    journeys
        .first()
        .map(|journey| (journey, SlugStrategy::FirstAvailable))
}

/// Read-only access to journey content.
///
/// The repository consults the injected provider first and falls back to the
/// bundled catalog when the provider errors out or returns nothing. With the
/// fallback disabled, provider failures surface to the caller instead, which
/// is what the stores' error classification consumes.
#[derive(Debug)]
pub struct JourneyRepository<P: ContentProvider> {
    provider: P,
    fallback_to_builtin: bool,
}

impl<P: ContentProvider> JourneyRepository<P> {
    /// Repository with the bundled-catalog fallback enabled.
    pub const fn new(provider: P) -> Self {
        Self {
            provider,
            fallback_to_builtin: true,
        }
    }

    /// Repository that surfaces provider failures instead of falling back.
    pub const fn without_fallback(provider: P) -> Self {
        Self {
            provider,
            fallback_to_builtin: false,
        }
    }

    /// All available journeys.
    ///
    /// # Errors
    ///
    /// Returns the provider error only when the bundled fallback is disabled.
    pub fn get_all_journeys(&self) -> Result<Vec<JourneyContent>, P::Error> {
        match self.provider.load_journeys() {
            Ok(journeys) if !journeys.is_empty() => Ok(journeys),
            Ok(_) => {
                if self.fallback_to_builtin {
                    debug!("content provider returned no journeys; using bundled catalog");
                    Ok(Catalog::builtin().journeys.clone())
                } else {
                    Ok(Vec::new())
                }
            }
            Err(err) => {
                if self.fallback_to_builtin {
                    warn!("content provider failed ({err}); using bundled catalog");
                    Ok(Catalog::builtin().journeys.clone())
                } else {
                    Err(err)
                }
            }
        }
    }

    /// Journeys whose profile type matches `persona`, case-insensitively.
    /// A blank persona matches nothing.
    ///
    /// # Errors
    ///
    /// Returns the provider error only when the bundled fallback is disabled.
    pub fn get_journeys_by_persona(&self, persona: &str) -> Result<Vec<JourneyContent>, P::Error> {
        if persona.trim().is_empty() {
            warn!("get_journeys_by_persona called with a blank persona");
            return Ok(Vec::new());
        }
        let all = self.get_all_journeys()?;
        Ok(all
            .into_iter()
            .filter(|j| j.metadata.profile_type.eq_ignore_ascii_case(persona.trim()))
            .collect())
    }

    /// Resolve one journey by slug through the forgiving fallback chain.
    /// Empty slugs always yield `None`; otherwise `None` only when no journey
    /// exists at all. The provider is given first right of refusal on the
    /// exact slug, mirroring the preferred-source split.
    ///
    /// # Errors
    ///
    /// Returns the provider error only when the bundled fallback is disabled.
    pub fn get_journey_by_slug(&self, slug: &str) -> Result<Option<JourneyContent>, P::Error> {
        let normalized = slug.trim().to_lowercase();
        if normalized.is_empty() {
            warn!("get_journey_by_slug called with an empty slug");
            return Ok(None);
        }

        match self.provider.load_journey(&normalized) {
            Ok(Some(journey)) => return Ok(Some(journey)),
            Ok(None) => {}
            Err(err) => {
                if !self.fallback_to_builtin {
                    return Err(err);
                }
                warn!("content provider failed for slug {normalized} ({err}); trying catalog");
            }
        }

        let all = self.get_all_journeys()?;
        let resolved = resolve_slug(&all, &normalized);
        if let Some((journey, strategy)) = resolved {
            if strategy != SlugStrategy::Exact {
                debug!("slug {normalized} resolved via {strategy:?} to {}", journey.metadata.slug);
            }
            Ok(Some(journey.clone()))
        } else {
            Ok(None)
        }
    }

    /// Metadata of every available journey.
    ///
    /// # Errors
    ///
    /// Returns the provider error only when the bundled fallback is disabled.
    pub fn get_all_journeys_metadata(&self) -> Result<Vec<JourneyMetadata>, P::Error> {
        Ok(self
            .get_all_journeys()?
            .into_iter()
            .map(|j| j.metadata)
            .collect())
    }
}

/// Provider serving the statically bundled catalog. The only content source
/// in browser-like contexts.
#[derive(Debug, Clone, Copy, Default)]
pub struct BundledProvider;

impl ContentProvider for BundledProvider {
    type Error = Infallible;

    fn load_journeys(&self) -> Result<Vec<JourneyContent>, Self::Error> {
        Ok(Catalog::builtin().journeys.clone())
    }
}
