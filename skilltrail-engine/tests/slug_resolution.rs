use skilltrail_engine::{
    BundledProvider, Catalog, JourneyContent, JourneyRepository, SlugStrategy, resolve_slug,
};

fn journeys() -> Vec<JourneyContent> {
    Catalog::builtin().journeys.clone()
}

#[test]
fn empty_and_blank_slugs_never_match() {
    let repo = JourneyRepository::new(BundledProvider);
    assert!(repo.get_journey_by_slug("").unwrap().is_none());
    assert!(repo.get_journey_by_slug("   ").unwrap().is_none());
    assert!(resolve_slug(&journeys(), "").is_none());
}

#[test]
fn exact_slug_wins_first() {
    let all = journeys();
    let (journey, strategy) = resolve_slug(&all, "creator-path").unwrap();
    assert_eq!(strategy, SlugStrategy::Exact);
    assert_eq!(journey.metadata.slug, "creator-path");

    // Normalization still counts as exact.
    let (_, strategy) = resolve_slug(&all, "  Creator-Path  ").unwrap();
    assert_eq!(strategy, SlugStrategy::Exact);
}

#[test]
fn substring_matching_is_tried_second() {
    let all = journeys();
    // Partial slug.
    let (journey, strategy) = resolve_slug(&all, "strategic-investor").unwrap();
    assert_eq!(strategy, SlugStrategy::Substring);
    assert_eq!(journey.metadata.slug, "the-strategic-investor");

    // Slug with extra decoration containing a real slug.
    let (journey, strategy) = resolve_slug(&all, "2024-explorer-path-v2").unwrap();
    assert_eq!(strategy, SlugStrategy::Substring);
    assert_eq!(journey.metadata.slug, "explorer-path");

    // Title keyword buried in the request also counts as substring.
    let (journey, strategy) = resolve_slug(&all, "chain explorer").unwrap();
    assert_eq!(strategy, SlugStrategy::Substring);
    assert_eq!(journey.metadata.slug, "explorer-path");
}

#[test]
fn title_keyword_table_maps_to_a_persona() {
    let all = journeys();
    // "Smart Contract Bootcamp" is a retired course title; only the keyword
    // table still knows it belongs to the Builder journey.
    let (journey, strategy) = resolve_slug(&all, "smart-contract-bootcamp").unwrap();
    assert_eq!(strategy, SlugStrategy::TitleKeyword);
    assert_eq!(journey.metadata.profile_type, "Builder");
}

#[test]
fn known_alias_table_is_the_fourth_stage() {
    let all = journeys();
    let (journey, strategy) = resolve_slug(&all, "investor-journey").unwrap();
    assert_eq!(strategy, SlugStrategy::KnownAlias);
    assert_eq!(journey.metadata.profile_type, "Investor");
}

#[test]
fn anything_else_falls_back_to_the_first_journey() {
    let all = journeys();
    let (journey, strategy) = resolve_slug(&all, "zzz-does-not-exist").unwrap();
    assert_eq!(strategy, SlugStrategy::FirstAvailable);
    assert_eq!(journey.metadata.slug, all[0].metadata.slug);
}

#[test]
fn fallback_requires_at_least_one_journey() {
    let catalog = Catalog::empty();
    assert!(catalog.is_empty());
    assert!(resolve_slug(&catalog.journeys, "anything").is_none());
}

#[test]
fn repository_resolution_never_misses_once_content_exists() {
    let repo = JourneyRepository::new(BundledProvider);
    for slug in ["creator-path", "builder-journey", "totally unknown"] {
        assert!(repo.get_journey_by_slug(slug).unwrap().is_some(), "{slug}");
    }
}
