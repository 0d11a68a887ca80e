// Tests for URL parsing and classification

use interlink_core::{Category, PatternPreset, PatternSet, UrlComponents, categorize, classify};
use interlink_core::{InterlinkError, UrlRecord};

// ============================================================================
// Components
// ============================================================================

#[test]
fn test_depth_counts_segments() {
    let cases = [
        ("https://x.com/", 0),
        ("https://x.com", 0),
        ("https://x.com//", 0),
        ("https://x.com/a", 1),
        ("https://x.com/a/b/", 2),
        ("https://x.com//a//b//c", 3),
    ];
    for (url, depth) in cases {
        let components = UrlComponents::parse(url);
        assert_eq!(components.depth, depth, "{}", url);
        assert_eq!(components.segments.len(), depth, "{}", url);
    }
}

#[test]
fn test_components_strip_slashes() {
    let components = UrlComponents::parse("https://x.com/ca/los-angeles/");
    assert_eq!(components.domain, "x.com");
    assert_eq!(components.path, "ca/los-angeles");
    assert_eq!(components.segments, vec!["ca", "los-angeles"]);
}

#[test]
fn test_unparsable_url_yields_empty_components() {
    let components = UrlComponents::parse("not a url");
    assert_eq!(components, UrlComponents::default());
    assert_eq!(components.depth, 0);
}

#[test]
fn test_query_is_not_part_of_path() {
    let components = UrlComponents::parse("https://x.com/product/blue?color=red#top");
    assert_eq!(components.path, "product/blue");
}

// ============================================================================
// Classification
// ============================================================================

#[test]
fn test_custom_pdp_pattern() {
    let patterns = PatternSet::from_pairs([("pdp", "product/[a-z0-9-]+")]).unwrap();
    assert_eq!(classify("https://x.com/product/blue-shirt", &patterns), Category::Pdp);
    assert_eq!(classify("https://x.com/about", &patterns), Category::Other);
}

#[test]
fn test_first_match_wins() {
    let patterns = PatternSet::from_pairs([("category_plp", "^shop"), ("pdp", "^shop/[a-z]+$")]).unwrap();
    assert_eq!(classify("https://x.com/shop/shirts", &patterns), Category::CategoryPlp);
}

#[test]
fn test_classification_is_deterministic() {
    let patterns = PatternPreset::RealEstate.pattern_set().unwrap();
    let url = "https://x.com/tx/austin/55-elm-st";
    let first = classify(url, &patterns);
    for _ in 0..10 {
        assert_eq!(classify(url, &patterns), first);
    }
    assert_eq!(first, Category::Pdp);
}

#[test]
fn test_malformed_url_is_other_under_presets() {
    for preset in PatternPreset::ALL {
        let patterns = preset.pattern_set().unwrap();
        assert_eq!(classify("::::", &patterns), Category::Other, "{}", preset);
        assert_eq!(classify("https://x.com/", &patterns), Category::Other, "{}", preset);
    }
}

#[test]
fn test_empty_pattern_is_skipped() {
    let patterns = PatternSet::from_pairs([("pdp", ""), ("city_plp", "^c/")]).unwrap();
    assert_eq!(patterns.len(), 1);
    assert_eq!(classify("https://x.com/c/d", &patterns), Category::CityPlp);
}

#[test]
fn test_invalid_regex_is_config_error() {
    let result = PatternSet::from_pairs([("pdp", "product/(")]);
    assert!(matches!(result, Err(InterlinkError::InvalidPattern { .. })));
}

#[test]
fn test_unknown_category_is_config_error() {
    let result = PatternSet::from_pairs([("widget", "x")]);
    assert!(matches!(result, Err(InterlinkError::UnknownCategory(_))));
}

#[test]
fn test_other_cannot_carry_pattern() {
    let result = PatternSet::from_pairs([("other", ".*")]);
    assert!(matches!(result, Err(InterlinkError::InvalidValue(_))));
}

#[test]
fn test_ecommerce_preset() {
    let patterns = PatternPreset::Ecommerce.pattern_set().unwrap();
    assert_eq!(classify("https://shop.com/products/red-mug", &patterns), Category::Pdp);
    assert_eq!(classify("https://shop.com/collections/mugs", &patterns), Category::CategoryPlp);
    assert_eq!(classify("https://shop.com/stores/ca", &patterns), Category::StatePlp);
    assert_eq!(classify("https://shop.com/stores/ca/fresno", &patterns), Category::CityPlp);
}

// ============================================================================
// Grouping
// ============================================================================

#[test]
fn test_categorize_keeps_ingestion_order() {
    let patterns = PatternPreset::RealEstate.pattern_set().unwrap();
    let urls = [
        "https://x.com/ca/fresno/2-b-st",
        "https://x.com/ca",
        "https://x.com/ca/fresno/1-a-st",
        "https://x.com/contact",
    ];
    let pages = categorize(urls.iter().map(|u| UrlRecord::new(*u)).collect(), &patterns);

    let pdps: Vec<&str> = pages
        .get(Category::Pdp)
        .iter()
        .map(|r| r.address.as_str())
        .collect();
    assert_eq!(pdps, vec![urls[0], urls[2]]);
    assert_eq!(pages.count(Category::StatePlp), 1);
    assert_eq!(pages.count(Category::Other), 1);
    assert_eq!(pages.count(Category::CityPlp), 0);
    assert_eq!(pages.total(), 4);
    assert_eq!(pages.counts().len(), 5);
}
