//! Anchor text synthesis.

use crate::category::Category;
use crate::record::UrlRecord;
use rand::Rng;
use rand::seq::SliceRandom;

pub const DEFAULT_ANCHOR: &str = "View Listings";

const MAX_TITLE_CHARS: usize = 50;
const ELLIPSIS: &str = "...";

fn templates(category: Category) -> &'static [&'static str] {
    match category {
        Category::Pdp => &["{title}", "View {title}", "See {title}"],
        Category::CityPlp => &["Browse {title}", "Explore {title}", "{title} Listings"],
        Category::StatePlp => &["Explore {title}", "Browse {title}"],
        Category::CategoryPlp => &["Shop {title}", "Browse {title}", "View All {title}"],
        Category::Other => &["{title}", "Learn More About {title}"],
    }
}

/// Anchor text for a link pointing at `target`, classified as `category`.
///
/// Uses the target's title when there is one (phrasing picked at random), otherwise
/// derives a label from the URL segments.
pub fn anchor_text<R: Rng + ?Sized>(target: &UrlRecord, category: Category, rng: &mut R) -> String {
    let title = target
        .title
        .as_deref()
        .map(clean_title)
        .filter(|t| !t.is_empty());

    match title {
        Some(title) => {
            let template = templates(category).choose(rng).copied().unwrap_or("{title}");
            template.replace("{title}", &title)
        }
        None => anchor_from_segments(target.segments(), category),
    }
}

/// Drop one trailing site name (`| Site Name`, or ` - Site Name` when there is no
/// `|`), and cap the length.
pub fn clean_title(title: &str) -> String {
    let title = title.trim();
    let cleaned = strip_suffix_at(title, "|")
        .or_else(|| strip_suffix_at(title, " - "))
        .unwrap_or(title);

    truncate(cleaned, MAX_TITLE_CHARS)
}

fn strip_suffix_at<'a>(title: &'a str, separator: &str) -> Option<&'a str> {
    let (head, _) = title.rsplit_once(separator)?;
    let head = head.trim();
    (!head.is_empty()).then_some(head)
}

fn truncate(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    let keep = max_chars - ELLIPSIS.len();
    let head: String = text.chars().take(keep).collect();
    format!("{}{}", head.trim_end(), ELLIPSIS)
}

/// Label derived from the URL path alone.
pub fn anchor_from_segments(segments: &[String], category: Category) -> String {
    let label = match category {
        Category::CityPlp => segments.get(1).map(|city| format!("{} Listings", title_case(city))),
        Category::StatePlp => segments
            .first()
            .map(|state| format!("{} Listings", state.to_uppercase())),
        Category::Pdp | Category::CategoryPlp | Category::Other => segments.last().map(|s| title_case(s)),
    };

    label
        .filter(|l| !l.trim().is_empty())
        .unwrap_or_else(|| DEFAULT_ANCHOR.to_string())
}

/// `los-angeles` -> `Los Angeles`
pub fn title_case(segment: &str) -> String {
    segment
        .split(['-', '_', ' '])
        .filter(|word| !word.is_empty())
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                None => String::new(),
                Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn segs(path: &str) -> Vec<String> {
        path.split('/').filter(|s| !s.is_empty()).map(str::to_string).collect()
    }

    #[test]
    fn test_clean_title_strips_site_suffix() {
        assert_eq!(clean_title("Blue Shirt | Example Store"), "Blue Shirt");
        assert_eq!(clean_title("Los Angeles Homes - Acme Realty"), "Los Angeles Homes");
        assert_eq!(clean_title("Condos | Miami - Acme Realty"), "Condos");
        assert_eq!(clean_title("| Only Site"), "| Only Site");
        assert_eq!(clean_title("Plain"), "Plain");
    }

    #[test]
    fn test_clean_title_strips_one_suffix_only() {
        assert_eq!(clean_title("Condo - Pool View | Acme Realty"), "Condo - Pool View");
        assert_eq!(clean_title("Condo - Pool View - Acme Realty"), "Condo - Pool View");
        assert_eq!(clean_title("| Acme - Realty"), "| Acme");
    }

    #[test]
    fn test_clean_title_truncates() {
        let long = "a".repeat(80);
        let cleaned = clean_title(&long);
        assert_eq!(cleaned.chars().count(), 50);
        assert!(cleaned.ends_with("..."));

        let exact = "b".repeat(50);
        assert_eq!(clean_title(&exact), exact);
    }

    #[test]
    fn test_segments_per_category() {
        let listing = segs("ca/los-angeles/123-main-st");
        assert_eq!(anchor_from_segments(&listing, Category::Pdp), "123 Main St");
        assert_eq!(
            anchor_from_segments(&segs("ca/los-angeles"), Category::CityPlp),
            "Los Angeles Listings"
        );
        assert_eq!(anchor_from_segments(&segs("ca"), Category::StatePlp), "CA Listings");
        assert_eq!(
            anchor_from_segments(&segs("category/summer-dresses"), Category::CategoryPlp),
            "Summer Dresses"
        );
    }

    #[test]
    fn test_segments_fallback() {
        assert_eq!(anchor_from_segments(&[], Category::Pdp), DEFAULT_ANCHOR);
        assert_eq!(anchor_from_segments(&segs("ca"), Category::CityPlp), DEFAULT_ANCHOR);
        assert_eq!(anchor_from_segments(&[], Category::StatePlp), DEFAULT_ANCHOR);
        assert_eq!(anchor_from_segments(&[], Category::Other), DEFAULT_ANCHOR);
    }

    #[test]
    fn test_title_templates_embed_clean_title() {
        let mut rng = StdRng::seed_from_u64(7);
        let target = UrlRecord::new("https://x.com/ca/los-angeles")
            .with_title("Los Angeles | Acme Realty");
        for _ in 0..20 {
            let anchor = anchor_text(&target, Category::CityPlp, &mut rng);
            assert!(anchor.contains("Los Angeles"), "{}", anchor);
            assert!(!anchor.contains("Acme"), "{}", anchor);
        }
    }

    #[test]
    fn test_title_variants_are_all_reachable() {
        let mut rng = StdRng::seed_from_u64(1);
        let target = UrlRecord::new("https://x.com/shop/shirts").with_title("Shirts");
        let mut seen = std::collections::HashSet::new();
        for _ in 0..200 {
            seen.insert(anchor_text(&target, Category::CategoryPlp, &mut rng));
        }
        assert_eq!(seen.len(), 3);
    }

    #[test]
    fn test_without_title_uses_segments() {
        let mut rng = StdRng::seed_from_u64(0);
        let target = UrlRecord::new("https://x.com/ca");
        assert_eq!(anchor_text(&target, Category::StatePlp, &mut rng), "CA Listings");
    }
}
