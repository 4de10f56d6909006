//! Catalog Matching Helpers
//!
//! Small pure functions shared by product search and episode queries.

use regex::Regex;
use std::sync::LazyLock;

use super::models::Product;

static HTML_TAG: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"<[^>]*>").unwrap());

/// Removes anything that looks like an HTML tag, keeping the text between tags.
pub fn strip_html(html: &str) -> String {
    HTML_TAG.replace_all(html, "").into_owned()
}

/// Case-insensitive substring test. `needle` is expected to be lowercase.
pub fn contains_lowercase(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(needle)
}

/// Returns true when `term` appears in the product title or its tag-stripped
/// description, ignoring case.
pub fn matches_search_term(product: &Product, term: &str) -> bool {
    let term = term.to_lowercase();
    if contains_lowercase(product.title_text(), &term) {
        return true;
    }
    product
        .description
        .as_deref()
        .is_some_and(|desc| contains_lowercase(&strip_html(desc), &term))
}

/// Category filter: `category` must occur, ignoring case, inside at least one
/// of the product's category labels. No filter means everything matches.
pub fn matches_category(product: &Product, category: Option<&str>) -> bool {
    let Some(category) = category else {
        return true;
    };
    let category = category.to_lowercase();
    product
        .categories()
        .iter()
        .any(|label| contains_lowercase(label, &category))
}

/// Treats empty strings the same as a missing value.
pub fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

/// Splits a comma-separated query value into its non-empty items.
pub fn split_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn product(title: &str, description: &str, categories: &[&str]) -> Product {
        Product {
            title: Some(json!({ "rendered": title })),
            description: Some(description.to_string()),
            product_categories: Some(categories.iter().map(|c| c.to_string()).collect()),
            ..Product::default()
        }
    }

    #[test]
    fn strip_html_keeps_inner_text() {
        assert_eq!(
            strip_html("<p>A <strong>soft</strong> otter</p>"),
            "A soft otter"
        );
        assert_eq!(strip_html("no tags"), "no tags");
    }

    #[test]
    fn search_term_matches_title_or_description() {
        let p = product("Martin Kratt Plush", "<p>Cuddly <em>friend</em></p>", &[]);
        assert!(matches_search_term(&p, "plush"));
        assert!(matches_search_term(&p, "CUDDLY FRIEND"));
        assert!(!matches_search_term(&p, "tortuga"));
    }

    #[test]
    fn search_term_does_not_match_markup() {
        let p = product("Book", "<span class=\"plush\">Story</span>", &[]);
        assert!(!matches_search_term(&p, "plush"));
        assert!(!matches_search_term(&p, "span"));
    }

    #[test]
    fn category_is_case_insensitive_substring() {
        let p = product("Otter", "", &["Plush Toys", "Gifts"]);
        assert!(matches_category(&p, Some("plush")));
        assert!(matches_category(&p, Some("GIFT")));
        assert!(!matches_category(&p, Some("books")));
        assert!(matches_category(&p, None));
    }

    #[test]
    fn category_filter_rejects_uncategorized_products() {
        let p = Product::default();
        assert!(!matches_category(&p, Some("plush")));
    }

    #[test]
    fn empty_strings_count_as_absent() {
        assert_eq!(non_empty(Some(String::new())), None);
        assert_eq!(non_empty(Some("x".into())), Some("x".into()));
        assert_eq!(split_list("otter, ,red panda"), vec!["otter", "red panda"]);
    }
}
