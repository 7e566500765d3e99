//! Tests for counting through the last-page link.

use ecosystem_observability::{PageProbe, last_page_or_item_count};
use octocrab::Page;
use serde_json::{Value, json};

#[test]
fn test_last_page_is_the_count() {
    let last = "https://api.github.com/repositories/1296269/contributors?per_page=1&anon=true&page=42";
    assert_eq!(last_page_or_item_count(Some(last), 1), 42);
}

#[test]
fn test_item_count_without_marker() {
    assert_eq!(last_page_or_item_count(None, 0), 0);
    assert_eq!(last_page_or_item_count(None, 1), 1);
}

#[test]
fn test_per_page_is_not_mistaken_for_page() {
    let last = "https://api.github.com/repos/o/r/issues?page=7&per_page=1&state=open";
    assert_eq!(last_page_or_item_count(Some(last), 1), 7);

    let no_page = "https://api.github.com/repos/o/r/issues?per_page=1&state=open";
    assert_eq!(last_page_or_item_count(Some(no_page), 1), 1);
}

#[test]
fn test_unparsable_marker_falls_back_to_items() {
    assert_eq!(
        last_page_or_item_count(Some("https://api.github.com/x?page=last"), 1),
        1
    );
    assert_eq!(last_page_or_item_count(Some("https://api.github.com/x"), 0), 0);
    assert_eq!(
        last_page_or_item_count(Some("https://api.github.com/x?page=0"), 1),
        1
    );
}

#[test]
fn test_probe_count() {
    let probe = PageProbe::new(
        1,
        Some("https://api.github.com/repos/o/r/pulls?state=open&per_page=1&page=13".to_string()),
    );
    assert_eq!(probe.count(), 13);
    assert_eq!(PageProbe::default().count(), 0);
}

#[test]
fn test_probe_from_api_page_with_last_link() {
    let mut page: Page<Value> = Page::default();
    page.items.push(json!({ "login": "octocat", "contributions": 12 }));
    page.last =
        "https://api.github.com/repositories/1/contributors?per_page=1&anon=true&page=42"
            .parse()
            .ok();
    assert!(page.last.is_some());

    let probe = PageProbe::from(&page);
    assert_eq!(probe.items_returned, 1);
    assert_eq!(
        probe.last_page_url.as_deref(),
        Some("https://api.github.com/repositories/1/contributors?per_page=1&anon=true&page=42")
    );
    assert_eq!(probe.count(), 42);
}

#[test]
fn test_probe_from_single_page_listing() {
    let mut page: Page<Value> = Page::default();
    page.items.push(json!({ "type": "Anonymous", "contributions": 3 }));

    assert_eq!(PageProbe::from(&page).count(), 1);
    assert_eq!(PageProbe::from(&Page::<Value>::default()).count(), 0);
}
