//! Counting through pagination metadata.
//!
//! The REST API never reports how many contributors, open issues or open
//! pull requests a repository has. Requesting those listings with a page
//! size of 1 turns the `rel="last"` link into an exact count: page N holds
//! item N, so the last page number is the total.

use octocrab::Page;

/// What a single page-size-1 probe observed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageProbe {
    /// Number of items present in the returned page (0 or 1 at page size 1)
    pub items_returned: usize,
    /// Target of the `rel="last"` link, when the listing spans more than one page
    pub last_page_url: Option<String>,
}

impl PageProbe {
    #[must_use]
    pub fn new(items_returned: usize, last_page_url: Option<String>) -> Self {
        Self {
            items_returned,
            last_page_url,
        }
    }

    /// Total item count implied by this probe.
    #[must_use]
    pub fn count(&self) -> u64 {
        last_page_or_item_count(self.last_page_url.as_deref(), self.items_returned)
    }
}

impl<T> From<&Page<T>> for PageProbe {
    fn from(page: &Page<T>) -> Self {
        Self::new(page.items.len(), page.last.as_ref().map(ToString::to_string))
    }
}

/// Derive a total from a page-size-1 response.
///
/// Returns the `page` query parameter of `last_page_url` when it is present
/// and parses as a positive integer, otherwise the number of items the
/// response actually carried.
#[must_use]
pub fn last_page_or_item_count(last_page_url: Option<&str>, items_returned: usize) -> u64 {
    last_page_url
        .and_then(page_number)
        .unwrap_or(items_returned as u64)
}

/// Extract the `page` query parameter from a link target.
///
/// `per_page` and other parameters ending in `page` are ignored.
fn page_number(url: &str) -> Option<u64> {
    let query = url.split_once('?')?.1;
    let query = query.split('#').next().unwrap_or(query);

    query
        .split('&')
        .filter_map(|pair| pair.split_once('='))
        .find(|(key, _)| *key == "page")
        .and_then(|(_, value)| value.parse::<u64>().ok())
        .filter(|page| *page > 0)
}
