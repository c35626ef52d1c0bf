//! Page arithmetic for the canonical listing.
//!
//! Pages are 1-based on the wire and offsets are 0-based. The paginator
//! never fails and never looks at rows; an empty page is for the caller to
//! report.

use url::Url;

/// Slice bounds and neighbour markers for one page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageWindow {
    /// The effective 1-based page number.
    pub page: i64,
    /// Zero-based index of the first row.
    pub offset: i64,
    /// Maximum number of rows on the page.
    pub limit: i64,
    /// URL of the following page, if any rows lie beyond this one.
    pub next: Option<String>,
    /// URL of the preceding page, if this is not the first.
    pub previous: Option<String>,
}

/// Compute the window for `page` of size `limit` over `total_count` rows.
///
/// Negative pages clamp to 0 and page 0 means page 1. Markers are built
/// from `url` with `page` and `limit` replaced.
pub fn paginate(page: i64, limit: i64, total_count: i64, url: &Url) -> PageWindow {
    // Negative clamps to 0, and 0 reads as the first page.
    let page = page.max(1);
    let offset = (page - 1).saturating_mul(limit);

    let next = (page.saturating_mul(limit) < total_count)
        .then(|| page.checked_add(1))
        .flatten()
        .map(|next| marker(url, next, limit));
    let previous = (page - 1 >= 1).then(|| marker(url, page - 1, limit));

    PageWindow {
        page,
        offset,
        limit,
        next,
        previous,
    }
}

/// `url` with `page` and `limit` set, all other parameters kept in order.
///
/// Existing `page`/`limit` pairs are dropped and the new values appended.
fn marker(url: &Url, page: i64, limit: i64) -> String {
    let kept: Vec<(String, String)> = url
        .query_pairs()
        .filter(|(key, _)| key != "page" && key != "limit")
        .map(|(key, value)| (key.into_owned(), value.into_owned()))
        .collect();

    let mut marker = url.clone();
    marker.set_query(None);
    marker
        .query_pairs_mut()
        .extend_pairs(kept)
        .append_pair("page", &page.to_string())
        .append_pair("limit", &limit.to_string());
    marker.into()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn url(s: &str) -> Url {
        Url::parse(s).unwrap()
    }

    fn items() -> Url {
        url("http://localhost:3000/items")
    }

    #[test]
    fn last_partial_page() {
        let window = paginate(3, 10, 25, &items());

        assert_eq!(window.page, 3);
        assert_eq!(window.offset, 20);
        assert_eq!(window.limit, 10);
        assert!(window.next.is_none());
        assert_eq!(
            window.previous.as_deref(),
            Some("http://localhost:3000/items?page=2&limit=10")
        );
    }

    #[test]
    fn first_page_has_no_previous() {
        let window = paginate(1, 10, 25, &items());

        assert_eq!(window.offset, 0);
        assert!(window.previous.is_none());
        assert_eq!(
            window.next.as_deref(),
            Some("http://localhost:3000/items?page=2&limit=10")
        );
    }

    #[test]
    fn page_zero_is_page_one() {
        assert_eq!(paginate(0, 10, 25, &items()), paginate(1, 10, 25, &items()));
    }

    #[test]
    fn negative_page_is_page_zero() {
        assert_eq!(paginate(-5, 10, 25, &items()), paginate(0, 10, 25, &items()));
    }

    #[test]
    fn exact_fit_has_no_next() {
        let window = paginate(2, 10, 20, &items());
        assert!(window.next.is_none());
        assert!(window.previous.is_some());
    }

    #[test]
    fn page_beyond_range_still_computes_bounds() {
        let window = paginate(9, 10, 25, &items());

        assert_eq!(window.offset, 80);
        assert!(window.next.is_none());
        assert_eq!(
            window.previous.as_deref(),
            Some("http://localhost:3000/items?page=8&limit=10")
        );
    }

    #[test]
    fn empty_table() {
        let window = paginate(1, 10, 0, &items());
        assert_eq!(window.offset, 0);
        assert!(window.next.is_none());
        assert!(window.previous.is_none());
    }

    #[test]
    fn markers_preserve_other_parameters() {
        let request = url("http://example.com/items?format=json&page=2&limit=5&lang=ru");
        let window = paginate(2, 5, 100, &request);

        assert_eq!(
            window.next.as_deref(),
            Some("http://example.com/items?format=json&lang=ru&page=3&limit=5")
        );
        assert_eq!(
            window.previous.as_deref(),
            Some("http://example.com/items?format=json&lang=ru&page=1&limit=5")
        );
    }

    #[test]
    fn markers_drop_repeated_page_parameters() {
        let request = url("http://example.com/items?page=1&page=7");
        let window = paginate(2, 10, 100, &request);

        assert_eq!(
            window.next.as_deref(),
            Some("http://example.com/items?page=3&limit=10")
        );
    }

    #[test]
    fn huge_page_does_not_overflow() {
        let window = paginate(i64::MAX, 10, 25, &items());
        assert_eq!(window.offset, i64::MAX);
        assert!(window.next.is_none());
        assert!(window.previous.is_some());
    }
}
