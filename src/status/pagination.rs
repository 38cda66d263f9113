//! Pagination Headers
//!
//! Parsing of the `link` and `x-total-count` response headers, and the rule
//! for folding a freshly fetched page into the entities already loaded.

use super::model::Status;
use super::state::{PageLinks, TotalItems};

/// Parse a `link` header into page cursors.
///
/// The header looks like
/// `<http://host/api/statuses?page=1&size=20>; rel="next", <...?page=0&size=20>; rel="first"`.
/// Parts without a readable `page` parameter or without a known `rel` are
/// skipped; an empty header gives empty links.
pub fn parse_link_header(header: &str) -> PageLinks {
    let mut links = PageLinks::default();

    // URLs may carry commas of their own (e.g. `sort=id,asc`), so parts are
    // delimited by their opening `<` rather than by `,`.
    for part in header.split('<').skip(1) {
        let Some((url, params)) = part.split_once('>') else {
            continue;
        };
        let Some(rel) = rel_name(params) else {
            continue;
        };
        let Some(page) = page_param(url) else {
            continue;
        };
        links.set(rel, page);
    }

    links
}

/// Extract `name` from `; rel="name"`
fn rel_name(params: &str) -> Option<&str> {
    let start = params.find("rel=")? + "rel=".len();
    let rest = params[start..].trim_start().strip_prefix('"')?;
    let end = rest.find('"')?;
    Some(&rest[..end])
}

fn page_param(url: &str) -> Option<i64> {
    let (_, query) = url.split_once('?')?;
    url::form_urlencoded::parse(query.as_bytes())
        .find(|(key, _)| key == "page")
        .and_then(|(_, value)| parse_int(&value))
}

/// Merge a fetched page into the entities already loaded.
///
/// The page replaces the previous entities when nothing is loaded yet, when
/// it is the first page (no `prev` cursor), or when the whole list fits on a
/// single page. Otherwise it is appended.
pub fn merge_page(previous: &[Status], page: Vec<Status>, links: &PageLinks) -> Vec<Status> {
    let single_page = links.first == links.last;
    if previous.is_empty() || links.prev.is_none() || single_page {
        return page;
    }

    let mut merged = Vec::with_capacity(previous.len() + page.len());
    merged.extend_from_slice(previous);
    merged.extend(page);
    merged
}

/// Parse the `x-total-count` header
pub fn parse_total_count(header: Option<&str>) -> TotalItems {
    match header.and_then(parse_int) {
        Some(count) => TotalItems::Count(count),
        None => TotalItems::NotANumber,
    }
}

/// Lenient base-10 integer parse.
///
/// Skips leading whitespace, accepts an optional sign, then reads the longest
/// run of ASCII digits and ignores whatever follows (`"42abc"` is 42).
/// Returns `None` when there are no digits. Values beyond the `i64` range
/// saturate to `i64::MAX` / `i64::MIN`.
pub fn parse_int(input: &str) -> Option<i64> {
    let trimmed = input.trim_start();
    let (negative, unsigned) = match trimmed.as_bytes().first() {
        Some(b'-') => (true, &trimmed[1..]),
        Some(b'+') => (false, &trimmed[1..]),
        _ => (false, trimmed),
    };

    let digits: Vec<i64> = unsigned
        .bytes()
        .take_while(|b| b.is_ascii_digit())
        .map(|b| i64::from(b - b'0'))
        .collect();
    if digits.is_empty() {
        return None;
    }

    // Accumulate with the sign applied so i64::MIN stays representable
    let value = digits.into_iter().fold(0i64, |acc, d| {
        let shifted = acc.saturating_mul(10);
        if negative {
            shifted.saturating_sub(d)
        } else {
            shifted.saturating_add(d)
        }
    });
    Some(value)
}
