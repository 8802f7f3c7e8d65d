//! Pagination links parsed from the `Link` response header.
//!
//! The backend answers list requests with a header of the form
//!
//! ```text
//! </api/books?page=3&per_page=20>; rel="next", </api/books?page=1&per_page=20>; rel="prev"
//! ```
//!
//! [`PageLinks::parse`] turns it into a map of relation name to URL. Malformed
//! entries are skipped rather than failing the whole response.

use std::collections::HashMap;

/// Relation name of the first page link.
pub const REL_FIRST: &str = "first";
/// Relation name of the previous page link.
pub const REL_PREV: &str = "prev";
/// Relation name of the next page link.
pub const REL_NEXT: &str = "next";
/// Relation name of the last page link.
pub const REL_LAST: &str = "last";

/// Pagination relations and their URLs.
///
/// Any relation present in the header is kept, including ones this crate
/// does not interpret.
///
/// # Example
///
/// ```rust
/// use bookstore_client::clients::PageLinks;
///
/// let links = PageLinks::parse(
///     r#"</api/books?page=2>; rel="next", </api/books?page=1>; rel="prev""#,
/// );
///
/// assert_eq!(links.next(), Some("/api/books?page=2"));
/// assert_eq!(links.prev(), Some("/api/books?page=1"));
/// assert_eq!(links.page_number("next"), Some(2));
/// assert!(links.last().is_none());
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PageLinks {
    links: HashMap<String, String>,
}

impl PageLinks {
    /// Creates an empty set of links.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses a `Link` header value.
    ///
    /// Each comma-separated entry must look like `<url>; rel="name"`. Entries
    /// missing the angle-bracketed URL or the `rel` parameter are skipped. An
    /// empty header yields an empty set. When a relation appears twice, the
    /// later entry wins.
    #[must_use]
    pub fn parse(header_value: &str) -> Self {
        let mut links = HashMap::new();

        for segment in split_top_level(header_value) {
            if let Some((rel, url)) = parse_segment(segment) {
                links.insert(rel.to_string(), url.to_string());
            }
        }

        Self { links }
    }

    /// Parses an optional header value; `None` yields an empty set.
    #[must_use]
    pub fn from_header(header_value: Option<&str>) -> Self {
        header_value.map_or_else(Self::default, Self::parse)
    }

    /// Returns the URL for the given relation.
    #[must_use]
    pub fn get(&self, rel: &str) -> Option<&str> {
        self.links.get(rel).map(String::as_str)
    }

    /// Returns the URL of the first page.
    #[must_use]
    pub fn first(&self) -> Option<&str> {
        self.get(REL_FIRST)
    }

    /// Returns the URL of the previous page.
    #[must_use]
    pub fn prev(&self) -> Option<&str> {
        self.get(REL_PREV)
    }

    /// Returns the URL of the next page.
    #[must_use]
    pub fn next(&self) -> Option<&str> {
        self.get(REL_NEXT)
    }

    /// Returns the URL of the last page.
    #[must_use]
    pub fn last(&self) -> Option<&str> {
        self.get(REL_LAST)
    }

    /// Returns the `page` query parameter of the given relation's URL.
    ///
    /// Views use this to render numbered page buttons.
    #[must_use]
    pub fn page_number(&self, rel: &str) -> Option<u32> {
        self.get(rel)
            .and_then(|url| query_value(url, "page"))
            .and_then(|page| page.parse().ok())
    }

    /// Returns `true` if a next page is linked.
    #[must_use]
    pub fn has_next(&self) -> bool {
        self.next().is_some()
    }

    /// Returns `true` if a previous page is linked.
    #[must_use]
    pub fn has_prev(&self) -> bool {
        self.prev().is_some()
    }

    /// Returns the number of relations.
    #[must_use]
    pub fn len(&self) -> usize {
        self.links.len()
    }

    /// Returns `true` if no relation was parsed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.links.is_empty()
    }

    /// Iterates over `(relation, url)` pairs in no particular order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.links.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

/// Splits on commas that are outside `<...>` and outside quotes.
fn split_top_level(header_value: &str) -> Vec<&str> {
    let mut segments = Vec::new();
    let mut in_url = false;
    let mut in_quotes = false;
    let mut start = 0;

    for (i, c) in header_value.char_indices() {
        match c {
            '<' if !in_quotes => in_url = true,
            '>' if !in_quotes => in_url = false,
            '"' if !in_url => in_quotes = !in_quotes,
            ',' if !in_url && !in_quotes => {
                segments.push(&header_value[start..i]);
                start = i + 1;
            }
            _ => {}
        }
    }
    segments.push(&header_value[start..]);

    segments
}

fn parse_segment(segment: &str) -> Option<(&str, &str)> {
    let segment = segment.trim();
    let rest = segment.strip_prefix('<')?;
    let url_end = rest.find('>')?;
    let url = rest[..url_end].trim();
    let params = &rest[url_end + 1..];

    let rel = params.split(';').find_map(|param| {
        let (key, value) = param.split_once('=')?;
        if key.trim().eq_ignore_ascii_case("rel") {
            Some(value.trim().trim_matches('"').trim())
        } else {
            None
        }
    })?;

    if rel.is_empty() {
        return None;
    }

    Some((rel, url))
}

fn query_value(url: &str, name: &str) -> Option<String> {
    let (_, query) = url.split_once('?')?;
    let query = query.split('#').next().unwrap_or_default();

    query.split('&').find_map(|pair| {
        let (key, value) = pair.split_once('=')?;
        if key == name {
            urlencoding::decode(value).ok().map(|v| v.into_owned())
        } else {
            None
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parses_next_and_prev() {
        let links = PageLinks::parse(
            r#"</api/books?page=2>; rel="next", </api/books?page=1>; rel="prev""#,
        );

        assert_eq!(links.len(), 2);
        assert_eq!(links.next(), Some("/api/books?page=2"));
        assert_eq!(links.prev(), Some("/api/books?page=1"));
    }

    #[test]
    fn test_parses_all_four_relations() {
        let header = concat!(
            r#"</api/authors?page=3&per_page=20>; rel="next","#,
            r#"</api/authors?page=1&per_page=20>; rel="prev","#,
            r#"</api/authors?page=5&per_page=20>; rel="last","#,
            r#"</api/authors?page=1&per_page=20>; rel="first""#,
        );
        let links = PageLinks::parse(header);

        assert_eq!(links.len(), 4);
        assert_eq!(links.first(), Some("/api/authors?page=1&per_page=20"));
        assert_eq!(links.last(), Some("/api/authors?page=5&per_page=20"));
        assert_eq!(links.page_number(REL_NEXT), Some(3));
        assert_eq!(links.page_number(REL_LAST), Some(5));
    }

    #[test]
    fn test_empty_header_yields_empty_links() {
        assert!(PageLinks::parse("").is_empty());
        assert!(PageLinks::parse("   ").is_empty());
        assert!(PageLinks::from_header(None).is_empty());
    }

    #[test]
    fn test_malformed_segments_are_skipped() {
        assert!(PageLinks::parse("garbage, more garbage").is_empty());
        assert!(PageLinks::parse(r#"/api/books?page=2; rel="next""#).is_empty());
        assert!(PageLinks::parse("</api/books?page=2>; title=\"x\"").is_empty());
        assert!(PageLinks::parse(r#"</api/books?page=2; rel="next""#).is_empty());
        assert!(PageLinks::parse(r#"</api/books?page=2>; rel="""#).is_empty());

        let links = PageLinks::parse(r#"nonsense, </api/books?page=4>; rel="last""#);
        assert_eq!(links.len(), 1);
        assert_eq!(links.last(), Some("/api/books?page=4"));
    }

    #[test]
    fn test_unknown_relations_are_preserved() {
        let links = PageLinks::parse(r#"</docs/paging>; rel="help""#);
        assert_eq!(links.get("help"), Some("/docs/paging"));
        assert!(links.next().is_none());
    }

    #[test]
    fn test_commas_inside_urls_do_not_split() {
        let links = PageLinks::parse(r#"</api/books?sort=title,asc&page=2>; rel="next""#);
        assert_eq!(links.next(), Some("/api/books?sort=title,asc&page=2"));
    }

    #[test]
    fn test_unquoted_rel_and_extra_parameters() {
        let links = PageLinks::parse("</api/books?page=2>; title=\"Next\"; rel=next");
        assert_eq!(links.next(), Some("/api/books?page=2"));
    }

    #[test]
    fn test_page_number_is_percent_decoded_and_validated() {
        let links = PageLinks::parse(
            r#"</api/books?per_page=20&page=%37>; rel="next", </api/books?page=x>; rel="last", </api/books>; rel="first""#,
        );
        assert_eq!(links.page_number(REL_NEXT), Some(7));
        assert_eq!(links.page_number(REL_LAST), None);
        assert_eq!(links.page_number(REL_FIRST), None);
        assert_eq!(links.page_number(REL_PREV), None);
    }

    #[test]
    fn test_has_next_and_prev() {
        let links = PageLinks::parse(r#"</api/books?page=2>; rel="next""#);
        assert!(links.has_next());
        assert!(!links.has_prev());
    }
}
