//! Paging navigation links for listing responses

/// Build an RFC 5988 `Link` header value with `first`/`prev`/`next`/`last`
/// page links for the given window.
///
/// `prev` is omitted on the first page, `next` once the window reaches the
/// end, and the whole header is empty when the result set fits in one page.
pub fn paging_link_header(base_url: &str, total: u64, limit: i64, offset: i64) -> String {
    if limit <= 0 || total <= limit as u64 {
        return String::new();
    }

    let mut links = Vec::new();
    let mut push = |rel: &str, offset: i64| {
        links.push(format!(
            "<{base_url}?limit={limit}&offset={offset}>; rel=\"{rel}\""
        ));
    };

    push("first", 0);
    if offset > 0 {
        push("prev", (offset - limit).max(0));
    }
    if offset + limit < total as i64 {
        push("next", offset + limit);
    }
    let last = ((total as i64 - 1) / limit) * limit;
    push("last", last);

    links.join(", ")
}
