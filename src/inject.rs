//! Stylesheet link injection into rendered pages.
//!
//! Works on raw HTML text: the host hands over the rendered page, and gets it
//! back with one `<link rel="stylesheet">` spliced in just before `</head>`.
//! Pages without a head section are returned unchanged.

use std::borrow::Cow;

/// Compute a page-relative URL for a site-relative asset path.
///
/// `page_url` is the page's site-relative URL (no leading slash, directory
/// pages end with `/`): `""`, `"about/"`, `"blog/post/"`, `"sub/page.html"`.
/// Each directory level of the page ascends one `../` segment.
pub fn relative_href(relative_path: &str, page_url: &str) -> String {
    let depth = page_depth(page_url);
    let mut href = String::with_capacity(depth * 3 + relative_path.len());
    for _ in 0..depth {
        href.push_str("../");
    }
    href.push_str(relative_path);
    href
}

/// Directory depth of a page URL, ignoring query and fragment.
fn page_depth(page_url: &str) -> usize {
    let path = page_url
        .split(['?', '#'])
        .next()
        .unwrap_or(page_url)
        .trim_start_matches('/');
    path.matches('/').count()
}

/// Append a stylesheet link to the document head.
///
/// Splices `<link rel="stylesheet" href="...">` immediately before the
/// closing head tag (case-insensitive). Injection is per-call: invoking this
/// twice yields two links. HTML without `</head>` is returned as-is.
pub fn inject_stylesheet(html: &str, href: &str) -> String {
    let Some(position) = head_close_position(html) else {
        return html.to_string();
    };

    let link = format!("<link rel=\"stylesheet\" href=\"{}\">", escape_attr(href));
    let mut output = String::with_capacity(html.len() + link.len());
    output.push_str(&html[..position]);
    output.push_str(&link);
    output.push_str(&html[position..]);
    output
}

/// Byte offset of the first `</head>` close tag, case-insensitive.
fn head_close_position(html: &str) -> Option<usize> {
    const CLOSE: &[u8] = b"</head>";
    html.as_bytes()
        .windows(CLOSE.len())
        .position(|window| window.eq_ignore_ascii_case(CLOSE))
}

/// Escape characters that are special inside a double-quoted attribute.
fn escape_attr(value: &str) -> Cow<'_, str> {
    if !value.contains(['&', '"', '<', '>']) {
        return Cow::Borrowed(value);
    }
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '"' => escaped.push_str("&quot;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            _ => escaped.push(c),
        }
    }
    Cow::Owned(escaped)
}
