//! Minimal tag scanning for depth-chart markup.
//!
//! Positions are found in an ASCII-lowercased copy of the document; ASCII
//! lowercasing keeps byte offsets identical, so every range found in the copy
//! slices the original.

/// Byte range of one element inside the scanned text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ElementRange {
    pub start: usize,
    /// First byte after the opening tag's `>`.
    pub inner_start: usize,
    /// First byte of the closing tag (or the end of the scanned text).
    pub inner_end: usize,
    /// First byte after the closing tag.
    pub end: usize,
}

/// Next `<tag ...>...</tag>` at or after `from`.
///
/// `lower` must be `text.to_ascii_lowercase()`. `<th` does not match `<thead`.
/// A missing closing tag extends the element to the end of `text`.
pub fn next_element(text: &str, lower: &str, tag: &str, from: usize) -> Option<ElementRange> {
    let open = format!("<{tag}");
    let close = format!("</{tag}");
    let mut search = from;
    loop {
        let start = lower.get(search..)?.find(&open)? + search;
        let after_name = start + open.len();
        let boundary = lower.as_bytes().get(after_name).copied();
        if !matches!(boundary, Some(b'>' | b'/') | Some(b' ' | b'\t' | b'\n' | b'\r')) {
            search = after_name;
            continue;
        }
        let inner_start = text.get(start..)?.find('>')? + start + 1;
        let (inner_end, end) = match lower.get(inner_start..).and_then(|rest| rest.find(&close)) {
            Some(rel) => {
                let inner_end = inner_start + rel;
                let end = lower
                    .get(inner_end..)
                    .and_then(|rest| rest.find('>'))
                    .map_or(text.len(), |gt| inner_end + gt + 1);
                (inner_end, end)
            }
            None => (text.len(), text.len()),
        };
        return Some(ElementRange {
            start,
            inner_start,
            inner_end,
            end,
        });
    }
}

/// All `tag` elements inside `text[range]`, as ranges into `text`.
pub fn elements_within(
    text: &str,
    lower: &str,
    tag: &str,
    start: usize,
    end: usize,
) -> Vec<ElementRange> {
    let scope = &text[start..end];
    let scope_lower = &lower[start..end];
    let mut out = Vec::new();
    let mut pos = 0;
    while let Some(found) = next_element(scope, scope_lower, tag, pos) {
        pos = found.end.max(found.inner_start);
        out.push(ElementRange {
            start: found.start + start,
            inner_start: found.inner_start + start,
            inner_end: found.inner_end + start,
            end: found.end + start,
        });
    }
    out
}

pub fn strip_tags(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut in_tag = false;
    for ch in s.chars() {
        match ch {
            '<' => in_tag = true,
            '>' => in_tag = false,
            _ if !in_tag => out.push(ch),
            _ => {}
        }
    }
    out
}

pub fn normalize_entities(s: &str) -> String {
    s.replace("&nbsp;", " ")
        .replace("&#x27;", "'")
        .replace("&#39;", "'")
        .replace("&apos;", "'")
        .replace("&quot;", "\"")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&amp;", "&")
}

pub fn normalize_ws(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut prev_space = false;
    for ch in s.chars() {
        if ch.is_whitespace() {
            if !prev_space {
                out.push(' ');
                prev_space = true;
            }
        } else {
            out.push(ch);
            prev_space = false;
        }
    }
    out.trim().to_string()
}

/// Visible text of a markup fragment.
pub fn text_content(fragment: &str) -> String {
    normalize_ws(&normalize_entities(&strip_tags(fragment)))
}
