//! Raw markup scanning
//!
//! An HTML5 tree builder inserts a `tbody` into every `table` written without
//! one, so counting `tbody` elements in a parsed tree does not match the page
//! source. These helpers work on the source text and only see tags that are
//! actually written. Comments and `script`/`style` bodies are skipped.

/// Every `<tbody>...</tbody>` element written in the source, in the order
/// their opening tags appear
///
/// Each slice runs from the `<` of the opening tag to the `>` of the matching
/// closing tag. Nested bodies are matched by depth. A body that is never
/// closed runs to the end of the document.
pub fn source_tbodies(document: &str) -> Vec<&str> {
    let lower = document.to_ascii_lowercase();
    let bytes = lower.as_bytes();

    let mut open: Vec<usize> = Vec::new();
    let mut found: Vec<(usize, usize)> = Vec::new();
    let mut pos = 0;

    while let Some(offset) = lower[pos..].find('<') {
        let at = pos + offset;
        let rest = &lower[at..];

        if rest.starts_with("<!--") {
            pos = skip_past(&lower, at + 4, "-->");
        } else if let Some(tag) = ["script", "style"]
            .into_iter()
            .find(|tag| is_start_tag(bytes, at, tag))
        {
            pos = skip_past(&lower, at + 1, &format!("</{}", tag));
        } else if is_start_tag(bytes, at, "tbody") {
            open.push(at);
            pos = at + "<tbody".len();
        } else if is_end_tag(bytes, at, "tbody") {
            let end = skip_past(&lower, at, ">");
            if let Some(start) = open.pop() {
                found.push((start, end));
            }
            pos = end;
        } else {
            pos = at + 1;
        }
    }

    found.extend(open.into_iter().map(|start| (start, document.len())));
    found.sort_unstable();
    found
        .into_iter()
        .map(|(start, end)| &document[start..end])
        .collect()
}

/// Index just past the next `needle` at or after `from`, or the end of `text`
fn skip_past(text: &str, from: usize, needle: &str) -> usize {
    text.get(from..)
        .and_then(|rest| rest.find(needle))
        .map(|index| from + index + needle.len())
        .unwrap_or(text.len())
}

/// `<name` followed by whitespace, `>` or `/`
fn is_start_tag(bytes: &[u8], at: usize, name: &str) -> bool {
    tag_at(bytes, at + 1, name)
}

/// `</name` followed by whitespace, `>` or `/`
fn is_end_tag(bytes: &[u8], at: usize, name: &str) -> bool {
    bytes.get(at + 1) == Some(&b'/') && tag_at(bytes, at + 2, name)
}

fn tag_at(bytes: &[u8], at: usize, name: &str) -> bool {
    let end = at + name.len();
    bytes.get(at..end) == Some(name.as_bytes())
        && matches!(
            bytes.get(end),
            None | Some(b'>' | b'/' | b' ' | b'\t' | b'\n' | b'\r' | b'\x0c')
        )
}
