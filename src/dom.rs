/// Insert `fragment` immediately before the document's last closing body
/// tag, matched ASCII-case-insensitively. A document without a closing
/// body tag gets the fragment appended at the end.
pub fn append_to_body(document: &str, fragment: &str) -> String {
    let mut out = String::with_capacity(document.len() + fragment.len());
    match closing_body_tag(document) {
        Some(at) => {
            out.push_str(&document[..at]);
            out.push_str(fragment);
            out.push_str(&document[at..]);
        }
        None => {
            out.push_str(document);
            out.push_str(fragment);
        }
    }
    out
}

fn closing_body_tag(document: &str) -> Option<usize> {
    // ASCII lowercasing keeps byte offsets aligned with the original.
    document.to_ascii_lowercase().rfind("</body>")
}
