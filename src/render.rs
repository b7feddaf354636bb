/// Renders paragraphs as block-level HTML: each paragraph in its own `<p>`,
/// concatenated in order with no separator. Empty input yields an empty
/// string. One-way in the running system; edited HTML never parses back.
pub fn paragraphs_to_html(paragraphs: &[String]) -> String {
    paragraphs
        .iter()
        .map(|para| format!("<p>{}</p>", para))
        .collect()
}
