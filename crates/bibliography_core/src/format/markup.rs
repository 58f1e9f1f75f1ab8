//! Markup escaping for user-entered field values.

/// Escapes text so it can be embedded in citation markup.
///
/// Replaces `&`, `<`, `>`, `'` and `"` with their entity forms.
pub fn escape_markup(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for ch in value.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '\'' => escaped.push_str("&#39;"),
            '"' => escaped.push_str("&quot;"),
            other => escaped.push(other),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::escape_markup;

    #[test]
    fn escapes_ampersand_and_angle_brackets() {
        assert_eq!(escape_markup("Fish & <Chips>"), "Fish &amp; &lt;Chips&gt;");
    }

    #[test]
    fn escapes_quotes() {
        assert_eq!(escape_markup(r#"It's "fine""#), "It&#39;s &quot;fine&quot;");
    }

    #[test]
    fn plain_text_is_unchanged() {
        assert_eq!(escape_markup("Reuse your refuse"), "Reuse your refuse");
    }
}
