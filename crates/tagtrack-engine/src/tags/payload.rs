use serde::{Deserialize, Serialize};

/// How a tag literal should be reshaped before it is handed on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum TagChangeIntent {
    #[default]
    DoNothing,
    /// `<pb/>` becomes `<pb>`.
    OpenTag,
    /// `<pb>` becomes `<pb/>`.
    CloseTag,
}

/// Single-field record carrying a (possibly reshaped) tag literal.
///
/// Serializes as `{"text": "..."}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TagPayload {
    pub text: String,
}

impl TagPayload {
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }

    pub fn to_value(&self) -> serde_json::Result<serde_json::Value> {
        serde_json::to_value(self)
    }
}

/// Applies `intent` to a raw tag literal and wraps the result in a payload.
pub fn build_tag_payload(raw_tag_text: &str, intent: TagChangeIntent) -> TagPayload {
    let text = match intent {
        TagChangeIntent::DoNothing => raw_tag_text.to_string(),
        TagChangeIntent::OpenTag => match raw_tag_text.strip_suffix("/>") {
            Some(head) => format!("{head}>"),
            None => raw_tag_text.to_string(),
        },
        TagChangeIntent::CloseTag => {
            // Anything with a slash is already closed or is an end tag.
            match raw_tag_text.strip_suffix('>') {
                Some(head) if !raw_tag_text.contains('/') => format!("{head}/>"),
                _ => raw_tag_text.to_string(),
            }
        }
    };
    TagPayload { text }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    #[rstest]
    #[case(TagChangeIntent::OpenTag, r#"<x a="1" />"#, r#"<x a="1" >"#)]
    #[case(TagChangeIntent::OpenTag, "<pb/>", "<pb>")]
    #[case(TagChangeIntent::OpenTag, "<pb>", "<pb>")]
    #[case(TagChangeIntent::CloseTag, "<pb>", "<pb/>")]
    #[case(TagChangeIntent::CloseTag, r#"<lb n="4">"#, r#"<lb n="4"/>"#)]
    #[case(TagChangeIntent::CloseTag, "</note>", "</note>")]
    #[case(TagChangeIntent::CloseTag, "<pb/>", "<pb/>")]
    #[case(TagChangeIntent::CloseTag, r#"<ref target="a/b">"#, r#"<ref target="a/b">"#)]
    #[case(TagChangeIntent::DoNothing, r#"<note n="1">"#, r#"<note n="1">"#)]
    fn test_reshapes_by_intent(
        #[case] intent: TagChangeIntent,
        #[case] raw: &str,
        #[case] expected: &str,
    ) {
        assert_eq!(build_tag_payload(raw, intent).text, expected);
    }

    #[test]
    fn test_serializes_with_escaped_quotes() {
        let payload = build_tag_payload(r#"<x a="1" />"#, TagChangeIntent::OpenTag);
        assert_eq!(payload.to_json().unwrap(), r#"{"text":"<x a=\"1\" >"}"#);
    }

    #[test]
    fn test_value_has_single_text_field() {
        let value = build_tag_payload("<pb>", TagChangeIntent::CloseTag)
            .to_value()
            .unwrap();
        assert_eq!(value, serde_json::json!({ "text": "<pb/>" }));
    }

    #[test]
    fn test_multi_line_literal_survives_round_trip() {
        let payload = build_tag_payload("<note\n  n=\"1\">", TagChangeIntent::DoNothing);
        let json = payload.to_json().unwrap();
        let back: TagPayload = serde_json::from_str(&json).unwrap();
        assert_eq!(back, payload);
    }
}
