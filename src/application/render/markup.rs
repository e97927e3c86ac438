use super::types::{RichText, Span};

const STRONG_MARKER: &str = "**";

/// Convert `**...**` pairs into strong spans. A trailing unmatched marker is
/// dropped; no literal `**` survives.
pub fn parse_inline(source: &str) -> RichText {
    let segments: Vec<&str> = source.split(STRONG_MARKER).collect();
    let last = segments.len() - 1;

    let mut text = RichText::default();
    for (index, segment) in segments.into_iter().enumerate() {
        let strong = index % 2 == 1 && index < last;
        text.push(Span {
            text: segment.to_string(),
            strong,
        });
    }
    text
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn balanced_markers_become_strong_spans() {
        let text = parse_inline("Run **pilot** then **scale** out");
        assert_eq!(
            text.spans,
            vec![
                Span::plain("Run "),
                Span::strong("pilot"),
                Span::plain(" then "),
                Span::strong("scale"),
                Span::plain(" out"),
            ]
        );
    }

    #[test]
    fn unmatched_marker_is_dropped() {
        let text = parse_inline("Phase 1: **Discovery");
        assert_eq!(text.spans, vec![Span::plain("Phase 1: Discovery")]);
        assert!(!text.plain_text().contains("**"));
    }

    #[test]
    fn text_without_markers_is_untouched() {
        let text = parse_inline("plain step");
        assert_eq!(text, RichText::plain("plain step"));
    }

    #[test]
    fn whole_item_strong() {
        let text = parse_inline("**Deploy**");
        assert_eq!(text.spans, vec![Span::strong("Deploy")]);
    }
}
