use serde::Serialize;

use crate::domain::result::ReportVariant;

/// A run of text sharing one emphasis.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Span {
    pub text: String,
    pub strong: bool,
}

impl Span {
    pub fn plain(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            strong: false,
        }
    }

    pub fn strong(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            strong: true,
        }
    }
}

/// Inline text made of emphasis runs.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct RichText {
    pub spans: Vec<Span>,
}

impl RichText {
    pub fn plain(text: impl Into<String>) -> Self {
        Self {
            spans: vec![Span::plain(text)],
        }
    }

    /// Append a span, merging it into the previous one when emphasis matches.
    pub fn push(&mut self, span: Span) {
        if span.text.is_empty() {
            return;
        }
        match self.spans.last_mut() {
            Some(last) if last.strong == span.strong => last.text.push_str(&span.text),
            _ => self.spans.push(span),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.spans.iter().all(|span| span.text.is_empty())
    }

    /// Text with emphasis dropped.
    pub fn plain_text(&self) -> String {
        self.spans.iter().map(|span| span.text.as_str()).collect()
    }
}

/// Content unit inside a section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Block {
    /// Introductory paragraph shown with emphasis.
    Lead { text: RichText },
    Paragraph { text: RichText },
    /// `Label: value` line.
    Field { label: String, value: RichText },
    BulletList { items: Vec<RichText> },
    /// Headline figure such as `72 / 100`.
    Score { text: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Section {
    pub heading: Option<String>,
    pub blocks: Vec<Block>,
}

/// Renderable projection of a result payload, shared by every sink.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Document {
    #[serde(skip)]
    pub variant: ReportVariant,
    pub title: Option<String>,
    pub sections: Vec<Section>,
}

impl Document {
    pub fn section(&self, heading: &str) -> Option<&Section> {
        self.sections
            .iter()
            .find(|section| section.heading.as_deref() == Some(heading))
    }

    pub fn headings(&self) -> Vec<&str> {
        self.sections
            .iter()
            .filter_map(|section| section.heading.as_deref())
            .collect()
    }
}
