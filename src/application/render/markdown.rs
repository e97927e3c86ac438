use super::types::{Block, Document, RichText};

/// Render a projected document as Markdown. Output always ends with a newline.
pub fn to_markdown(document: &Document) -> String {
    let mut chunks: Vec<String> = Vec::new();

    if let Some(title) = &document.title {
        chunks.push(format!("# {title}"));
    }

    for section in &document.sections {
        if let Some(heading) = &section.heading {
            chunks.push(format!("## {heading}"));
        }
        for block in &section.blocks {
            chunks.push(render_block(block));
        }
    }

    let mut out = chunks.join("\n\n");
    out.push('\n');
    out
}

fn render_block(block: &Block) -> String {
    match block {
        Block::Lead { text } => format!("_{}_", inline(text)),
        Block::Paragraph { text } => inline(text),
        Block::Field { label, value } => format!("**{label}:** {}", inline(value)),
        Block::BulletList { items } => items
            .iter()
            .map(|item| format!("- {}", inline(item)))
            .collect::<Vec<_>>()
            .join("\n"),
        Block::Score { text } => format!("**{text}**"),
    }
}

fn inline(text: &RichText) -> String {
    text.spans
        .iter()
        .map(|span| {
            if span.strong {
                format!("**{}**", span.text)
            } else {
                span.text.clone()
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::render::project;
    use crate::domain::result::ResultPayload;
    use serde_json::json;

    #[test]
    fn resume_markdown() {
        let payload = ResultPayload::from_value(json!({
            "analysis": {
                "summary": "S",
                "strengths": ["a"],
                "weaknesses": ["b"],
                "hiring_likelihood_score": 72
            }
        }));
        let document = project(&payload).expect("resume projects");

        insta::assert_snapshot!(to_markdown(&document), @r"
        # Resume Analysis Report

        ## Summary

        S

        ## Strengths

        - a

        ## Weaknesses

        - b

        ## Hiring Likelihood Score

        **72 / 100**
        ");
    }

    #[test]
    fn proposal_markdown_converts_step_markers() {
        let payload = ResultPayload::from_value(json!({
            "proposal": {
                "title": "Grid Upgrade",
                "introduction": "We propose a phased upgrade.",
                "analysis": {"data_relevance": "High", "limitations": "Sparse history"},
                "proposed_solution": {
                    "methodology": "Iterative delivery.",
                    "steps": ["**Survey** substations", "Replace meters"],
                    "technology": "LoRaWAN"
                },
                "budget": {"cost": "$1.2M"},
                "conclusion": "Ready to start."
            }
        }));
        let document = project(&payload).expect("proposal projects");

        insta::assert_snapshot!(to_markdown(&document), @r"
        # Grid Upgrade

        _We propose a phased upgrade._

        ## Analysis

        **Data Relevance:** High

        **Limitations:** Sparse history

        ## Proposed Solution

        Iterative delivery.

        - **Survey** substations
        - Replace meters

        **Technology:** LoRaWAN

        ## Budget & Conclusion

        **Budget:** $1.2M

        **Conclusion:** Ready to start.
        ");
    }

    #[test]
    fn rendering_twice_is_identical() {
        let payload = ResultPayload::from_value(json!({
            "proposal": {"title": "T", "proposed_solution": {"steps": ["**x**"]}}
        }));
        let first = project(&payload).map(|doc| to_markdown(&doc));
        let second = project(&payload).map(|doc| to_markdown(&doc));
        assert_eq!(first, second);
    }
}
