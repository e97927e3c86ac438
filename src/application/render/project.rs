//! Projection of a result payload into a renderable document.
//!
//! This is the only place that decides which sections exist and in what
//! order. The Markdown sink and the PDF exporter both walk its output.

use crate::domain::result::{
    AnalysisDetail, BudgetDetail, Detail, Proposal, Report, ReportVariant, ResultPayload,
    ResumeAnalysis, SolutionDetail,
};

use super::markup::parse_inline;
use super::types::{Block, Document, RichText, Section};

pub const RESUME_TITLE: &str = "Resume Analysis Report";
pub const ANALYSIS_HEADING: &str = "Analysis";
pub const SOLUTION_HEADING: &str = "Proposed Solution";
pub const BUDGET_CONCLUSION_HEADING: &str = "Budget & Conclusion";
pub const SUMMARY_HEADING: &str = "Summary";
pub const STRENGTHS_HEADING: &str = "Strengths";
pub const WEAKNESSES_HEADING: &str = "Weaknesses";
pub const SCORE_HEADING: &str = "Hiring Likelihood Score";

/// Project a payload. Returns `None` for unrecognized shapes.
pub fn project(payload: &ResultPayload) -> Option<Document> {
    match payload.report() {
        Report::Proposal(proposal) => Some(project_proposal(proposal)),
        Report::Resume(resume) => Some(project_resume(resume)),
        Report::Unrecognized => None,
    }
}

fn project_proposal(proposal: &Proposal) -> Document {
    let mut sections = Vec::new();

    if let Some(introduction) = &proposal.introduction {
        push_section(
            &mut sections,
            None,
            vec![Block::Lead {
                text: RichText::plain(introduction),
            }],
        );
    }

    if let Some(analysis) = &proposal.analysis {
        push_section(&mut sections, Some(ANALYSIS_HEADING), analysis_blocks(analysis));
    }

    if let Some(solution) = &proposal.proposed_solution {
        push_section(&mut sections, Some(SOLUTION_HEADING), solution_blocks(solution));
    }

    let mut closing = Vec::new();
    if let Some(budget) = proposal.budget.as_ref().and_then(budget_text) {
        closing.push(field("Budget", budget));
    }
    if let Some(conclusion) = &proposal.conclusion {
        closing.push(field("Conclusion", conclusion));
    }
    push_section(&mut sections, Some(BUDGET_CONCLUSION_HEADING), closing);

    Document {
        variant: ReportVariant::Proposal,
        title: proposal.title.clone(),
        sections,
    }
}

fn analysis_blocks(analysis: &Detail<AnalysisDetail>) -> Vec<Block> {
    match analysis {
        Detail::Text(text) => vec![paragraph(text)],
        Detail::Structured(detail) => [
            ("Data Relevance", &detail.data_relevance),
            ("Data Quality", &detail.data_quality),
            ("Limitations", &detail.limitations),
        ]
        .into_iter()
        .filter_map(|(label, value)| value.as_ref().map(|value| field(label, value)))
        .collect(),
    }
}

fn solution_blocks(solution: &Detail<SolutionDetail>) -> Vec<Block> {
    match solution {
        Detail::Text(text) => vec![paragraph(text)],
        Detail::Structured(detail) => {
            let mut blocks = Vec::new();
            if let Some(methodology) = &detail.methodology {
                blocks.push(paragraph(methodology));
            }
            if let Some(steps) = detail.steps.as_deref() {
                push_list(&mut blocks, steps);
            }
            if let Some(technology) = &detail.technology {
                blocks.push(field("Technology", technology));
            }
            blocks
        }
    }
}

fn budget_text(budget: &Detail<BudgetDetail>) -> Option<&str> {
    match budget {
        Detail::Text(text) => Some(text.as_str()),
        Detail::Structured(detail) => detail.cost.as_deref(),
    }
}

fn project_resume(resume: &ResumeAnalysis) -> Document {
    let mut sections = Vec::new();

    if let Some(summary) = &resume.summary {
        push_section(&mut sections, Some(SUMMARY_HEADING), vec![paragraph(summary)]);
    }

    for (heading, items) in [
        (STRENGTHS_HEADING, &resume.strengths),
        (WEAKNESSES_HEADING, &resume.weaknesses),
    ] {
        if let Some(items) = items {
            let mut blocks = Vec::new();
            push_list(&mut blocks, items);
            push_section(&mut sections, Some(heading), blocks);
        }
    }

    if let Some(score) = &resume.hiring_likelihood_score {
        push_section(
            &mut sections,
            Some(SCORE_HEADING),
            vec![Block::Score {
                text: format!("{score} / 100"),
            }],
        );
    }

    Document {
        variant: ReportVariant::Resume,
        title: Some(RESUME_TITLE.to_string()),
        sections,
    }
}

/// Sections without content are dropped rather than rendered empty.
fn push_section(sections: &mut Vec<Section>, heading: Option<&str>, blocks: Vec<Block>) {
    if blocks.is_empty() {
        return;
    }
    sections.push(Section {
        heading: heading.map(str::to_string),
        blocks,
    });
}

fn push_list(blocks: &mut Vec<Block>, items: &[String]) {
    let items: Vec<RichText> = items
        .iter()
        .map(|item| parse_inline(item))
        .filter(|item| !item.is_empty())
        .collect();
    if !items.is_empty() {
        blocks.push(Block::BulletList { items });
    }
}

fn paragraph(text: &str) -> Block {
    Block::Paragraph {
        text: RichText::plain(text),
    }
}

fn field(label: &str, value: &str) -> Block {
    Block::Field {
        label: label.to_string(),
        value: RichText::plain(value),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::render::types::Span;
    use serde_json::json;

    fn project_value(value: serde_json::Value) -> Option<Document> {
        project(&ResultPayload::from_value(value))
    }

    #[test]
    fn proposal_without_analysis_omits_the_section() {
        let document = project_value(json!({
            "proposal": {
                "title": "Data Platform",
                "introduction": "Intro",
                "proposed_solution": "Build it",
                "conclusion": "Done"
            }
        }))
        .expect("proposal projects");

        assert_eq!(document.title.as_deref(), Some("Data Platform"));
        assert_eq!(
            document.headings(),
            vec![SOLUTION_HEADING, BUDGET_CONCLUSION_HEADING]
        );
        assert!(document.section(ANALYSIS_HEADING).is_none());
    }

    #[test]
    fn string_solution_is_a_single_paragraph() {
        let document = project_value(json!({
            "proposal": {"proposed_solution": "Step one.\nStep two."}
        }))
        .expect("proposal projects");

        let section = document.section(SOLUTION_HEADING).expect("solution section");
        assert_eq!(
            section.blocks,
            vec![Block::Paragraph {
                text: RichText::plain("Step one.\nStep two.")
            }]
        );
    }

    #[test]
    fn structured_solution_lists_steps_in_order() {
        let document = project_value(json!({
            "proposal": {
                "proposed_solution": {
                    "methodology": "Agile",
                    "steps": ["**Discover** needs", "Build", "**Ship**"],
                    "technology": "Rust"
                }
            }
        }))
        .expect("proposal projects");

        let section = document.section(SOLUTION_HEADING).expect("solution section");
        assert_eq!(section.blocks.len(), 3);
        let Block::BulletList { items } = &section.blocks[1] else {
            panic!("expected bullet list, got {:?}", section.blocks[1]);
        };
        let texts: Vec<String> = items.iter().map(RichText::plain_text).collect();
        assert_eq!(texts, vec!["Discover needs", "Build", "Ship"]);
        assert_eq!(items[0].spans[0], Span::strong("Discover"));
        assert_eq!(
            section.blocks[2],
            Block::Field {
                label: "Technology".into(),
                value: RichText::plain("Rust")
            }
        );
    }

    #[test]
    fn structured_analysis_skips_missing_fields() {
        let document = project_value(json!({
            "proposal": {"analysis": {"data_quality": "Good"}}
        }))
        .expect("proposal projects");

        let section = document.section(ANALYSIS_HEADING).expect("analysis section");
        assert_eq!(
            section.blocks,
            vec![Block::Field {
                label: "Data Quality".into(),
                value: RichText::plain("Good")
            }]
        );
    }

    #[test]
    fn budget_reads_string_or_nested_cost() {
        for (budget, expected) in [(json!("$5,000"), "$5,000"), (json!({"cost": "$7,500"}), "$7,500")]
        {
            let document = project_value(json!({"proposal": {"budget": budget}}))
                .expect("proposal projects");
            let section = document
                .section(BUDGET_CONCLUSION_HEADING)
                .expect("budget section");
            assert_eq!(
                section.blocks,
                vec![Block::Field {
                    label: "Budget".into(),
                    value: RichText::plain(expected)
                }]
            );
        }
    }

    #[test]
    fn resume_projects_score_out_of_hundred() {
        let document = project_value(json!({
            "analysis": {
                "summary": "S",
                "strengths": ["a"],
                "weaknesses": ["b"],
                "hiring_likelihood_score": 72
            }
        }))
        .expect("resume projects");

        assert_eq!(document.variant, ReportVariant::Resume);
        assert_eq!(document.title.as_deref(), Some(RESUME_TITLE));
        assert_eq!(
            document.headings(),
            vec![
                SUMMARY_HEADING,
                STRENGTHS_HEADING,
                WEAKNESSES_HEADING,
                SCORE_HEADING
            ]
        );
        assert_eq!(
            document.section(SCORE_HEADING).expect("score").blocks,
            vec![Block::Score {
                text: "72 / 100".into()
            }]
        );
    }

    #[test]
    fn resume_with_missing_fields_omits_sections() {
        let document = project_value(json!({"analysis": {"strengths": ["only"]}}))
            .expect("resume projects");
        assert_eq!(document.headings(), vec![STRENGTHS_HEADING]);
    }

    #[test]
    fn unrecognized_payload_projects_nothing() {
        assert!(project_value(json!({"unexpected": true})).is_none());
    }

    #[test]
    fn projection_is_repeatable() {
        let payload = ResultPayload::from_value(json!({
            "proposal": {
                "title": "T",
                "proposed_solution": {"steps": ["**a**", "b"]},
                "budget": {"cost": 10}
            }
        }));
        assert_eq!(project(&payload), project(&payload));
    }
}
