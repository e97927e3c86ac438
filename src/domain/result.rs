//! Analysis results and their typed view.
//!
//! The service returns one of two unrelated report shapes without a tag. The
//! shape is probed exactly once, when a [`ResultPayload`] is built from raw
//! JSON; everything downstream matches on [`Report`].

use serde::{Serialize, Serializer};
use serde_json::{Map, Value};

use super::relaxed::{field, scalar_text, text_field, text_list};

pub const PROPOSAL_EXPORT_FILE: &str = "Tender_Analysis_Proposal.pdf";
pub const RESUME_EXPORT_FILE: &str = "Resume_Analysis.pdf";

/// The two report families the service produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportVariant {
    Proposal,
    Resume,
}

impl ReportVariant {
    pub fn export_file_name(self) -> &'static str {
        match self {
            ReportVariant::Proposal => PROPOSAL_EXPORT_FILE,
            ReportVariant::Resume => RESUME_EXPORT_FILE,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ReportVariant::Proposal => "proposal",
            ReportVariant::Resume => "resume",
        }
    }
}

/// A field that is either free text or a structured breakdown.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Detail<T> {
    Text(String),
    Structured(T),
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AnalysisDetail {
    pub data_relevance: Option<String>,
    pub data_quality: Option<String>,
    pub limitations: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SolutionDetail {
    pub methodology: Option<String>,
    /// `None` when the service sent no list at all.
    pub steps: Option<Vec<String>>,
    pub technology: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BudgetDetail {
    pub cost: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Proposal {
    pub title: Option<String>,
    pub introduction: Option<String>,
    pub analysis: Option<Detail<AnalysisDetail>>,
    pub proposed_solution: Option<Detail<SolutionDetail>>,
    pub budget: Option<Detail<BudgetDetail>>,
    pub conclusion: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResumeAnalysis {
    pub summary: Option<String>,
    pub strengths: Option<Vec<String>>,
    pub weaknesses: Option<Vec<String>>,
    /// Score already formatted for display (`72`, `72.5`).
    pub hiring_likelihood_score: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Report {
    Proposal(Proposal),
    Resume(ResumeAnalysis),
    /// Neither known key is present. Not an error; nothing renders.
    Unrecognized,
}

/// Result of a succeeded job: the raw JSON plus its decoded report.
#[derive(Debug, Clone, PartialEq)]
pub struct ResultPayload {
    raw: Value,
    report: Report,
}

impl ResultPayload {
    /// Decode a raw result. Never fails: unknown shapes become
    /// [`Report::Unrecognized`].
    pub fn from_value(raw: Value) -> Self {
        let report = probe(&raw);
        Self { raw, report }
    }

    pub fn raw(&self) -> &Value {
        &self.raw
    }

    pub fn report(&self) -> &Report {
        &self.report
    }

    pub fn variant(&self) -> Option<ReportVariant> {
        match self.report {
            Report::Proposal(_) => Some(ReportVariant::Proposal),
            Report::Resume(_) => Some(ReportVariant::Resume),
            Report::Unrecognized => None,
        }
    }
}

impl Serialize for ResultPayload {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.raw.serialize(serializer)
    }
}

fn probe(raw: &Value) -> Report {
    let Some(root) = raw.as_object() else {
        return Report::Unrecognized;
    };

    if let Some(proposal) = field(root, "proposal") {
        return Report::Proposal(decode_proposal(proposal));
    }
    if let Some(analysis) = field(root, "analysis") {
        return Report::Resume(decode_resume(analysis));
    }
    Report::Unrecognized
}

fn decode_proposal(value: &Value) -> Proposal {
    let Some(object) = value.as_object() else {
        return Proposal::default();
    };

    Proposal {
        title: text_field(object, "title"),
        introduction: text_field(object, "introduction"),
        analysis: field(object, "analysis").and_then(|v| decode_detail(v, decode_analysis)),
        proposed_solution: field(object, "proposed_solution")
            .and_then(|v| decode_detail(v, decode_solution)),
        budget: field(object, "budget").and_then(|v| decode_detail(v, decode_budget)),
        conclusion: text_field(object, "conclusion"),
    }
}

fn decode_detail<T>(value: &Value, structured: fn(&Map<String, Value>) -> T) -> Option<Detail<T>> {
    match value {
        Value::Object(object) => Some(Detail::Structured(structured(object))),
        other => scalar_text(other).map(Detail::Text),
    }
}

fn decode_analysis(object: &Map<String, Value>) -> AnalysisDetail {
    AnalysisDetail {
        data_relevance: text_field(object, "data_relevance"),
        data_quality: text_field(object, "data_quality"),
        limitations: text_field(object, "limitations"),
    }
}

fn decode_solution(object: &Map<String, Value>) -> SolutionDetail {
    SolutionDetail {
        methodology: text_field(object, "methodology"),
        steps: object
            .get("steps")
            .filter(|steps| steps.is_array())
            .map(text_list),
        technology: text_field(object, "technology"),
    }
}

fn decode_budget(object: &Map<String, Value>) -> BudgetDetail {
    BudgetDetail {
        cost: text_field(object, "cost"),
    }
}

fn decode_resume(value: &Value) -> ResumeAnalysis {
    let Some(object) = value.as_object() else {
        return ResumeAnalysis::default();
    };

    ResumeAnalysis {
        summary: text_field(object, "summary"),
        strengths: field(object, "strengths").map(text_list),
        weaknesses: field(object, "weaknesses").map(text_list),
        hiring_likelihood_score: object.get("hiring_likelihood_score").and_then(scalar_text),
    }
}
