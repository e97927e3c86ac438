use docintel_api_types::{CatalogEntry, ConfigResponse};

use crate::domain::error::DomainError;
use crate::domain::job::SelectionConfig;

const DOCUMENT_TYPE: &str = "document type";
const MODEL: &str = "model";

/// Both ids given on the command line; no catalog lookup is needed.
pub fn explicit_selection(
    document_type: Option<&str>,
    model: Option<&str>,
) -> Option<SelectionConfig> {
    match (document_type, model) {
        (Some(document_type), Some(model)) => Some(SelectionConfig::new(document_type, model)),
        _ => None,
    }
}

/// Resolve the submission selection against the catalog. Missing choices
/// default to the first catalog entry; explicit ids must exist.
pub fn resolve_selection(
    catalog: &ConfigResponse,
    document_type: Option<&str>,
    model: Option<&str>,
) -> Result<SelectionConfig, DomainError> {
    let document_type = pick(&catalog.document_types, document_type, DOCUMENT_TYPE)?;
    let model = pick(&catalog.ai_models, model, MODEL)?;
    Ok(SelectionConfig::new(document_type, model))
}

fn pick<'a>(
    entries: &'a [CatalogEntry],
    requested: Option<&str>,
    entity: &'static str,
) -> Result<&'a str, DomainError> {
    match requested {
        Some(id) => entries
            .iter()
            .find(|entry| entry.id == id)
            .map(|entry| entry.id.as_str())
            .ok_or_else(|| DomainError::not_found(entity, id)),
        None => entries
            .first()
            .map(|entry| entry.id.as_str())
            .ok_or_else(|| DomainError::validation(format!("the service offers no {entity}"))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog() -> ConfigResponse {
        ConfigResponse {
            document_types: vec![
                CatalogEntry {
                    id: "tender".into(),
                    name: "Tender".into(),
                },
                CatalogEntry {
                    id: "resume".into(),
                    name: "Resume".into(),
                },
            ],
            ai_models: vec![CatalogEntry {
                id: "gemini-pro".into(),
                name: "Gemini Pro".into(),
            }],
        }
    }

    #[test]
    fn defaults_to_first_entries() {
        let selection = resolve_selection(&catalog(), None, None).expect("defaults");
        assert_eq!(selection, SelectionConfig::new("tender", "gemini-pro"));
    }

    #[test]
    fn explicit_ids_must_exist() {
        let selection =
            resolve_selection(&catalog(), Some("resume"), None).expect("known document type");
        assert_eq!(selection.document_type_id, "resume");

        let err = resolve_selection(&catalog(), None, Some("gpt-x")).expect_err("unknown model");
        assert!(matches!(
            err,
            DomainError::NotFound { entity: "model", ref id } if id == "gpt-x"
        ));
    }

    #[test]
    fn empty_catalog_is_a_validation_error() {
        let err = resolve_selection(&ConfigResponse::default(), None, None)
            .expect_err("nothing to choose");
        assert!(matches!(err, DomainError::Validation { .. }));
    }

    #[test]
    fn explicit_selection_needs_both_ids() {
        assert_eq!(explicit_selection(Some("a"), None), None);
        assert_eq!(
            explicit_selection(Some("a"), Some("b")),
            Some(SelectionConfig::new("a", "b"))
        );
    }
}
