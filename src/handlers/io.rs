use std::path::{Path, PathBuf};

use docintel::{application::error::AppError, domain::result::ResultPayload, infra::error::InfraError};
use serde_json::Value;
use tokio::fs;

/// Inline text or the contents of a file; the file wins.
pub async fn read_opt_value(
    value: Option<String>,
    file: Option<PathBuf>,
) -> Result<Option<String>, AppError> {
    if let Some(path) = file {
        let data = fs::read_to_string(&path)
            .await
            .map_err(|err| input_error(&path, err))?;
        return Ok(Some(data));
    }
    Ok(value)
}

/// Load a saved result. Accepts the bare `result` object or a whole status
/// response as printed by `docintel status`.
pub async fn read_result(path: &Path) -> Result<ResultPayload, AppError> {
    let data = fs::read(path).await.map_err(|err| input_error(path, err))?;
    let value: Value = serde_json::from_slice(&data).map_err(|err| {
        AppError::validation(format!("`{}` is not valid JSON: {err}", path.display()))
    })?;
    Ok(ResultPayload::from_value(unwrap_status_envelope(value)))
}

fn unwrap_status_envelope(value: Value) -> Value {
    match value {
        Value::Object(mut map) if map.contains_key("status") && map.contains_key("result") => {
            map.remove("result").unwrap_or(Value::Null)
        }
        other => other,
    }
}

fn input_error(path: &Path, err: std::io::Error) -> AppError {
    AppError::from(InfraError::Io(std::io::Error::new(
        err.kind(),
        format!("failed to read `{}`: {err}", path.display()),
    )))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn status_envelope_is_unwrapped() {
        let value = json!({"status": "SUCCESS", "result": {"analysis": {"summary": "ok"}}});
        assert_eq!(
            unwrap_status_envelope(value),
            json!({"analysis": {"summary": "ok"}})
        );
    }

    #[test]
    fn bare_result_is_kept() {
        let value = json!({"proposal": {"title": "Bridge"}});
        assert_eq!(unwrap_status_envelope(value.clone()), value);
    }

    #[tokio::test]
    async fn file_wins_over_inline_value() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("context.txt");
        std::fs::write(&path, "from file").expect("write");

        let value = read_opt_value(Some("inline".to_string()), Some(path))
            .await
            .expect("value");
        assert_eq!(value.as_deref(), Some("from file"));
    }
}
