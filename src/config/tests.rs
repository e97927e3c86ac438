use super::*;
use std::io::Write;
use tempfile::NamedTempFile;

#[test]
fn defaults_match_the_documented_values() {
    let settings = Settings::from_raw(RawSettings::default()).expect("valid settings");

    assert_eq!(settings.api.base_url.as_str(), "http://localhost:8000/");
    assert_eq!(settings.api.request_timeout, Duration::from_secs(30));
    assert_eq!(settings.polling.interval, Duration::from_secs(5));
    assert_eq!(settings.polling.max_attempts.map(NonZeroU32::get), Some(720));
    assert_eq!(settings.logging.level, LevelFilter::INFO);
    assert!(matches!(settings.logging.format, LogFormat::Compact));
    assert_eq!(settings.export.directory, PathBuf::from("."));
    assert!(settings.auth.token_file.is_none());
}

#[test]
fn cli_overrides_take_highest_precedence() {
    let mut raw = RawSettings::default();
    raw.api.base_url = Some("http://from-file:9000/".to_string());
    raw.polling.interval_ms = Some(1_000);
    raw.logging.level = Some("info".to_string());

    let overrides = GlobalOverrides {
        api_url: Some("https://svc.example/".to_string()),
        poll_interval_ms: Some(250),
        log_level: Some("debug".to_string()),
        ..Default::default()
    };

    raw.apply_global_overrides(&overrides);
    let settings = Settings::from_raw(raw).expect("valid settings");

    assert_eq!(settings.api.base_url.as_str(), "https://svc.example/");
    assert_eq!(settings.polling.interval, Duration::from_millis(250));
    assert_eq!(settings.logging.level, LevelFilter::DEBUG);
}

#[test]
fn cli_json_logging_enforces_format() {
    let mut raw = RawSettings::default();
    let overrides = GlobalOverrides {
        log_json: Some(true),
        ..Default::default()
    };

    raw.apply_global_overrides(&overrides);
    let settings = Settings::from_raw(raw).expect("valid settings");

    assert!(matches!(settings.logging.format, LogFormat::Json));
}

#[test]
fn zero_max_attempts_means_unbounded() {
    let mut raw = RawSettings::default();
    raw.polling.max_attempts = Some(0);
    let settings = Settings::from_raw(raw).expect("valid settings");
    assert!(settings.polling.max_attempts.is_none());
}

#[test]
fn zero_interval_is_rejected() {
    let mut raw = RawSettings::default();
    raw.polling.interval_ms = Some(0);
    let err = Settings::from_raw(raw).expect_err("zero interval");
    assert!(matches!(
        err,
        LoadError::Invalid {
            key: "polling.interval_ms",
            ..
        }
    ));
}

#[test]
fn non_http_base_url_is_rejected() {
    let mut raw = RawSettings::default();
    raw.api.base_url = Some("ftp://svc.example/".to_string());
    let err = Settings::from_raw(raw).expect_err("bad scheme");
    assert!(matches!(err, LoadError::Invalid { key: "api.base_url", .. }));
}

#[test]
fn blank_token_is_dropped() {
    let mut raw = RawSettings::default();
    raw.auth.token = Some("   ".to_string());
    let settings = Settings::from_raw(raw).expect("valid settings");
    assert!(settings.auth.token.is_none());
}

#[test]
fn auth_debug_hides_token() {
    let auth = AuthSettings {
        token_file: None,
        token: Some("secret".to_string()),
    };
    assert!(!format!("{auth:?}").contains("secret"));
}

#[test]
fn config_file_is_layered_under_cli_flags() {
    let mut file = tempfile::Builder::new()
        .suffix(".toml")
        .tempfile()
        .expect("tmp file");
    writeln!(
        file,
        "[api]\nbase_url = \"http://file.example/\"\n[polling]\ninterval_ms = 1500\nmax_attempts = 3"
    )
    .expect("write config");

    let path = file.path().to_str().expect("utf8 path").to_string();
    let args = CliArgs::parse_from([
        "docintel",
        "--config-file",
        path.as_str(),
        "--poll-max-attempts",
        "9",
        "options",
    ]);
    let settings = load(&args).expect("settings");

    assert_eq!(settings.api.base_url.as_str(), "http://file.example/");
    assert_eq!(settings.polling.interval, Duration::from_millis(1_500));
    assert_eq!(settings.polling.max_attempts.map(NonZeroU32::get), Some(9));
}

#[test]
fn missing_config_file_is_an_error() {
    let file = NamedTempFile::new().expect("tmp file");
    let path = file.path().with_extension("missing.toml");
    let args = CliArgs::parse_from([
        "docintel",
        "--config-file",
        path.to_str().expect("utf8 path"),
        "options",
    ]);
    assert!(matches!(load(&args), Err(LoadError::Build(_))));
}

#[test]
fn out_dir_overrides_export_directory() {
    let args = CliArgs::parse_from(["docintel", "export", "result.json", "--out-dir", "/tmp/reports"]);
    let settings = load(&args).expect("settings");
    assert_eq!(settings.export.directory, PathBuf::from("/tmp/reports"));
}

#[test]
fn parse_analyze_arguments() {
    let args = CliArgs::parse_from([
        "docintel",
        "analyze",
        "--file",
        "cv.pdf",
        "--context",
        "Senior engineer role",
        "--document-type",
        "resume",
        "--model",
        "gpt-4",
        "--format",
        "json",
        "--pdf",
        "--poll-interval-ms",
        "10",
    ]);

    assert_eq!(args.overrides.poll_interval_ms, Some(10));
    match args.command {
        Command::Analyze(analyze) => {
            assert_eq!(analyze.file, Some(PathBuf::from("cv.pdf")));
            assert_eq!(analyze.context.as_deref(), Some("Senior engineer role"));
            assert_eq!(analyze.document_type.as_deref(), Some("resume"));
            assert_eq!(analyze.model.as_deref(), Some("gpt-4"));
            assert_eq!(analyze.format, OutputFormat::Json);
            assert!(analyze.pdf);
            assert!(analyze.out_dir.is_none());
        }
        other => panic!("unexpected command: {other:?}"),
    }
}

#[test]
fn context_and_context_file_conflict() {
    let result = CliArgs::try_parse_from([
        "docintel",
        "analyze",
        "--context",
        "inline",
        "--context-file",
        "ctx.txt",
    ]);
    assert!(result.is_err());
}

#[test]
fn parse_status_and_render_arguments() {
    let args = CliArgs::parse_from(["docintel", "status", "abc123"]);
    assert!(matches!(args.command, Command::Status(StatusArgs { ref task_id }) if task_id == "abc123"));

    let args = CliArgs::parse_from(["docintel", "render", "result.json"]);
    match args.command {
        Command::Render(render) => {
            assert_eq!(render.file, PathBuf::from("result.json"));
            assert_eq!(render.format, OutputFormat::Markdown);
        }
        other => panic!("unexpected command: {other:?}"),
    }
}
