// tests/config_loading.rs

mod common;
use crate::common::builders::ConfigFileBuilder;
use crate::common::TestResult;

use std::fs;
use std::path::Path;

use clap::Parser;
use tempfile::tempdir;

use elmwatch::cli::CliArgs;
use elmwatch::config::{load_and_validate, load_or_default, ConfigFile};
use elmwatch::errors::ElmwatchError;
use elmwatch::types::TriggerWhileRunningBehaviour;

fn write_config(dir: &Path, contents: &str) -> std::path::PathBuf {
    let path = dir.join("Elmwatch.toml");
    fs::write(&path, contents).unwrap();
    path
}

#[test]
fn empty_file_yields_defaults() -> TestResult {
    let dir = tempdir()?;
    let cfg = load_and_validate(write_config(dir.path(), ""))?;

    assert_eq!(cfg.build.source, "Quiz.elm");
    assert_eq!(cfg.build.output, "quiz.js");
    assert_eq!(cfg.build.dest, ".");
    assert_eq!(cfg.compiler.init_cmd(), Some("elm --version"));
    assert_eq!(cfg.watch.patterns, vec!["*.elm".to_string()]);
    assert!(!cfg.watch.use_hash);
    assert_eq!(
        cfg.config.triggered_while_running_behaviour,
        TriggerWhileRunningBehaviour::Queue
    );
    Ok(())
}

#[test]
fn full_file_is_parsed() -> TestResult {
    let dir = tempdir()?;
    let path = write_config(
        dir.path(),
        r#"
[config]
triggered_while_running_behaviour = "cancel"

[build]
source = "src/Main.elm"
output = "app.js"
dest = "public"

[compiler]
init = ""
cmd = "elm make {source} --optimize --output {output}"

[watch]
patterns = ["*.elm", "*.json"]
exclude = ["elm.json"]
use_hash = true
"#,
    );
    let cfg = load_and_validate(&path)?;

    assert_eq!(
        cfg.config.triggered_while_running_behaviour,
        TriggerWhileRunningBehaviour::Cancel
    );
    assert_eq!(cfg.compiler.init_cmd(), None);
    assert!(cfg.watch.use_hash);

    let settings = cfg.build_settings(dir.path());
    assert_eq!(settings.source, dir.path().join("src/Main.elm"));
    assert_eq!(settings.target(), dir.path().join("public").join("app.js"));
    Ok(())
}

#[test]
fn unknown_behaviour_is_a_parse_error() -> TestResult {
    let dir = tempdir()?;
    let path = write_config(
        dir.path(),
        "[config]\ntriggered_while_running_behaviour = \"restart\"\n",
    );
    assert!(matches!(
        load_and_validate(&path),
        Err(ElmwatchError::TomlError(_))
    ));
    Ok(())
}

#[test]
fn invalid_sections_are_rejected() {
    let cases = [
        ConfigFileBuilder::new().source("  ").raw(),
        ConfigFileBuilder::new().output("").raw(),
        ConfigFileBuilder::new().output("build/quiz.js").raw(),
        ConfigFileBuilder::new().output("..").raw(),
        ConfigFileBuilder::new().output(" quiz.js").raw(),
        ConfigFileBuilder::new().output("quiz.js\n").raw(),
        ConfigFileBuilder::new().compile_cmd("elm make {source}").raw(),
        ConfigFileBuilder::new().compile_cmd("").raw(),
        ConfigFileBuilder::new().only_watch("src/[").raw(),
        ConfigFileBuilder::new().exclude("{a,b").raw(),
    ];

    for raw in cases {
        let debug = format!("{raw:?}");
        let result = ConfigFile::try_from(raw);
        assert!(
            matches!(result, Err(ElmwatchError::ConfigError(_))),
            "expected ConfigError for {debug}"
        );
    }
}

#[test]
fn padded_output_name_is_rejected() {
    let raw = ConfigFileBuilder::new().output(" quiz.js").raw();
    assert!(matches!(
        ConfigFile::try_from(raw),
        Err(ElmwatchError::ConfigError(msg)) if msg.contains("whitespace")
    ));
}

#[test]
fn empty_pattern_list_is_rejected() {
    let mut raw = ConfigFileBuilder::new().raw();
    raw.watch.patterns.clear();
    assert!(matches!(
        ConfigFile::try_from(raw),
        Err(ElmwatchError::ConfigError(msg)) if msg.contains("[watch].patterns")
    ));
}

#[test]
fn missing_default_config_falls_back_but_explicit_does_not() -> TestResult {
    let dir = tempdir()?;
    let missing = dir.path().join("Elmwatch.toml");

    let raw = load_or_default(&missing, false)?;
    assert_eq!(raw.build.source, "Quiz.elm");

    assert!(matches!(
        load_or_default(&missing, true),
        Err(ElmwatchError::ConfigError(_))
    ));
    Ok(())
}

#[tokio::test]
async fn unknown_task_is_reported() -> TestResult {
    let dir = tempdir()?;
    let path = write_config(dir.path(), "");
    let args = CliArgs::try_parse_from([
        "elmwatch",
        "deploy",
        "--config",
        path.to_str().unwrap(),
        "--dry-run",
    ])?;

    let err = elmwatch::run(args).await.unwrap_err();
    assert!(matches!(err, ElmwatchError::TaskNotFound(ref t) if t == "deploy"));
    Ok(())
}

#[tokio::test]
async fn dry_run_executes_nothing() -> TestResult {
    let dir = tempdir()?;
    let path = write_config(dir.path(), "[compiler]\ninit = \"exit 1\"\n");
    let args = CliArgs::try_parse_from([
        "elmwatch",
        "build",
        "--config",
        path.to_str().unwrap(),
        "--dry-run",
    ])?;

    elmwatch::run(args).await?;
    assert!(!dir.path().join("quiz.js").exists());
    Ok(())
}
