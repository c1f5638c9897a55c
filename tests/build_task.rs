// tests/build_task.rs

mod common;
use crate::common::{init_tracing, quiz_settings, FakeCompiler, TestResult};

use std::path::{Path, PathBuf};

use elmwatch::build::{run_build, BuildSettings, BuildStatus};
use elmwatch::fs::mock::MockFileSystem;
use elmwatch::fs::FileSystem;

const ROOT: &str = "/project";

fn setup() -> (MockFileSystem, BuildSettings) {
    init_tracing();
    let fs = MockFileSystem::new();
    fs.add_file("/project/Quiz.elm", "module Quiz exposing (main)");
    (fs, quiz_settings(Path::new(ROOT)))
}

#[tokio::test]
async fn successful_compile_writes_fixed_output_name() -> TestResult {
    let (fs, settings) = setup();
    let compiler = FakeCompiler::new().then_output("var Elm = {};");

    let run = run_build(&compiler, &fs, &settings).await?;

    assert_eq!(
        run.status,
        BuildStatus::Written {
            path: PathBuf::from("/project/quiz.js"),
            bytes: 13,
        }
    );
    assert_eq!(fs.read(Path::new("/project/quiz.js"))?, b"var Elm = {};");
    assert!(run.diagnostic.is_none());
    Ok(())
}

#[tokio::test]
async fn unchanged_source_builds_identical_output() -> TestResult {
    let (fs, settings) = setup();
    let compiler = FakeCompiler::new();

    run_build(&compiler, &fs, &settings).await?;
    let first = fs.read(&settings.target())?;
    run_build(&compiler, &fs, &settings).await?;
    let second = fs.read(&settings.target())?;

    assert_eq!(first, second);
    assert_eq!(compiler.compile_calls(), 2);
    Ok(())
}

#[tokio::test]
async fn compile_error_is_swallowed_and_previous_output_kept() -> TestResult {
    let (fs, settings) = setup();
    let compiler = FakeCompiler::new()
        .then_output("good build")
        .then_error("-- SYNTAX PROBLEM ----- Quiz.elm");

    run_build(&compiler, &fs, &settings).await?;
    let writes_before = fs.write_count();

    let run = run_build(&compiler, &fs, &settings).await?;

    assert_eq!(run.status, BuildStatus::CompileFailed);
    assert_eq!(
        run.diagnostic.as_deref(),
        Some("-- SYNTAX PROBLEM ----- Quiz.elm")
    );
    assert_eq!(fs.write_count(), writes_before);
    assert_eq!(fs.read(&settings.target())?, b"good build");
    Ok(())
}

#[tokio::test]
async fn first_build_failing_leaves_no_output() -> TestResult {
    let (fs, settings) = setup();
    let compiler = FakeCompiler::new().then_error("broken");

    let run = run_build(&compiler, &fs, &settings).await?;

    assert!(!run.status.is_written());
    assert!(!fs.exists(&settings.target()));
    Ok(())
}

#[tokio::test]
async fn output_name_does_not_follow_source_name() -> TestResult {
    init_tracing();
    let fs = MockFileSystem::new();
    fs.add_file("/project/src/Main.elm", "module Main exposing (main)");
    let settings = BuildSettings {
        root: PathBuf::from(ROOT),
        source: PathBuf::from("/project/src/Main.elm"),
        output: "quiz.js".to_string(),
        dest: PathBuf::from("/project/public"),
    };
    let compiler = FakeCompiler::new();

    let run = run_build(&compiler, &fs, &settings).await?;

    assert!(run.status.is_written());
    assert!(fs.exists(Path::new("/project/public/quiz.js")));
    assert!(!fs.exists(Path::new("/project/public/Main.js")));
    assert_eq!(compiler.sources(), vec![PathBuf::from("/project/src/Main.elm")]);
    Ok(())
}

#[tokio::test]
async fn unwritable_destination_is_an_error() -> TestResult {
    let (fs, settings) = setup();
    fs.set_read_only(ROOT);
    let compiler = FakeCompiler::new();

    let err = run_build(&compiler, &fs, &settings)
        .await
        .expect_err("write into a read-only dir must fail");

    assert!(format!("{err:#}").contains("quiz.js"));
    assert_eq!(fs.write_count(), 0);
    Ok(())
}
