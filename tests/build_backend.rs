// tests/build_backend.rs

mod common;
use crate::common::{init_tracing, quiz_settings, with_timeout, FakeCompiler, TestResult};

use std::path::Path;
use std::sync::Arc;

use tokio::sync::mpsc;
use tokio::time::Duration;

use elmwatch::build::BuildStatus;
use elmwatch::engine::RuntimeEvent;
use elmwatch::exec::{BuildBackend, RealBuildBackend};
use elmwatch::fs::mock::MockFileSystem;
use elmwatch::fs::FileSystem;

fn backend(
    compiler: Arc<FakeCompiler>,
    fs: &MockFileSystem,
) -> (RealBuildBackend, mpsc::Receiver<RuntimeEvent>) {
    let (tx, rx) = mpsc::channel(16);
    let backend = RealBuildBackend::new(
        compiler,
        Arc::new(fs.clone()),
        quiz_settings(Path::new("/project")),
        tx,
    );
    (backend, rx)
}

async fn next_finished(rx: &mut mpsc::Receiver<RuntimeEvent>) -> (u64, BuildStatus) {
    match with_timeout(rx.recv()).await {
        Some(RuntimeEvent::BuildFinished { build_id, status }) => (build_id, status),
        other => panic!("expected BuildFinished, got {other:?}"),
    }
}

#[tokio::test]
async fn finished_build_reports_written() -> TestResult {
    init_tracing();
    let fs = MockFileSystem::new();
    fs.add_file("/project/Quiz.elm", "main = 1");
    let (mut backend, mut rx) = backend(Arc::new(FakeCompiler::new()), &fs);

    backend.start_build(1).await?;

    let (id, status) = next_finished(&mut rx).await;
    assert_eq!(id, 1);
    assert!(status.is_written());
    assert!(fs.exists(Path::new("/project/quiz.js")));
    Ok(())
}

#[tokio::test]
async fn cancelled_build_never_writes() -> TestResult {
    init_tracing();
    let fs = MockFileSystem::new();
    fs.add_file("/project/Quiz.elm", "main = 1");
    let compiler = Arc::new(FakeCompiler::new().with_delay(Duration::from_secs(30)));
    let (mut backend, mut rx) = backend(compiler.clone(), &fs);

    backend.start_build(1).await?;
    tokio::task::yield_now().await;
    backend.cancel_build(1).await?;

    let (id, status) = next_finished(&mut rx).await;
    assert_eq!(id, 1);
    assert_eq!(status, BuildStatus::Cancelled);
    assert_eq!(compiler.completed_compiles(), 0);
    assert_eq!(fs.write_count(), 0);
    Ok(())
}

#[tokio::test]
async fn write_failure_is_reported_not_raised() -> TestResult {
    init_tracing();
    let fs = MockFileSystem::new();
    fs.add_file("/project/Quiz.elm", "main = 1");
    fs.set_read_only("/project");
    let (mut backend, mut rx) = backend(Arc::new(FakeCompiler::new()), &fs);

    backend.start_build(1).await?;

    let (_, status) = next_finished(&mut rx).await;
    assert_eq!(status, BuildStatus::WriteFailed);
    Ok(())
}

#[tokio::test]
async fn compile_failure_is_reported_as_such() -> TestResult {
    init_tracing();
    let fs = MockFileSystem::new();
    fs.add_file("/project/Quiz.elm", "main =");
    let (mut backend, mut rx) = backend(Arc::new(FakeCompiler::new().then_error("oops")), &fs);

    backend.start_build(1).await?;

    let (_, status) = next_finished(&mut rx).await;
    assert_eq!(status, BuildStatus::CompileFailed);
    assert!(!fs.exists(Path::new("/project/quiz.js")));
    Ok(())
}
