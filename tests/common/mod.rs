#![allow(dead_code)]

use std::path::Path;
use std::sync::Arc;

use elmwatch::build::BuildSettings;
use elmwatch::config::WatchSection;
use elmwatch::dag::TaskContext;
use elmwatch::fs::mock::MockFileSystem;
use elmwatch::types::TriggerWhileRunningBehaviour;

// Not every test binary uses every helper.
#[allow(unused_imports)]
pub use elmwatch_test_utils::builders;
#[allow(unused_imports)]
pub use elmwatch_test_utils::fake_backend::{BackendCall, FakeBuildBackend};
#[allow(unused_imports)]
pub use elmwatch_test_utils::fake_compiler::FakeCompiler;
#[allow(unused_imports)]
pub use elmwatch_test_utils::{init_tracing, with_timeout};

pub type TestResult = Result<(), Box<dyn std::error::Error>>;

/// `Quiz.elm` -> `<root>/quiz.js`, the default layout.
pub fn quiz_settings(root: &Path) -> BuildSettings {
    BuildSettings {
        root: root.to_path_buf(),
        source: root.join("Quiz.elm"),
        output: "quiz.js".to_string(),
        dest: root.to_path_buf(),
    }
}

/// Task context over an in-memory filesystem and a fake compiler.
pub fn mock_context(compiler: Arc<FakeCompiler>, fs: &MockFileSystem, root: &Path) -> TaskContext {
    TaskContext {
        compiler,
        fs: Arc::new(fs.clone()),
        build: quiz_settings(root),
        watch: WatchSection::default(),
        behaviour: TriggerWhileRunningBehaviour::Queue,
    }
}

/// Poll `cond` every 20ms until it holds (fails the test after 5 seconds).
pub async fn wait_until(mut cond: impl FnMut() -> bool) {
    with_timeout(async {
        while !cond() {
            tokio::time::sleep(std::time::Duration::from_millis(20)).await;
        }
    })
    .await
}
