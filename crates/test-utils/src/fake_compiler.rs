use std::collections::VecDeque;
use std::future::Future;
use std::path::{Path, PathBuf};
use std::pin::Pin;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use elmwatch::compiler::{CompileResult, Compiler, Diagnostic};
use elmwatch::errors::{ElmwatchError, Result};

type CompileHook = Arc<dyn Fn(&Path) + Send + Sync>;

/// A fake compiler that:
/// - counts `init` and `compile` calls
/// - replays scripted compile results in order, then succeeds with
///   `"// compiled <file name>"`
/// - can fail `init`, sleep during `compile`, or call a hook on every compile.
#[derive(Default)]
pub struct FakeCompiler {
    init_calls: AtomicUsize,
    compile_calls: AtomicUsize,
    completed: AtomicUsize,
    init_failure: Option<String>,
    script: Mutex<VecDeque<CompileResult>>,
    delay: Option<Duration>,
    sources: Mutex<Vec<PathBuf>>,
    on_compile: Option<CompileHook>,
}

impl FakeCompiler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make `init` fail with a setup error.
    pub fn failing_init(mut self, message: &str) -> Self {
        self.init_failure = Some(message.to_string());
        self
    }

    /// Queue a successful compile producing `output`.
    pub fn then_output(self, output: &str) -> Self {
        self.push(Ok(output.as_bytes().to_vec()));
        self
    }

    /// Queue a compile failure with the given diagnostic text.
    pub fn then_error(self, message: &str) -> Self {
        self.push(Err(Diagnostic::new("Quiz.elm", message)));
        self
    }

    /// Sleep for `delay` inside every compile.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Call `hook` at the start of every compile.
    pub fn on_compile(mut self, hook: impl Fn(&Path) + Send + Sync + 'static) -> Self {
        self.on_compile = Some(Arc::new(hook));
        self
    }

    fn push(&self, result: CompileResult) {
        self.script.lock().unwrap().push_back(result);
    }

    pub fn init_calls(&self) -> usize {
        self.init_calls.load(Ordering::SeqCst)
    }

    /// Compiles that were started (including ones later cancelled).
    pub fn compile_calls(&self) -> usize {
        self.compile_calls.load(Ordering::SeqCst)
    }

    /// Compiles that ran to completion.
    pub fn completed_compiles(&self) -> usize {
        self.completed.load(Ordering::SeqCst)
    }

    pub fn sources(&self) -> Vec<PathBuf> {
        self.sources.lock().unwrap().clone()
    }
}

impl Compiler for FakeCompiler {
    fn init(&self) -> Pin<Box<dyn Future<Output = Result<()>> + Send + '_>> {
        Box::pin(async move {
            self.init_calls.fetch_add(1, Ordering::SeqCst);
            match &self.init_failure {
                Some(msg) => Err(ElmwatchError::Setup(msg.clone())),
                None => Ok(()),
            }
        })
    }

    fn compile<'a>(
        &'a self,
        source: &'a Path,
    ) -> Pin<Box<dyn Future<Output = CompileResult> + Send + 'a>> {
        Box::pin(async move {
            self.compile_calls.fetch_add(1, Ordering::SeqCst);
            self.sources.lock().unwrap().push(source.to_path_buf());
            if let Some(hook) = &self.on_compile {
                hook(source);
            }

            if let Some(delay) = self.delay {
                tokio::time::sleep(delay).await;
            }

            let scripted = self.script.lock().unwrap().pop_front();
            let result = match scripted {
                Some(Err(mut diag)) => {
                    diag.file = source.to_path_buf();
                    Err(diag)
                }
                Some(ok) => ok,
                None => {
                    let name = source
                        .file_name()
                        .map(|n| n.to_string_lossy().into_owned())
                        .unwrap_or_default();
                    Ok(format!("// compiled {name}").into_bytes())
                }
            };

            self.completed.fetch_add(1, Ordering::SeqCst);
            result
        })
    }
}
