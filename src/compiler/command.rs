// src/compiler/command.rs

//! Compiler adapter that shells out to an external toolchain.

use std::future::Future;
use std::path::{Path, PathBuf};
use std::pin::Pin;
use std::process::{Output, Stdio};

use tokio::process::Command;
use tokio::sync::OnceCell;
use tracing::{debug, info};

use crate::compiler::{CompileResult, Compiler, Diagnostic};
use crate::config::ConfigFile;
use crate::errors::{ElmwatchError, Result};

/// Runs `[compiler].init` once and `[compiler].cmd` for every build.
///
/// The compile command writes into a private staging directory; the bytes
/// are read back and handed to the build task, which owns the real
/// destination. A failed or cancelled compile therefore never touches the
/// output file.
#[derive(Debug)]
pub struct CommandCompiler {
    root: PathBuf,
    init_cmd: Option<String>,
    cmd: String,
    staging_name: String,
    initialized: OnceCell<()>,
}

impl CommandCompiler {
    /// `output` is only used for its extension: `elm make` picks the output
    /// format from it.
    pub fn new(
        root: impl Into<PathBuf>,
        init_cmd: Option<String>,
        cmd: impl Into<String>,
        output: &str,
    ) -> Self {
        let staging_name = match Path::new(output).extension() {
            Some(ext) => format!("compiled.{}", ext.to_string_lossy()),
            None => "compiled".to_string(),
        };

        Self {
            root: root.into(),
            init_cmd,
            cmd: cmd.into(),
            staging_name,
            initialized: OnceCell::new(),
        }
    }

    pub fn from_config(cfg: &ConfigFile, root: &Path) -> Self {
        Self::new(
            root,
            cfg.compiler.init_cmd().map(str::to_string),
            cfg.compiler.cmd.clone(),
            &cfg.build.output,
        )
    }

    async fn run_init(&self) -> Result<()> {
        let Some(cmd) = self.init_cmd.as_deref() else {
            debug!("no compiler init command configured");
            return Ok(());
        };

        info!(cmd = %cmd, "preparing compiler toolchain");

        let output = shell_command(cmd)
            .current_dir(&self.root)
            .stdin(Stdio::null())
            .output()
            .await
            .map_err(|e| ElmwatchError::Setup(format!("could not run '{cmd}': {e}")))?;

        if !output.status.success() {
            return Err(ElmwatchError::Setup(format!(
                "'{cmd}' failed: {}",
                failure_text(&output)
            )));
        }

        debug!(cmd = %cmd, "compiler toolchain ready");
        Ok(())
    }

    async fn compile_inner(&self, source: &Path) -> CompileResult {
        let is_file = tokio::fs::metadata(source)
            .await
            .map(|m| m.is_file())
            .unwrap_or(false);
        if !is_file {
            return Err(Diagnostic::new(
                source,
                format!("source file not found: {}", source.display()),
            ));
        }

        let staging_dir = tempfile::Builder::new()
            .prefix("elmwatch-")
            .tempdir()
            .map_err(|e| Diagnostic::new(source, format!("could not create staging dir: {e}")))?;
        let staged = staging_dir.path().join(&self.staging_name);

        let rendered = render_command(&self.cmd, source, &staged);
        debug!(cmd = %rendered, "running compiler");

        let output = shell_command(&rendered)
            .current_dir(&self.root)
            .stdin(Stdio::null())
            .kill_on_drop(true)
            .output()
            .await
            .map_err(|e| Diagnostic::new(source, format!("could not run compiler: {e}")))?;

        if !output.status.success() {
            return Err(Diagnostic::new(source, failure_text(&output)));
        }

        tokio::fs::read(&staged).await.map_err(|e| {
            Diagnostic::new(
                source,
                format!("compiler succeeded but wrote no output to {}: {e}", staged.display()),
            )
        })
    }
}

impl Compiler for CommandCompiler {
    fn init(&self) -> Pin<Box<dyn Future<Output = Result<()>> + Send + '_>> {
        Box::pin(async move {
            self.initialized.get_or_try_init(|| self.run_init()).await?;
            Ok(())
        })
    }

    fn compile<'a>(
        &'a self,
        source: &'a Path,
    ) -> Pin<Box<dyn Future<Output = CompileResult> + Send + 'a>> {
        Box::pin(self.compile_inner(source))
    }
}

/// Build a shell command appropriate for the platform.
fn shell_command(cmd: &str) -> Command {
    if cfg!(windows) {
        let mut c = Command::new("cmd");
        c.arg("/C").arg(cmd);
        c
    } else {
        let mut c = Command::new("sh");
        c.arg("-c").arg(cmd);
        c
    }
}

/// Substitute `{source}` and `{output}` with shell-quoted paths.
///
/// Single pass over the template: substituted text is never rescanned, so a
/// path containing a placeholder is left as is.
pub fn render_command(template: &str, source: &Path, output: &Path) -> String {
    let source = shell_quote(&source.to_string_lossy());
    let output = shell_quote(&output.to_string_lossy());

    let mut rendered = String::with_capacity(template.len() + source.len() + output.len());
    let mut rest = template;
    while let Some(open) = rest.find('{') {
        rendered.push_str(&rest[..open]);
        let tail = &rest[open..];
        if let Some(after) = tail.strip_prefix("{source}") {
            rendered.push_str(&source);
            rest = after;
        } else if let Some(after) = tail.strip_prefix("{output}") {
            rendered.push_str(&output);
            rest = after;
        } else {
            rendered.push('{');
            rest = &tail[1..];
        }
    }
    rendered.push_str(rest);
    rendered
}

fn shell_quote(s: &str) -> String {
    if cfg!(windows) {
        format!("\"{}\"", s.replace('"', "\"\""))
    } else {
        format!("'{}'", s.replace('\'', "'\\''"))
    }
}

/// Compiler diagnostics go to stderr for most toolchains, but not all of
/// them; keep both streams.
fn failure_text(output: &Output) -> String {
    let stderr = String::from_utf8_lossy(&output.stderr);
    let stdout = String::from_utf8_lossy(&output.stdout);

    let text = [stderr.trim(), stdout.trim()]
        .into_iter()
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join("\n");

    if text.is_empty() {
        match output.status.code() {
            Some(code) => format!("compiler exited with status {code}"),
            None => "compiler terminated by signal".to_string(),
        }
    } else {
        text
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[cfg(unix)]
    #[test]
    fn render_command_quotes_paths() {
        let rendered = render_command(
            "elm make {source} --output {output}",
            Path::new("/tmp/my project/Quiz.elm"),
            Path::new("/tmp/it's/compiled.js"),
        );
        assert_eq!(
            rendered,
            "elm make '/tmp/my project/Quiz.elm' --output '/tmp/it'\\''s/compiled.js'"
        );
    }

    #[cfg(unix)]
    #[test]
    fn placeholders_inside_paths_are_not_expanded() {
        let rendered = render_command(
            "cp {source} {output} # {other}",
            Path::new("/tmp/{output}/Quiz.elm"),
            Path::new("/stage/compiled.js"),
        );
        assert_eq!(
            rendered,
            "cp '/tmp/{output}/Quiz.elm' '/stage/compiled.js' # {other}"
        );
    }

    #[test]
    fn staging_name_keeps_output_extension() {
        let c = CommandCompiler::new(".", None, "true {source} {output}", "quiz.js");
        assert_eq!(c.staging_name, "compiled.js");

        let c = CommandCompiler::new(".", None, "true {source} {output}", "index");
        assert_eq!(c.staging_name, "compiled");
    }
}
