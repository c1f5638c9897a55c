// src/config/model.rs

use std::path::Path;

use serde::Deserialize;

use crate::build::BuildSettings;
use crate::types::TriggerWhileRunningBehaviour;

/// Raw configuration as read from a TOML file, before validation.
///
/// ```toml
/// [config]
/// triggered_while_running_behaviour = "queue"
///
/// [build]
/// source = "Quiz.elm"
/// output = "quiz.js"
/// dest = "."
///
/// [compiler]
/// init = "elm --version"
/// cmd = "elm make {source} --output {output}"
///
/// [watch]
/// patterns = ["*.elm"]
/// exclude = []
/// use_hash = false
/// ```
///
/// All sections are optional and have reasonable defaults.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct RawConfigFile {
    /// Global behaviour config from `[config]`.
    #[serde(default)]
    pub config: ConfigSection,

    /// Input/output files from `[build]`.
    #[serde(default)]
    pub build: BuildSection,

    /// Compiler commands from `[compiler]`.
    #[serde(default)]
    pub compiler: CompilerSection,

    /// Watch patterns from `[watch]`.
    #[serde(default)]
    pub watch: WatchSection,
}

/// Validated configuration.
///
/// Only constructible through `TryFrom<RawConfigFile>`, so holding one means
/// the invariants in `config::validate` hold.
#[derive(Debug, Clone)]
pub struct ConfigFile {
    pub config: ConfigSection,
    pub build: BuildSection,
    pub compiler: CompilerSection,
    pub watch: WatchSection,
}

impl ConfigFile {
    pub(crate) fn new_unchecked(raw: RawConfigFile) -> Self {
        Self {
            config: raw.config,
            build: raw.build,
            compiler: raw.compiler,
            watch: raw.watch,
        }
    }

    /// Resolve the `[build]` section against the project root.
    pub fn build_settings(&self, root: &Path) -> BuildSettings {
        BuildSettings {
            root: root.to_path_buf(),
            source: root.join(&self.build.source),
            output: self.build.output.clone(),
            dest: root.join(&self.build.dest),
        }
    }
}

/// `[config]` section.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct ConfigSection {
    /// `"queue"` (default) or `"cancel"`.
    #[serde(default)]
    pub triggered_while_running_behaviour: TriggerWhileRunningBehaviour,
}

/// `[build]` section.
#[derive(Debug, Clone, Deserialize)]
pub struct BuildSection {
    /// The single source file handed to the compiler, relative to the root.
    #[serde(default = "default_source")]
    pub source: String,

    /// File name of the compiled output. Never derived from `source`.
    #[serde(default = "default_output")]
    pub output: String,

    /// Directory the output is written into, relative to the root.
    #[serde(default = "default_dest")]
    pub dest: String,
}

fn default_source() -> String {
    "Quiz.elm".to_string()
}

fn default_output() -> String {
    "quiz.js".to_string()
}

fn default_dest() -> String {
    ".".to_string()
}

impl Default for BuildSection {
    fn default() -> Self {
        Self {
            source: default_source(),
            output: default_output(),
            dest: default_dest(),
        }
    }
}

/// `[compiler]` section.
#[derive(Debug, Clone, Deserialize)]
pub struct CompilerSection {
    /// One-time preparation command. An empty string disables it.
    #[serde(default = "default_init")]
    pub init: String,

    /// Compile command template; `{source}` and `{output}` are substituted
    /// with shell-quoted paths.
    #[serde(default = "default_cmd")]
    pub cmd: String,
}

fn default_init() -> String {
    "elm --version".to_string()
}

fn default_cmd() -> String {
    "elm make {source} --output {output}".to_string()
}

impl Default for CompilerSection {
    fn default() -> Self {
        Self {
            init: default_init(),
            cmd: default_cmd(),
        }
    }
}

impl CompilerSection {
    /// The init command, or `None` when disabled.
    pub fn init_cmd(&self) -> Option<&str> {
        let trimmed = self.init.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(trimmed)
        }
    }
}

/// `[watch]` section.
#[derive(Debug, Clone, Deserialize)]
pub struct WatchSection {
    /// Globs (relative to the root, non-recursive) that trigger a rebuild.
    #[serde(default = "default_patterns")]
    pub patterns: Vec<String>,

    /// Globs that are ignored even if they match `patterns`.
    #[serde(default)]
    pub exclude: Vec<String>,

    /// Only rebuild when the content of a changed file actually changed.
    #[serde(default)]
    pub use_hash: bool,
}

fn default_patterns() -> Vec<String> {
    vec!["*.elm".to_string()]
}

impl Default for WatchSection {
    fn default() -> Self {
        Self {
            patterns: default_patterns(),
            exclude: Vec::new(),
            use_hash: false,
        }
    }
}
