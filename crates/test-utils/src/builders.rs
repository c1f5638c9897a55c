#![allow(dead_code)]

use elmwatch::config::{ConfigFile, RawConfigFile};
use elmwatch::types::TriggerWhileRunningBehaviour;

/// Builder for `ConfigFile` to simplify test setup.
///
/// Starts from the built-in defaults (`Quiz.elm` -> `./quiz.js`).
pub struct ConfigFileBuilder {
    config: RawConfigFile,
}

impl ConfigFileBuilder {
    pub fn new() -> Self {
        Self {
            config: RawConfigFile::default(),
        }
    }

    pub fn source(mut self, source: &str) -> Self {
        self.config.build.source = source.to_string();
        self
    }

    pub fn output(mut self, output: &str) -> Self {
        self.config.build.output = output.to_string();
        self
    }

    pub fn dest(mut self, dest: &str) -> Self {
        self.config.build.dest = dest.to_string();
        self
    }

    pub fn init_cmd(mut self, init: &str) -> Self {
        self.config.compiler.init = init.to_string();
        self
    }

    pub fn compile_cmd(mut self, cmd: &str) -> Self {
        self.config.compiler.cmd = cmd.to_string();
        self
    }

    pub fn watch(mut self, pattern: &str) -> Self {
        self.config.watch.patterns.push(pattern.to_string());
        self
    }

    /// Replace the default `*.elm` pattern list.
    pub fn only_watch(mut self, pattern: &str) -> Self {
        self.config.watch.patterns = vec![pattern.to_string()];
        self
    }

    pub fn exclude(mut self, pattern: &str) -> Self {
        self.config.watch.exclude.push(pattern.to_string());
        self
    }

    pub fn use_hash(mut self, val: bool) -> Self {
        self.config.watch.use_hash = val;
        self
    }

    pub fn behaviour(mut self, behaviour: TriggerWhileRunningBehaviour) -> Self {
        self.config.config.triggered_while_running_behaviour = behaviour;
        self
    }

    pub fn raw(self) -> RawConfigFile {
        self.config
    }

    pub fn build(self) -> ConfigFile {
        ConfigFile::try_from(self.config).expect("Failed to build valid config from builder")
    }
}

impl Default for ConfigFileBuilder {
    fn default() -> Self {
        Self::new()
    }
}
