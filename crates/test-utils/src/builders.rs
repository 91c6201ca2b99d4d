use std::fs;
use std::path::{Path, PathBuf};

use cmdrun::config::{ConfigFile, RawConfigFile};

/// Builder for `ConfigFile` to simplify test setup.
pub struct ConfigFileBuilder {
    config: RawConfigFile,
}

impl ConfigFileBuilder {
    pub fn new() -> Self {
        Self {
            config: RawConfigFile::default(),
        }
    }

    pub fn start_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.config.discover.start_dir = dir.into();
        self
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

/// Builder for the TOML text of a test-suite file.
#[derive(Default)]
pub struct SuiteBuilder {
    body: String,
}

impl SuiteBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// A case expected to exit 0.
    pub fn case(self, name: &str, cmd: &str) -> Self {
        self.case_full(name, cmd, 0, None)
    }

    pub fn case_full(
        mut self,
        name: &str,
        cmd: &str,
        expect_code: i32,
        expect_output: Option<&str>,
    ) -> Self {
        self.body.push_str("[[case]]\n");
        self.body.push_str(&format!("name = {name:?}\n"));
        self.body.push_str(&format!("cmd = {cmd:?}\n"));
        self.body.push_str(&format!("expect_code = {expect_code}\n"));
        if let Some(out) = expect_output {
            self.body.push_str(&format!("expect_output = {out:?}\n"));
        }
        self.body.push('\n');
        self
    }

    pub fn build(self) -> String {
        self.body
    }

    /// Write the suite to `dir/file_name`, creating `dir` if needed.
    pub fn write_to(self, dir: &Path, file_name: &str) -> PathBuf {
        fs::create_dir_all(dir).expect("creating suite dir");
        let path = dir.join(file_name);
        fs::write(&path, self.build()).expect("writing suite file");
        path
    }
}
