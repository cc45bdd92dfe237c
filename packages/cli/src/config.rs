use quizsheet_vision::{CaptureOptions, CommandSpooler, ExportOptions};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

pub const DEFAULT_CONFIG_NAME: &str = "quizsheet.config.json";

/// Quizsheet configuration file format
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    /// Exported PDF, relative to the working directory
    #[serde(default = "default_output_file")]
    pub output_file: String,

    /// Device pixel ratio used when capturing the preview
    #[serde(default = "default_scale")]
    pub scale: f64,

    /// Browser window width in CSS pixels
    #[serde(default = "default_viewport_width")]
    pub viewport_width: u32,

    #[serde(default = "default_capture_timeout_secs")]
    pub capture_timeout_secs: u64,

    /// Program and arguments receiving the print job on stdin
    #[serde(default = "default_print_command")]
    pub print_command: Vec<String>,
}

fn default_output_file() -> String {
    "english-quiz.pdf".to_string()
}

fn default_scale() -> f64 {
    2.0
}

fn default_viewport_width() -> u32 {
    900
}

fn default_capture_timeout_secs() -> u64 {
    30
}

fn default_print_command() -> Vec<String> {
    vec!["lp".to_string()]
}

impl Config {
    /// Load config from a directory
    pub fn load(cwd: &Path) -> anyhow::Result<Self> {
        let config_path = cwd.join(DEFAULT_CONFIG_NAME);

        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            let config: Config = serde_json::from_str(&content)?;
            Ok(config)
        } else {
            Ok(Config::default())
        }
    }

    pub fn output_path(&self, cwd: &Path) -> PathBuf {
        cwd.join(&self.output_file)
    }

    pub fn capture_options(&self) -> CaptureOptions {
        CaptureOptions {
            scale: self.scale,
            viewport_width: self.viewport_width,
            timeout: Duration::from_secs(self.capture_timeout_secs),
            ..Default::default()
        }
    }

    pub fn export_options(&self, cwd: &Path) -> ExportOptions {
        ExportOptions {
            output_path: self.output_path(cwd),
            capture: self.capture_options(),
            ..Default::default()
        }
    }

    pub fn spooler(&self) -> CommandSpooler {
        CommandSpooler::new(self.print_command.clone())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            output_file: default_output_file(),
            scale: default_scale(),
            viewport_width: default_viewport_width(),
            capture_timeout_secs: default_capture_timeout_secs(),
            print_command: default_print_command(),
        }
    }
}
