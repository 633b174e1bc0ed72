//! Command-line interface for preconfig.
//!
//! preconfig reads a template (from a file argument or stdin), resolves
//! every `${source:path}` control expression in it against `-p`
//! parameters, the process environment, and referenced files, and
//! writes the result to stdout — optionally re-formatted as JSON or
//! YAML.
//!
//! # Examples
//!
//! ```bash
//! preconfig config.yaml.tpl -p env=prod
//! cat template.json | preconfig -f json
//! preconfig settings.tpl -p name=value -p other=thing -v
//! ```

use std::collections::HashMap;
use std::io::Read as _;
use std::path::PathBuf;

use clap::{Parser, ValueEnum};

use crate::error::{PreconfigError, Result};
use crate::template::Template;

/// Output re-formatting requested via `-f`/`--format`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Write the resolved text unchanged.
    Text,
    /// Parse the resolved text as structured data and re-emit as JSON.
    Json,
    /// Parse the resolved text as structured data and re-emit as YAML.
    Yaml,
}

/// preconfig: resolve `${source:path}` control expressions in a
/// configuration template.
#[derive(Parser, Debug)]
#[command(
    name = "preconfig",
    about = "Resolve ${source:path} control expressions in a configuration template",
    version
)]
pub struct Cli {
    /// Path to the template file. Reads stdin when omitted.
    pub file: Option<PathBuf>,

    /// How to format the resolved output.
    #[arg(short = 'f', long = "format", value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    /// A `key=value` parameter, consulted by `${para:key}`. May be
    /// repeated.
    #[arg(short = 'p', long = "param")]
    pub param: Vec<String>,

    /// Enable debug logging (equivalent to `RUST_LOG=debug`).
    #[arg(short, long)]
    pub verbose: bool,
}

fn parse_param(raw: &str) -> Result<(String, String)> {
    raw.split_once('=')
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .ok_or_else(|| PreconfigError::validation(format!("expected key=value, found: {raw}")))
}

impl Cli {
    /// Read the template's raw text: from `self.file` if given, from
    /// stdin otherwise. Returns the directory `file` references inside
    /// the template should be resolved relative to.
    pub fn read_input(&self) -> Result<(String, PathBuf)> {
        match &self.file {
            Some(path) => {
                let content = crate::fs::read_text_file(path)?;
                let cwd = path
                    .parent()
                    .filter(|p| !p.as_os_str().is_empty())
                    .map_or_else(|| PathBuf::from("."), std::path::Path::to_path_buf);
                Ok((content, cwd))
            }
            None => {
                let mut content = String::new();
                std::io::stdin()
                    .read_to_string(&mut content)
                    .map_err(PreconfigError::Io)?;
                Ok((content, PathBuf::from(".")))
            }
        }
    }

    /// Build the parameter map from repeated `-p key=value` arguments,
    /// raising [`PreconfigError::Validation`] for a pair missing `=`.
    pub fn parameters(&self) -> Result<HashMap<String, String>> {
        self.param.iter().map(|raw| parse_param(raw)).collect()
    }

    /// Resolve the template named by this invocation and format the
    /// result per `--format`.
    pub fn run(&self) -> Result<String> {
        let (content, cwd) = self.read_input()?;
        let template = Template::new(content, cwd)?;
        let resolved = template.resolve(&self.parameters()?)?;
        format_output(&resolved, self.format)
    }
}

/// Re-format resolved template text. [`OutputFormat::Text`] passes it
/// through unchanged; [`OutputFormat::Json`]/[`OutputFormat::Yaml`]
/// parse it as JSON or YAML first and re-serialize in the requested
/// format, raising [`PreconfigError::Validation`] if the resolved text
/// isn't valid structured data.
pub fn format_output(resolved: &str, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Text => Ok(resolved.to_string()),
        OutputFormat::Json => {
            let value: serde_json::Value = serde_json::from_str(resolved).map_err(|e| {
                PreconfigError::validation(format!("resolved output is not valid JSON: {e}"))
            })?;
            serde_json::to_string_pretty(&value)
                .map_err(|e| PreconfigError::implementation(format!("failed to serialize JSON: {e}")))
        }
        OutputFormat::Yaml => {
            let value: serde_yaml::Value = serde_yaml::from_str(resolved).map_err(|e| {
                PreconfigError::validation(format!("resolved output is not valid YAML: {e}"))
            })?;
            serde_yaml::to_string(&value)
                .map_err(|e| PreconfigError::implementation(format!("failed to serialize YAML: {e}")))
        }
    }
}
