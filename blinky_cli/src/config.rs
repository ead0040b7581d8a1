use std::{
    fs,
    io::{self, IsTerminal},
    path::{Path, PathBuf},
    str::FromStr,
};

use anyhow::Context;
use blinky::{
    back::{rtlil, verilog},
    blinky::DEFAULT_FREQUENCY,
    platform::{Capability, Platform},
};
use clap::ValueEnum;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Serialize, Deserialize)]
pub enum Color {
    Never,
    Auto,
    Always,
}

impl Color {
    pub fn use_colors(&self) -> bool {
        match self {
            Self::Never => false,
            Self::Auto => io::stderr().is_terminal(),
            Self::Always => true,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Format {
    #[default]
    Rtlil,
    Verilog,
}

impl Format {
    pub fn ext(&self) -> &'static str {
        match self {
            Self::Rtlil => rtlil::EXT,
            Self::Verilog => verilog::EXT,
        }
    }
}

/// Options of the `gen` command. Values may come from a JSON file and are
/// overridden by command line flags.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub frequency: u64,
    pub output: Option<PathBuf>,
    pub format: Format,
    pub capabilities: Vec<String>,
    pub dump_netlist: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            frequency: DEFAULT_FREQUENCY,
            output: None,
            format: Format::default(),
            capabilities: Vec::new(),
            dump_netlist: false,
        }
    }
}

impl Config {
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("failed to read config '{}'", path.display()))?;

        serde_json::from_str(&text)
            .with_context(|| format!("invalid config '{}'", path.display()))
    }

    /// `top.il` unless an output path is set.
    pub fn output_path(&self) -> PathBuf {
        self.output
            .clone()
            .unwrap_or_else(|| PathBuf::from(format!("top.{}", self.format.ext())))
    }

    pub fn platform(&self) -> anyhow::Result<Option<Platform>> {
        if self.capabilities.is_empty() {
            return Ok(None);
        }

        let mut platform = Platform::new("custom");
        for name in &self.capabilities {
            let capability = Capability::from_str(name)
                .map_err(|_| anyhow::anyhow!("unknown platform capability '{name}'"))?;
            platform = platform.with(capability);
        }

        Ok(Some(platform))
    }
}
