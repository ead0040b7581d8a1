use std::{
    fs::File,
    io::{self, BufWriter, Write},
    path::PathBuf,
};

use anyhow::Context;
use blinky::{back, blinky::Blinky, platform::Capability};
use blinky_netlist::{
    backend::{Backend, Rtlil, Verilog},
    visitor::Dump,
};
use clap::Args;
use tracing::info;

use super::Run;
use crate::config::{Config, Format};

#[derive(Debug, Default, Args)]
pub struct GenArgs {
    /// JSON file with default options
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,
    /// Clock frequency in Hz [default: 25000000]
    #[arg(short, long)]
    frequency: Option<u64>,
    /// Output file [default: top.il or top.v]
    #[arg(short, long)]
    output: Option<PathBuf>,
    /// Output format [default: rtlil]
    #[arg(long, value_enum)]
    format: Option<Format>,
    /// Dump generated netlist
    #[arg(long)]
    dump_netlist: bool,
    /// Use asynchronous reset for registers
    #[arg(long)]
    async_reset: bool,
    /// Use active-low reset
    #[arg(long)]
    reset_active_low: bool,
}

impl GenArgs {
    /// Options from the config file with explicit flags applied on top.
    pub fn config(&self) -> anyhow::Result<Config> {
        let mut config = match &self.config {
            Some(path) => Config::load(path)?,
            None => Config::default(),
        };

        if let Some(frequency) = self.frequency {
            config.frequency = frequency;
        }
        if let Some(output) = &self.output {
            config.output = Some(output.clone());
        }
        if let Some(format) = self.format {
            config.format = format;
        }
        config.dump_netlist |= self.dump_netlist;

        for (enabled, capability) in [
            (self.async_reset, Capability::AsyncReset),
            (self.reset_active_low, Capability::ResetActiveLow),
        ] {
            let name = capability.to_string();
            if enabled && !config.capabilities.contains(&name) {
                config.capabilities.push(name);
            }
        }

        Ok(config)
    }

    /// Writes the netlist file and returns its path. The netlist dump, if
    /// requested, goes to `dump`.
    fn generate(&self, dump: impl io::Write) -> anyhow::Result<PathBuf> {
        let config = self.config()?;
        let blinky = Blinky::new(config.frequency)?;
        let platform = config.platform()?;

        let netlist = back::elaborate(&blinky, back::TOP, platform.as_ref())?;
        if config.dump_netlist {
            Dump::new(&netlist)
                .run(dump)
                .context("failed to dump netlist")?;
        }

        let text = match config.format {
            Format::Rtlil => Rtlil::generate(&netlist)?,
            Format::Verilog => Verilog::generate(&netlist)?,
        };

        let path = config.output_path();
        let file = File::create(&path)
            .with_context(|| format!("failed to create '{}'", path.display()))?;
        let mut out = BufWriter::new(file);
        out.write_all(text.as_bytes())
            .and_then(|_| out.flush())
            .with_context(|| format!("failed to write '{}'", path.display()))?;

        info!(
            frequency = config.frequency,
            format = ?config.format,
            "generated {}",
            path.display()
        );

        Ok(path)
    }
}

impl Run for GenArgs {
    fn run(&self) -> anyhow::Result<()> {
        self.generate(io::stdout().lock()).map(|_| ())
    }
}

#[cfg(test)]
mod tests {
    use std::{env, fs, process};

    use super::*;

    fn temp_path(name: &str) -> PathBuf {
        env::temp_dir().join(format!("blinky-{}-{name}", process::id()))
    }

    #[test]
    fn flags_override_config_file() {
        let path = temp_path("config.json");
        fs::write(
            &path,
            r#"{ "frequency": 10, "format": "verilog", "capabilities": ["reset-active-low"] }"#,
        )
        .unwrap();

        let args = GenArgs {
            config: Some(path.clone()),
            frequency: Some(20),
            async_reset: true,
            ..GenArgs::default()
        };
        let config = args.config().unwrap();
        fs::remove_file(&path).unwrap();

        assert_eq!(config.frequency, 20);
        assert_eq!(config.format, Format::Verilog);
        assert_eq!(config.capabilities, ["reset-active-low", "async-reset"]);
    }

    #[test]
    fn writes_rtlil() {
        let path = temp_path("top.il");
        let args = GenArgs {
            frequency: Some(8),
            output: Some(path.clone()),
            ..GenArgs::default()
        };

        args.run().unwrap();
        let text = fs::read_to_string(&path).unwrap();
        fs::remove_file(&path).unwrap();

        let blinky = Blinky::new(8).unwrap();
        assert_eq!(text, back::rtlil::convert(&blinky, None).unwrap());
    }

    #[test]
    fn invalid_frequency() {
        let path = temp_path("invalid.il");
        let args = GenArgs {
            frequency: Some(1),
            output: Some(path.clone()),
            ..GenArgs::default()
        };

        assert!(args.run().is_err());
        assert!(!path.exists());
    }

    #[test]
    fn dumps_netlist() {
        if env::var(crate::LOG_ENV_VAR).is_ok() {
            return;
        }

        let path = temp_path("dump.il");
        let args = GenArgs {
            frequency: Some(4),
            output: Some(path.clone()),
            dump_netlist: true,
            ..GenArgs::default()
        };

        let mut out = Vec::new();
        assert_eq!(args.generate(&mut out).unwrap(), path);
        fs::remove_file(&path).unwrap();

        let dump = String::from_utf8(out).unwrap();
        assert!(dump.starts_with("Netlist:\nmodule top (top)\n"));
        assert!(dump.contains(" input clk: "));
        assert!(dump.contains(" [output]"));
    }

    #[test]
    fn no_dump_by_default() {
        let path = temp_path("no_dump.il");
        let args = GenArgs {
            frequency: Some(4),
            output: Some(path.clone()),
            ..GenArgs::default()
        };

        let mut out = Vec::new();
        args.generate(&mut out).unwrap();
        fs::remove_file(&path).unwrap();

        assert!(out.is_empty());
    }
}
