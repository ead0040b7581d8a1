use std::io;

use clap::Parser;
use commands::{Commands, Run};
use tracing_subscriber::{layer::SubscriberExt, EnvFilter, Registry};

mod commands;
mod config;
mod styles;

pub use blinky_netlist::LOG_ENV_VAR;
pub use config::{Color, Config, Format};

#[derive(Parser)]
#[command(name = "blinky")]
#[command(version, about, long_about = None)]
#[command(styles = styles::get_styles())]
struct Cli {
    /// Use colors
    #[arg(long, value_enum, default_value_t = Color::Auto, global = true)]
    color: Color,
    #[command(subcommand)]
    command: Option<Commands>,
}

fn init_logger(color: Color) -> anyhow::Result<()> {
    let filter = EnvFilter::from_env(LOG_ENV_VAR);
    let subscriber = Registry::default().with(filter);
    let subscriber = subscriber.with(
        tracing_subscriber::fmt::layer()
            .with_writer(io::stderr)
            .with_ansi(color.use_colors())
            .with_target(true),
    );

    tracing::subscriber::set_global_default(subscriber)
        .map_err(|e| anyhow::anyhow!("failed to install logger: {e}"))
}

pub fn run_cli() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logger(cli.color)?;

    match cli.command {
        Some(command) => command.run(),
        None => Commands::default().run(),
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use clap::CommandFactory;

    use super::*;

    #[test]
    fn verify_cli() {
        Cli::command().debug_assert();
    }

    #[test]
    fn no_subcommand() {
        let cli = Cli::try_parse_from(["blinky"]).unwrap();

        assert!(cli.command.is_none());
        assert_eq!(cli.color, Color::Auto);
    }

    #[test]
    fn gen_flags() {
        let cli = Cli::try_parse_from([
            "blinky",
            "gen",
            "-f",
            "100",
            "--format",
            "verilog",
            "--async-reset",
            "--color",
            "never",
        ])
        .unwrap();

        assert_eq!(cli.color, Color::Never);
        let Some(Commands::Gen(args)) = cli.command else {
            panic!("expected gen command");
        };
        let config = args.config().unwrap();
        assert_eq!(config.frequency, 100);
        assert_eq!(config.format, Format::Verilog);
        assert_eq!(config.output_path(), PathBuf::from("top.v"));
        assert_eq!(config.capabilities, ["async-reset"]);
    }

    #[test]
    fn sim_flags() {
        let cli = Cli::try_parse_from(["blinky", "sim", "-n", "8", "--netlist"]).unwrap();

        assert!(matches!(cli.command, Some(Commands::Sim(_))));
    }

    #[test]
    fn rejects_unknown_format() {
        assert!(Cli::try_parse_from(["blinky", "gen", "--format", "vhdl"]).is_err());
    }
}
