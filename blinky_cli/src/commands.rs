use clap::Subcommand;

use self::{gen::GenArgs, sim::SimArgs};

mod gen;
mod sim;

#[derive(Subcommand)]
pub enum Commands {
    /// Generate a netlist file (default)
    Gen(GenArgs),
    /// Print the led and counter values for a number of clock cycles
    Sim(SimArgs),
}

impl Default for Commands {
    fn default() -> Self {
        Self::Gen(GenArgs::default())
    }
}

pub trait Run {
    fn run(&self) -> anyhow::Result<()>;
}

impl Run for Commands {
    fn run(&self) -> anyhow::Result<()> {
        match self {
            Self::Gen(args) => args.run(),
            Self::Sim(args) => args.run(),
        }
    }
}
