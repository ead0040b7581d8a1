use std::io;

use anyhow::Context;
use blinky::{
    back,
    bit::Bit,
    blinky::{Blinky, DEFAULT_FREQUENCY},
    domain::{hz_to_period, NANOSECOND},
    simulation::Simulate,
};
use blinky_netlist::sim::Simulator;
use clap::Args;

use super::Run;

#[derive(Debug, Args)]
pub struct SimArgs {
    /// Clock frequency in Hz
    #[arg(short, long, default_value_t = DEFAULT_FREQUENCY)]
    frequency: u64,
    /// Number of clock cycles
    #[arg(short = 'n', long, default_value_t = 32)]
    cycles: u64,
    /// Simulate the elaborated netlist instead of the behavioral model
    #[arg(long)]
    netlist: bool,
}

/// One output line: cycle, simulated time in ns, led and count.
fn format_line(cycle: u64, period: u64, led: Bit, count: u128) -> String {
    let time = u128::from(cycle) * u128::from(period);
    let ns = u128::from(NANOSECOND);

    format!(
        "{cycle:>8} {:>12}.{:03} ns  led = {led}  count = {count}",
        time / ns,
        time % ns
    )
}

impl SimArgs {
    fn trace(&self, mut out: impl io::Write) -> anyhow::Result<()> {
        let period = hz_to_period(self.frequency).ok_or_else(|| {
            anyhow::anyhow!("frequency {} Hz is above 1 THz", self.frequency)
        })?;
        let blinky = Blinky::new(self.frequency)?;

        let mut emit = |cycle: u64, led: Bit, count: u128| {
            writeln!(out, "{}", format_line(cycle, period, led, count))
                .context("failed to write simulation output")
        };

        if self.netlist {
            let netlist = back::elaborate(&blinky, back::TOP, None)?;
            let mut sim = Simulator::new(&netlist[netlist.top()?])?;
            sim.set_input("rst", 0_u128)?;

            for _ in 0 .. self.cycles {
                let led = sim.peek("led")?.val() != 0;
                let count = sim.peek("count")?.val();
                emit(sim.cycle(), led.into(), count)?;
                sim.step();
            }
        } else {
            let mut values = blinky.simulate();
            for cycle in 0 .. self.cycles {
                let (led, count) = values.next_cycle();
                emit(cycle, led, count.val())?;
            }
        }

        Ok(())
    }
}

impl Run for SimArgs {
    fn run(&self) -> anyhow::Result<()> {
        self.trace(io::stdout().lock())
    }
}
