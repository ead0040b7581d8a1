use blinky::{
    back,
    blinky::{Blinky, DEFAULT_FREQUENCY},
    prelude::*,
};
use blinky_netlist::sim::Simulator;
use proptest::prelude::*;

fn netlist_cycles(blinky: &Blinky, platform: Option<&Platform>, n: usize) -> Vec<(bool, u128)> {
    let netlist = back::elaborate(blinky, back::TOP, platform).unwrap();
    let module = &netlist[netlist.top().unwrap()];
    let mut sim = Simulator::new(module).unwrap();

    if platform.is_some_and(|p| p.has(Capability::ResetActiveLow)) {
        sim.set_input("rst", 1_u8).unwrap();
    }

    (0 .. n)
        .map(|_| {
            let value = (
                sim.peek("led").unwrap().val() != 0,
                sim.peek("count").unwrap().val(),
            );
            sim.step();
            value
        })
        .collect()
}

fn model_cycles(blinky: &Blinky, n: usize) -> Vec<(bool, u128)> {
    blinky
        .clone()
        .simulate()
        .take(n)
        .map(|(led, count)| (bool::from(led), u128::from(count)))
        .collect()
}

#[test]
fn netlist_matches_model() {
    for frequency in [2, 3, 4, 5, 6, 10, 17, 64] {
        let blinky = Blinky::new(frequency).unwrap();
        let n = 3 * frequency as usize;

        assert_eq!(
            netlist_cycles(&blinky, None, n),
            model_cycles(&blinky, n),
            "frequency = {frequency}"
        );
    }
}

#[test]
fn netlist_matches_model_on_every_platform() {
    let platforms = [
        Platform::new("async").with(Capability::AsyncReset),
        Platform::new("active-low").with(Capability::ResetActiveLow),
        Platform::new("both")
            .with(Capability::AsyncReset)
            .with(Capability::ResetActiveLow),
    ];

    let blinky = Blinky::new(8).unwrap();
    for platform in &platforms {
        assert_eq!(
            netlist_cycles(&blinky, Some(platform), 24),
            model_cycles(&blinky, 24),
            "platform = {}",
            platform.name
        );
    }
}

#[test]
fn netlist_reset() {
    let blinky = Blinky::new(6).unwrap();
    let netlist = back::elaborate(&blinky, back::TOP, None).unwrap();
    let module = &netlist[netlist.top().unwrap()];
    let mut sim = Simulator::new(module).unwrap();

    sim.run(4);
    assert_eq!(sim.peek("led").unwrap().val(), 1);
    assert_eq!(sim.peek("count").unwrap().val(), 1);

    sim.set_input("rst", 1_u8).unwrap();
    sim.step();
    assert_eq!(sim.peek("led").unwrap().val(), 0);
    assert_eq!(sim.peek("count").unwrap().val(), 0);

    sim.set_input("rst", 0_u8).unwrap();
    sim.run(3);
    assert_eq!(sim.peek("led").unwrap().val(), 1);
}

#[test]
fn default_rtlil() {
    let blinky = Blinky::new(DEFAULT_FREQUENCY).unwrap();
    let text = rtlil::convert(&blinky, None).unwrap();

    assert!(text.starts_with("# Automatically generated by blinky_netlist.\n"));
    assert!(text.contains("attribute \\top 1\nmodule \\top\n"));
    assert!(text.contains("  wire width 1 input 1 \\clk\n"));
    assert!(text.contains("  wire width 1 input 2 \\rst\n"));
    assert!(text.contains("  attribute \\init 1'0\n  wire width 1 output 3 \\led\n"));
    assert!(text.contains("  wire width 24 \\count\n"));
    // threshold 12_499_999 as a 24 bit literal
    assert!(text.contains("connect \\B 24'101111101011110000011111\n"));
    assert!(text.contains("cell $dff "));
    assert!(text.contains("cell $eq "));
    assert!(text.contains("cell $add "));
    assert!(text.contains("cell $not "));
    assert!(text.ends_with("end\n"));
}

#[test]
fn conversion_is_deterministic() {
    let first = rtlil::convert(&Blinky::new(DEFAULT_FREQUENCY).unwrap(), None).unwrap();
    let second = rtlil::convert(&Blinky::new(DEFAULT_FREQUENCY).unwrap(), None).unwrap();

    assert!(!first.is_empty());
    assert_eq!(first, second);

    let other = rtlil::convert(&Blinky::new(1_000).unwrap(), None).unwrap();
    assert_ne!(first, other);
}

#[test]
fn async_platform_rtlil() {
    let platform = Platform::new("board").with(Capability::AsyncReset);
    let text = rtlil::convert(&Blinky::new(4).unwrap(), Some(&platform)).unwrap();

    assert!(text.contains("cell $adff "));
    assert!(!text.contains("cell $dff "));
}

#[test]
fn verilog_output() {
    let text = verilog::convert(&Blinky::new(4).unwrap(), None).unwrap();

    assert!(text.contains("module top\n"));
    assert!(text.contains("    output reg led\n"));
    assert!(text.contains("    reg count;\n"));
    assert!(text.contains("    always @(posedge clk) begin\n"));
    assert!(text.ends_with("endmodule\n"));
}

proptest! {
    #[test]
    fn counter_visits_every_value(frequency in 2_u64 .. 2_000) {
        let blinky = Blinky::new(frequency).unwrap();
        let half = frequency / 2;

        let counts = blinky
            .simulate()
            .take(half as usize)
            .map(|(_, count)| u128::from(count))
            .collect::<Vec<_>>();

        prop_assert_eq!(counts, (0 .. half as u128).collect::<Vec<_>>());
    }

    #[test]
    fn led_toggles_once_per_half_period(frequency in 2_u64 .. 2_000) {
        let half = (frequency / 2) as usize;
        let leds = Blinky::new(frequency)
            .unwrap()
            .simulate()
            .take(4 * half + 1)
            .map(|(led, _)| bool::from(led))
            .collect::<Vec<_>>();

        for (cycle, led) in leds.iter().enumerate() {
            prop_assert_eq!(*led, (cycle / half) % 2 == 1);
        }
    }

    #[test]
    fn state_repeats_after_two_periods(frequency in 2_u64 .. 2_000) {
        // the period is `frequency` ticks, rounded down to an even number
        let period = 2 * (frequency / 2);
        let initial = Blinky::new(frequency).unwrap();
        let mut blinky = initial.clone();
        for _ in 0 .. 2 * period {
            blinky.tick();
        }

        prop_assert_eq!(blinky, initial);
    }
}
