//! Cycle based evaluation of a single module.
//!
//! Every call to [`Simulator::step`] is one rising edge of the (single) clock.
//! Clock inputs are ignored, all other inputs keep the value last set with
//! [`Simulator::set_input`].

use tracing::debug;

use crate::{
    const_val::ConstVal,
    error::{Error, Result},
    index::IndexType,
    module::{Module, NodeId},
    node::{BinOp, BinOpNode, BitNot, Mux2, NodeKind, SyncKind, DFF},
    sig_ty::NodeTy,
};

pub struct Simulator<'m> {
    module: &'m Module,
    values: Vec<ConstVal>,
    state: Vec<ConstVal>,
    cycle: u64,
}

impl<'m> Simulator<'m> {
    pub fn new(module: &'m Module) -> Result<Self> {
        module.validate()?;

        let values = module
            .nodes()
            .map(|(_, node)| ConstVal::zero(node.width()))
            .collect::<Vec<_>>();
        let state = values.clone();

        let mut sim = Self {
            module,
            values,
            state,
            cycle: 0,
        };
        sim.power_on();

        Ok(sim)
    }

    /// Loads constant reset values into the registers and settles the logic.
    fn power_on(&mut self) {
        for (node_id, node) in self.module.nodes() {
            if let Some(dff) = node.as_dff() {
                if let Some(init) = self.module[dff.inputs.rst_val].as_const() {
                    self.state[node_id.as_usize()] = init;
                }
            }
        }
        self.settle();
    }

    #[inline]
    pub fn cycle(&self) -> u64 {
        self.cycle
    }

    pub fn set_input(&mut self, name: &str, value: impl Into<u128>) -> Result<()> {
        let node_id = self
            .module
            .find_port(name)
            .filter(|node_id| self.module.is_input(*node_id))
            .ok_or_else(|| Error::MissingPort(name.to_string()))?;

        let width = self.module[node_id].width();
        self.state[node_id.as_usize()] = ConstVal::new(value.into(), width);
        self.settle();

        Ok(())
    }

    /// Current value of any named net.
    pub fn peek(&self, name: &str) -> Result<ConstVal> {
        self.module
            .find(name)
            .map(|node_id| self.values[node_id.as_usize()])
            .ok_or_else(|| Error::MissingPort(name.to_string()))
    }

    #[inline]
    fn value(&self, node_id: NodeId) -> ConstVal {
        self.values[node_id.as_usize()]
    }

    fn rst_active(&self, dff: &DFF) -> bool {
        dff.rst_pol.bool(self.value(dff.inputs.rst).val() != 0)
    }

    /// Evaluates combinational logic from the current register state.
    fn settle(&mut self) {
        let module = self.module;

        for (node_id, node) in module.nodes() {
            let idx = node_id.as_usize();
            let value = match node {
                NodeKind::Input(input) => match input.output.ty {
                    NodeTy::Clock => ConstVal::from(false),
                    _ => self.state[idx],
                },
                NodeKind::Const(cons) => cons.value,
                NodeKind::BinOp(BinOpNode {
                    bin_op,
                    inputs: (lhs, rhs),
                    ..
                }) => {
                    let lhs = self.value(*lhs);
                    let rhs = self.value(*rhs);
                    match bin_op {
                        BinOp::Add => lhs + rhs,
                        BinOp::Eq => lhs.eq_bit(rhs),
                    }
                }
                NodeKind::BitNot(BitNot { input, .. }) => !self.value(*input),
                NodeKind::Mux2(Mux2 { inputs, .. }) => {
                    if self.value(inputs.sel).val() != 0 {
                        self.value(inputs.on_true)
                    } else {
                        self.value(inputs.on_false)
                    }
                }
                // Register outputs only depend on state and, for an
                // asynchronous reset, on the reset input created before them.
                NodeKind::DFF(dff) => match module[dff.inputs.rst_val].as_const() {
                    Some(rst_val)
                        if dff.rst_kind == SyncKind::Async && self.rst_active(dff) =>
                    {
                        rst_val
                    }
                    _ => self.state[idx],
                },
            };
            self.values[idx] = value;
        }
    }

    /// One rising clock edge.
    pub fn step(&mut self) {
        let module = self.module;

        for (node_id, node) in module.nodes() {
            if let NodeKind::DFF(dff) = node {
                let next = if self.rst_active(dff) {
                    self.value(dff.inputs.rst_val)
                } else {
                    // `validate` guarantees the data input is connected.
                    dff.inputs
                        .data
                        .map(|data| self.value(data))
                        .unwrap_or(self.state[node_id.as_usize()])
                };
                self.state[node_id.as_usize()] = next;
            }
        }

        self.cycle += 1;
        self.settle();
        debug!("cycle {}", self.cycle);
    }

    pub fn run(&mut self, cycles: u64) {
        for _ in 0 .. cycles {
            self.step();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node::Polarity;

    fn counter(rst_kind: SyncKind) -> Module {
        let mut module = Module::new("counter");
        let clk = module.add_input("clk", NodeTy::Clock).unwrap();
        let rst = module.add_input("rst", NodeTy::Bit).unwrap();
        let zero = module.add_const(ConstVal::zero(2));
        let one = module.add_const(ConstVal::new(1, 2));
        let count = module
            .add_dff(
                "count",
                NodeTy::Unsigned(2),
                clk,
                rst,
                zero,
                rst_kind,
                Polarity::ActiveHigh,
            )
            .unwrap();
        let inc = module.add_bin_op(BinOp::Add, count, one).unwrap();
        module.connect_dff(count, inc).unwrap();
        module.add_output(count, "value").unwrap();
        module
    }

    fn take(sim: &mut Simulator<'_>, n: usize) -> Vec<u128> {
        (0 .. n)
            .map(|_| {
                let value = sim.peek("value").unwrap().val();
                sim.step();
                value
            })
            .collect()
    }

    #[test]
    fn sync_reset() {
        let module = counter(SyncKind::Sync);
        let mut sim = Simulator::new(&module).unwrap();

        assert_eq!(take(&mut sim, 6), [0, 1, 2, 3, 0, 1]);

        sim.set_input("rst", 1_u8).unwrap();
        // reset is only sampled on the clock edge
        assert_eq!(take(&mut sim, 3), [2, 0, 0]);

        sim.set_input("rst", 0_u8).unwrap();
        assert_eq!(take(&mut sim, 3), [0, 1, 2]);
    }

    #[test]
    fn async_reset() {
        let module = counter(SyncKind::Async);
        let mut sim = Simulator::new(&module).unwrap();

        assert_eq!(take(&mut sim, 3), [0, 1, 2]);

        sim.set_input("rst", 1_u8).unwrap();
        assert_eq!(take(&mut sim, 2), [0, 0]);

        sim.set_input("rst", 0_u8).unwrap();
        assert_eq!(take(&mut sim, 3), [0, 1, 2]);
    }

    #[test]
    fn unknown_port() {
        let module = counter(SyncKind::Sync);
        let mut sim = Simulator::new(&module).unwrap();

        assert!(matches!(
            sim.set_input("value", 1_u8),
            Err(Error::MissingPort(_))
        ));
        assert!(sim.peek("missing").is_err());
    }
}
