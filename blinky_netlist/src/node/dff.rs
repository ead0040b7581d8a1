use std::fmt::{self, Display};

use either::Either;

use super::{Inputs, IsNode, NodeOutput};
use crate::{module::NodeId, sig_ty::NodeTy, symbol::Symbol};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SyncKind {
    #[default]
    Sync,
    Async,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Polarity {
    #[default]
    ActiveHigh,
    ActiveLow,
}

impl Display for Polarity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::ActiveHigh => "posedge",
            Self::ActiveLow => "negedge",
        })
    }
}

impl Polarity {
    /// Whether a signal level means "asserted".
    pub fn bool(&self, b: bool) -> bool {
        match self {
            Self::ActiveHigh => b,
            Self::ActiveLow => !b,
        }
    }
}

/// D flip-flop clocked on the rising edge of `clk`.
#[derive(Debug, Clone, Copy)]
pub struct DFF {
    pub inputs: DFFInputs,
    pub rst_kind: SyncKind,
    pub rst_pol: Polarity,
    pub output: NodeOutput,
}

#[derive(Debug, Clone, Copy)]
pub struct DFFInputs {
    pub clk: NodeId,
    pub rst: NodeId,
    pub rst_val: NodeId,
    pub data: Option<NodeId>,
}

impl DFF {
    pub fn new(
        ty: NodeTy,
        clk: NodeId,
        rst: NodeId,
        rst_val: NodeId,
        rst_kind: SyncKind,
        rst_pol: Polarity,
        sym: Symbol,
    ) -> Self {
        Self {
            inputs: DFFInputs {
                clk,
                rst,
                rst_val,
                data: None,
            },
            rst_kind,
            rst_pol,
            output: NodeOutput::reg(ty, Some(sym)),
        }
    }
}

impl Inputs for DFFInputs {
    fn items(&self) -> impl Iterator<Item = NodeId> + '_ {
        match self.data {
            Some(data) => {
                Either::Left([self.clk, self.rst, self.rst_val, data].into_iter())
            }
            None => Either::Right([self.clk, self.rst, self.rst_val].into_iter()),
        }
    }

    fn len(&self) -> usize {
        match self.data {
            Some(_) => 4,
            None => 3,
        }
    }
}

impl IsNode for DFF {
    type Inputs = DFFInputs;

    fn inputs(&self) -> &Self::Inputs {
        &self.inputs
    }

    fn output(&self) -> &NodeOutput {
        &self.output
    }

    fn output_mut(&mut self) -> &mut NodeOutput {
        &mut self.output
    }
}
