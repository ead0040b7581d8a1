use std::fmt::{self, Display};

use super::{IsNode, NodeOutput};
use crate::{module::NodeId, sig_ty::NodeTy};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinOp {
    Add,
    Eq,
}

impl Display for BinOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Add => "+",
            Self::Eq => "==",
        })
    }
}

impl BinOp {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Add => "add",
            Self::Eq => "eq",
        }
    }

    pub fn output_ty(&self, operand: NodeTy) -> NodeTy {
        match self {
            Self::Add => operand,
            Self::Eq => NodeTy::Bit,
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct BinOpNode {
    pub bin_op: BinOp,
    pub inputs: (NodeId, NodeId),
    pub output: NodeOutput,
}

impl BinOpNode {
    pub fn new(ty: NodeTy, bin_op: BinOp, lhs: NodeId, rhs: NodeId) -> Self {
        Self {
            bin_op,
            inputs: (lhs, rhs),
            output: NodeOutput::wire(ty, None),
        }
    }
}

impl IsNode for BinOpNode {
    type Inputs = (NodeId, NodeId);

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
