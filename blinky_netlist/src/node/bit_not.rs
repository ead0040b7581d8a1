use super::{IsNode, NodeOutput};
use crate::{module::NodeId, sig_ty::NodeTy};

#[derive(Debug, Clone, Copy)]
pub struct BitNot {
    pub input: NodeId,
    pub output: NodeOutput,
}

impl BitNot {
    pub fn new(ty: NodeTy, input: NodeId) -> Self {
        Self {
            input,
            output: NodeOutput::wire(ty, None),
        }
    }
}

impl IsNode for BitNot {
    type Inputs = NodeId;

    fn inputs(&self) -> &Self::Inputs {
        &self.input
    }

    fn output(&self) -> &NodeOutput {
        &self.output
    }

    fn output_mut(&mut self) -> &mut NodeOutput {
        &mut self.output
    }
}
