use super::{IsNode, NodeOutput};
use crate::{sig_ty::NodeTy, symbol::Symbol};

#[derive(Debug, Clone, Copy)]
pub struct Input {
    pub output: NodeOutput,
}

impl Input {
    pub fn new(ty: NodeTy, sym: Symbol) -> Self {
        Self {
            output: NodeOutput::wire(ty, Some(sym)),
        }
    }
}

impl IsNode for Input {
    type Inputs = ();

    fn inputs(&self) -> &Self::Inputs {
        &()
    }

    fn output(&self) -> &NodeOutput {
        &self.output
    }

    fn output_mut(&mut self) -> &mut NodeOutput {
        &mut self.output
    }
}
