use super::{Inputs, IsNode, NodeOutput};
use crate::{module::NodeId, sig_ty::NodeTy};

/// Two-way multiplexer: `sel ? on_true : on_false`.
#[derive(Debug, Clone, Copy)]
pub struct Mux2 {
    pub inputs: Mux2Inputs,
    pub output: NodeOutput,
}

#[derive(Debug, Clone, Copy)]
pub struct Mux2Inputs {
    pub sel: NodeId,
    pub on_true: NodeId,
    pub on_false: NodeId,
}

impl Mux2 {
    pub fn new(ty: NodeTy, sel: NodeId, on_true: NodeId, on_false: NodeId) -> Self {
        Self {
            inputs: Mux2Inputs {
                sel,
                on_true,
                on_false,
            },
            output: NodeOutput::wire(ty, None),
        }
    }
}

impl Inputs for Mux2Inputs {
    fn items(&self) -> impl Iterator<Item = NodeId> + '_ {
        [self.sel, self.on_true, self.on_false].into_iter()
    }

    fn len(&self) -> usize {
        3
    }
}

impl IsNode for Mux2 {
    type Inputs = Mux2Inputs;

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
