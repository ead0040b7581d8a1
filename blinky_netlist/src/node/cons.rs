use super::{IsNode, NodeOutput};
use crate::{const_val::ConstVal, sig_ty::NodeTy};

#[derive(Debug, Clone, Copy)]
pub struct Const {
    pub value: ConstVal,
    pub output: NodeOutput,
}

impl Const {
    pub fn new(value: ConstVal) -> Self {
        let ty = if value.width() == 1 {
            NodeTy::Bit
        } else {
            NodeTy::Unsigned(value.width())
        };

        Self {
            value,
            output: NodeOutput::wire(ty, None),
        }
    }
}

impl IsNode for Const {
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
