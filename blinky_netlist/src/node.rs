mod bin_op;
mod bit_not;
mod cons;
mod dff;
mod input;
mod mux2;

use smallvec::SmallVec;
use strum::IntoStaticStr;

pub use self::{
    bin_op::{BinOp, BinOpNode},
    bit_not::BitNot,
    cons::Const,
    dff::{DFFInputs, Polarity, SyncKind, DFF},
    input::Input,
    mux2::{Mux2, Mux2Inputs},
};
use crate::{const_val::ConstVal, module::NodeId, sig_ty::NodeTy, symbol::Symbol};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NetKind {
    Wire,
    Reg,
}

#[derive(Debug, Clone, Copy)]
pub struct NodeOutput {
    pub ty: NodeTy,
    pub sym: Option<Symbol>,
    pub kind: NetKind,
    /// Name was generated by the netlist rather than given by the user.
    pub internal: bool,
}

impl NodeOutput {
    pub fn wire(ty: NodeTy, sym: Option<Symbol>) -> Self {
        Self::new(ty, sym, NetKind::Wire)
    }

    pub fn reg(ty: NodeTy, sym: Option<Symbol>) -> Self {
        Self::new(ty, sym, NetKind::Reg)
    }

    fn new(ty: NodeTy, sym: Option<Symbol>, kind: NetKind) -> Self {
        Self {
            ty,
            sym,
            kind,
            internal: false,
        }
    }

    #[inline(always)]
    pub fn width(&self) -> u128 {
        self.ty.width()
    }
}

pub trait Inputs {
    fn items(&self) -> impl Iterator<Item = NodeId> + '_;

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Inputs for () {
    fn items(&self) -> impl Iterator<Item = NodeId> + '_ {
        std::iter::empty()
    }

    fn len(&self) -> usize {
        0
    }
}

impl Inputs for NodeId {
    fn items(&self) -> impl Iterator<Item = NodeId> + '_ {
        std::iter::once(*self)
    }

    fn len(&self) -> usize {
        1
    }
}

impl Inputs for (NodeId, NodeId) {
    fn items(&self) -> impl Iterator<Item = NodeId> + '_ {
        [self.0, self.1].into_iter()
    }

    fn len(&self) -> usize {
        2
    }
}

pub trait IsNode: Into<NodeKind> {
    type Inputs: Inputs;

    fn inputs(&self) -> &Self::Inputs;

    fn output(&self) -> &NodeOutput;

    fn output_mut(&mut self) -> &mut NodeOutput;
}

macro_rules! define_nodes {
    (
        $( $kind:ident => $node:ident ),+ $(,)?
    ) => {
        #[derive(Debug, Clone, IntoStaticStr)]
        #[strum(serialize_all = "snake_case")]
        pub enum NodeKind {
            $( $kind($node), )+
        }

        $(
            impl From<$node> for NodeKind {
                fn from(node: $node) -> Self {
                    Self::$kind(node)
                }
            }
        )+

        impl NodeKind {
            pub fn inputs(&self) -> SmallVec<[NodeId; 4]> {
                match self {
                    $( Self::$kind(node) => node.inputs().items().collect(), )+
                }
            }

            pub fn output(&self) -> &NodeOutput {
                match self {
                    $( Self::$kind(node) => node.output(), )+
                }
            }

            pub fn output_mut(&mut self) -> &mut NodeOutput {
                match self {
                    $( Self::$kind(node) => node.output_mut(), )+
                }
            }
        }
    };
}

define_nodes!(
    Input => Input,
    Const => Const,
    BinOp => BinOpNode,
    BitNot => BitNot,
    Mux2 => Mux2,
    DFF => DFF,
);

impl NodeKind {
    /// Short name used for generated wire names.
    pub fn name(&self) -> &'static str {
        match self {
            Self::BinOp(node) => node.bin_op.name(),
            _ => self.into(),
        }
    }

    #[inline]
    pub fn is_input(&self) -> bool {
        matches!(self, Self::Input(_))
    }

    #[inline]
    pub fn is_const(&self) -> bool {
        matches!(self, Self::Const(_))
    }

    #[inline]
    pub fn is_dff(&self) -> bool {
        matches!(self, Self::DFF(_))
    }

    pub fn as_const(&self) -> Option<ConstVal> {
        match self {
            Self::Const(node) => Some(node.value),
            _ => None,
        }
    }

    pub fn as_dff(&self) -> Option<&DFF> {
        match self {
            Self::DFF(node) => Some(node),
            _ => None,
        }
    }

    pub fn as_dff_mut(&mut self) -> Option<&mut DFF> {
        match self {
            Self::DFF(node) => Some(node),
            _ => None,
        }
    }

    #[inline]
    pub fn width(&self) -> u128 {
        self.output().width()
    }
}
