use std::ops::Index;

use tracing::debug;

use crate::{
    const_val::ConstVal,
    error::{Error, Result},
    index::IndexType,
    node::{
        BinOp, BinOpNode, BitNot, Const, Input, Mux2, NodeKind, Polarity, SyncKind, DFF,
    },
    sig_ty::NodeTy,
    symbol::Symbol,
    FxIndexSet,
};

crate::idx_ty!(NodeId);

/// A flat module: nodes are stored in creation order, so every combinational
/// node only refers to nodes created before it. Registers are the only nodes
/// whose (data) input may point forward.
#[derive(Debug, Clone)]
pub struct Module {
    pub name: Symbol,
    pub is_top: bool,
    nodes: Vec<NodeKind>,
    inputs: FxIndexSet<NodeId>,
    outputs: FxIndexSet<NodeId>,
}

impl Index<NodeId> for Module {
    type Output = NodeKind;

    #[inline]
    fn index(&self, node_id: NodeId) -> &Self::Output {
        &self.nodes[node_id.as_usize()]
    }
}

impl Module {
    pub fn new(name: impl AsRef<str>) -> Self {
        Self {
            name: Symbol::intern(name),
            is_top: false,
            nodes: Vec::new(),
            inputs: Default::default(),
            outputs: Default::default(),
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn node(&self, node_id: NodeId) -> Result<&NodeKind> {
        self.nodes
            .get(node_id.as_usize())
            .ok_or(Error::MissingNode {
                node: node_id,
                module: self.name,
            })
    }

    pub(crate) fn node_mut(&mut self, node_id: NodeId) -> Result<&mut NodeKind> {
        let module = self.name;
        self.nodes
            .get_mut(node_id.as_usize())
            .ok_or(Error::MissingNode {
                node: node_id,
                module,
            })
    }

    pub fn nodes(&self) -> impl DoubleEndedIterator<Item = (NodeId, &NodeKind)> + '_ {
        self.nodes
            .iter()
            .enumerate()
            .map(|(idx, node)| (NodeId::from_usize(idx), node))
    }

    pub fn inputs(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.inputs.iter().copied()
    }

    pub fn outputs(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.outputs.iter().copied()
    }

    /// Ports in declaration order: inputs first, then outputs.
    pub fn ports(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.inputs().chain(self.outputs())
    }

    #[inline]
    pub fn is_input(&self, node_id: NodeId) -> bool {
        self.inputs.contains(&node_id)
    }

    #[inline]
    pub fn is_output(&self, node_id: NodeId) -> bool {
        self.outputs.contains(&node_id)
    }

    #[inline]
    pub fn is_port(&self, node_id: NodeId) -> bool {
        self.is_input(node_id) || self.is_output(node_id)
    }

    pub fn find_port(&self, name: &str) -> Option<NodeId> {
        self.ports().find(|node_id| {
            self[*node_id]
                .output()
                .sym
                .is_some_and(|sym| sym.as_str() == name)
        })
    }

    /// Any named node (port, register or named wire).
    pub fn find(&self, name: &str) -> Option<NodeId> {
        self.find_port(name).or_else(|| {
            self.nodes()
                .find(|(_, node)| {
                    node.output().sym.is_some_and(|sym| sym.as_str() == name)
                })
                .map(|(node_id, _)| node_id)
        })
    }

    pub fn width(&self, node_id: NodeId) -> Result<u128> {
        self.node(node_id).map(|node| node.width())
    }

    fn add_node(&mut self, node: impl Into<NodeKind>) -> NodeId {
        let node_id = NodeId::from_usize(self.nodes.len());
        self.nodes.push(node.into());
        node_id
    }

    fn ensure_width(&self, what: &'static str, node_id: NodeId, expected: u128) -> Result<()> {
        let found = self.width(node_id)?;
        if found != expected {
            return Err(Error::WidthMismatch {
                what,
                expected,
                found,
            });
        }

        Ok(())
    }

    fn port_name(&self, name: impl AsRef<str>) -> Result<Symbol> {
        let sym = Symbol::intern(name);
        if self.find_port(sym.as_str()).is_some() {
            return Err(Error::DuplicatePort(sym));
        }

        Ok(sym)
    }

    pub fn add_input(&mut self, name: impl AsRef<str>, ty: NodeTy) -> Result<NodeId> {
        let sym = self.port_name(name)?;
        let node_id = self.add_node(Input::new(ty, sym));
        self.inputs.insert(node_id);

        Ok(node_id)
    }

    pub fn add_const(&mut self, value: ConstVal) -> NodeId {
        self.add_node(Const::new(value))
    }

    pub fn add_bin_op(&mut self, bin_op: BinOp, lhs: NodeId, rhs: NodeId) -> Result<NodeId> {
        let ty = self.node(lhs)?.output().ty;
        self.ensure_width("binary operand", rhs, ty.width())?;

        Ok(self.add_node(BinOpNode::new(bin_op.output_ty(ty), bin_op, lhs, rhs)))
    }

    pub fn add_bit_not(&mut self, input: NodeId) -> Result<NodeId> {
        let ty = self.node(input)?.output().ty;

        Ok(self.add_node(BitNot::new(ty, input)))
    }

    pub fn add_mux2(
        &mut self,
        sel: NodeId,
        on_true: NodeId,
        on_false: NodeId,
    ) -> Result<NodeId> {
        self.ensure_width("mux selector", sel, 1)?;
        let ty = self.node(on_true)?.output().ty;
        self.ensure_width("mux input", on_false, ty.width())?;

        Ok(self.add_node(Mux2::new(ty, sel, on_true, on_false)))
    }

    /// Adds a register whose data input is connected later with
    /// [`Module::connect_dff`].
    #[allow(clippy::too_many_arguments)]
    pub fn add_dff(
        &mut self,
        name: impl AsRef<str>,
        ty: NodeTy,
        clk: NodeId,
        rst: NodeId,
        rst_val: NodeId,
        rst_kind: SyncKind,
        rst_pol: Polarity,
    ) -> Result<NodeId> {
        let sym = Symbol::intern(name);
        self.ensure_width("clock", clk, 1)?;
        self.ensure_width("reset", rst, 1)?;
        self.ensure_width("reset value", rst_val, ty.width())?;
        if rst_kind == SyncKind::Async && !self[rst_val].is_const() {
            return Err(Error::NonConstResetValue(sym.to_string()));
        }

        Ok(self.add_node(DFF::new(ty, clk, rst, rst_val, rst_kind, rst_pol, sym)))
    }

    pub fn connect_dff(&mut self, dff: NodeId, data: NodeId) -> Result<()> {
        let width = self.width(dff)?;
        self.ensure_width("register data", data, width)?;

        let node = self.node_mut(dff)?;
        let sym = node.output().sym;
        let dff_node = node.as_dff_mut().ok_or(Error::NotDff(dff))?;
        if dff_node.inputs.data.is_some() {
            return Err(Error::AlreadyConnected(sym.map(|s| s.to_string()).unwrap_or_default()));
        }
        dff_node.inputs.data = Some(data);

        Ok(())
    }

    /// Exposes `node_id` as an output port named `name`.
    pub fn add_output(&mut self, node_id: NodeId, name: impl AsRef<str>) -> Result<()> {
        let sym = self.port_name(name)?;
        if self.is_port(node_id) || self.node(node_id)?.is_const() {
            return Err(Error::DuplicatePort(sym));
        }

        let output = self.node_mut(node_id)?.output_mut();
        output.sym = Some(sym);
        output.internal = false;
        self.outputs.insert(node_id);

        Ok(())
    }

    pub(crate) fn nodes_mut(&mut self) -> impl Iterator<Item = (NodeId, &mut NodeKind)> + '_ {
        self.nodes
            .iter_mut()
            .enumerate()
            .map(|(idx, node)| (NodeId::from_usize(idx), node))
    }

    /// Checks that every register has its data input connected.
    pub fn validate(&self) -> Result<()> {
        for (node_id, node) in self.nodes() {
            if let Some(dff) = node.as_dff() {
                if dff.inputs.data.is_none() {
                    let name = node
                        .output()
                        .sym
                        .map(|sym| sym.to_string())
                        .unwrap_or_else(|| node_id.to_string());
                    return Err(Error::UnconnectedDff(name));
                }
            }
        }

        debug!(
            "module '{}' is valid ({} nodes, {} ports)",
            self.name,
            self.len(),
            self.ports().count()
        );

        Ok(())
    }
}
