mod dump;
mod set_names;

use std::io;

pub use dump::Dump;
pub use set_names::SetNames;

use crate::{
    module::{Module, NodeId},
    netlist::ModuleId,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamKind {
    Input,
    Output,
}

pub trait Visitor {
    fn visit_modules(&mut self) -> io::Result<()>;

    fn visit_module(&mut self, module_id: ModuleId) -> io::Result<()>;

    fn visit_node(&mut self, module: &Module, node_id: NodeId) -> io::Result<()>;
}
