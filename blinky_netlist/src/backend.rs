mod rtlil;
mod verilog;

use std::{borrow::Cow, io, io::Write};

pub use rtlil::Rtlil;
pub use verilog::Verilog;

use crate::{
    error::Result,
    module::{Module, NodeId},
    netlist::NetList,
};

pub trait Backend {
    /// Extension of the generated file.
    const EXT: &'static str;

    fn write<W: Write>(netlist: &NetList, out: W) -> io::Result<W>;

    fn generate(netlist: &NetList) -> Result<String> {
        let buf = Self::write(netlist, Vec::new())?;
        let text = String::from_utf8(buf)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;

        Ok(text)
    }
}

/// Name of the net driven by `node_id`, before any back end specific escaping.
pub(crate) fn net_name(module: &Module, node_id: NodeId) -> Cow<'static, str> {
    let node = &module[node_id];
    match node.output().sym {
        Some(sym) => sym.as_str().into(),
        None => format!("{}${}", node.name(), node_id).into(),
    }
}

pub(crate) fn unconnected(module: &Module, node_id: NodeId) -> io::Error {
    io::Error::new(
        io::ErrorKind::InvalidInput,
        format!(
            "register '{}' in module '{}' has no data input",
            net_name(module, node_id),
            module.name
        ),
    )
}
