use std::{
    env,
    fmt::{self, Write},
    io,
};

use crate::{
    module::Module,
    netlist::NetList,
    node::{BinOpNode, BitNot, Const, Mux2, NodeKind, DFF},
    LOG_ENV_VAR,
};

/// Human readable listing of a netlist, used for debugging.
pub struct Dump<'n> {
    netlist: &'n NetList,
}

impl<'n> Dump<'n> {
    pub fn new(netlist: &'n NetList) -> Self {
        Self { netlist }
    }

    /// Logs the dump when logging is configured, otherwise writes it to `out`.
    pub fn run(&self, mut out: impl io::Write) -> io::Result<()> {
        let text = self.to_text();
        if env::var(LOG_ENV_VAR).is_ok() {
            tracing::info!("Netlist:\n{}", text);
            Ok(())
        } else {
            out.write_all(format!("Netlist:\n{text}\n").as_bytes())
        }
    }

    pub fn to_text(&self) -> String {
        let mut buf = String::new();
        for module_id in self.netlist.modules() {
            // Writing into a String cannot fail.
            let _ = self.visit_module(&mut buf, &self.netlist[module_id]);
        }

        buf
    }

    fn visit_module(&self, buf: &mut impl Write, module: &Module) -> fmt::Result {
        writeln!(
            buf,
            "module {}{}",
            module.name,
            if module.is_top { " (top)" } else { "" }
        )?;

        for (node_id, node) in module.nodes() {
            let out = node.output();
            let name = out.sym.map(|sym| sym.as_str()).unwrap_or("_");
            write!(buf, "{:>4}    {} {}: {:?}", node_id, node.name(), name, out.ty)?;

            match node {
                NodeKind::Input(_) => {}
                NodeKind::Const(Const { value, .. }) => write!(buf, " = {value}")?,
                NodeKind::BinOp(BinOpNode {
                    bin_op,
                    inputs: (lhs, rhs),
                    ..
                }) => write!(buf, " = {lhs} {bin_op} {rhs}")?,
                NodeKind::BitNot(BitNot { input, .. }) => write!(buf, " = ~{input}")?,
                NodeKind::Mux2(Mux2 { inputs, .. }) => write!(
                    buf,
                    " = {} ? {} : {}",
                    inputs.sel, inputs.on_true, inputs.on_false
                )?,
                NodeKind::DFF(DFF {
                    inputs,
                    rst_kind,
                    rst_pol,
                    ..
                }) => {
                    write!(
                        buf,
                        " <= clk {} rst {} ({:?}, {:?}) init {} data ",
                        inputs.clk, inputs.rst, rst_kind, rst_pol, inputs.rst_val
                    )?;
                    match inputs.data {
                        Some(data) => write!(buf, "{data}")?,
                        None => buf.write_str("_")?,
                    }
                }
            }

            if module.is_input(node_id) {
                buf.write_str(" [input]")?;
            } else if module.is_output(node_id) {
                buf.write_str(" [output]")?;
            }
            writeln!(buf)?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{const_val::ConstVal, sig_ty::NodeTy};

    #[test]
    fn dumps_nodes() {
        let mut module = Module::new("inv");
        let a = module.add_input("a", NodeTy::Bit).unwrap();
        let not = module.add_bit_not(a).unwrap();
        module.add_output(not, "y").unwrap();
        module.add_const(ConstVal::from(true));

        let netlist = NetList::with_top(module);
        let text = Dump::new(&netlist).to_text();

        assert_eq!(
            text,
            "module inv (top)\n   0    input a: bit [input]\n   1    bit_not y: bit = ~0 [output]\n   2    const _: bit = 1'd1\n"
        );
    }

    #[test]
    fn prints_without_log_filter() {
        if env::var(LOG_ENV_VAR).is_ok() {
            return;
        }

        let mut module = Module::new("buf");
        let a = module.add_input("a", NodeTy::Bit).unwrap();
        let not = module.add_bit_not(a).unwrap();
        module.add_output(not, "y").unwrap();

        let netlist = NetList::with_top(module);
        let dump = Dump::new(&netlist);
        let mut out = Vec::new();
        dump.run(&mut out).unwrap();

        assert_eq!(
            String::from_utf8(out).unwrap(),
            format!("Netlist:\n{}\n", dump.to_text())
        );
    }
}
