use std::{
    borrow::Cow,
    io::{self, Write},
};

use fnv::FnvHashSet;

use super::{net_name, unconnected, Backend};
use crate::{
    buffer::Buffer,
    module::{Module, NodeId},
    netlist::{ModuleId, NetList},
    node::{BinOpNode, BitNot, Mux2, NetKind, NodeKind, NodeOutput, Polarity, SyncKind, DFF},
    visitor::{ParamKind, Visitor},
};

/// Verilog-2005 text back end.
pub struct Verilog;

struct VerilogWriter<'n, W> {
    buffer: Buffer<W>,
    locals: FnvHashSet<NodeId>,
    netlist: &'n NetList,
}

impl<'n, W: Write> VerilogWriter<'n, W> {
    fn new(netlist: &'n NetList, out: W) -> Self {
        Self {
            buffer: Buffer::new(out),
            locals: Default::default(),
            netlist,
        }
    }

    fn inject_input(module: &Module, node_id: NodeId) -> Cow<'static, str> {
        match module[node_id].as_const() {
            Some(value) => value.to_string().into(),
            None => net_name(module, node_id),
        }
    }

    fn write_local(&mut self, module: &Module, node_id: NodeId) -> io::Result<()> {
        let node = &module[node_id];
        if node.is_const() || !self.locals.insert(node_id) {
            return Ok(());
        }

        if !module.is_port(node_id) {
            self.buffer.write_tab()?;
            write_out(&mut self.buffer, node.output())?;
            self.buffer
                .write_fmt(format_args!(" {};\n", net_name(module, node_id)))?;
        }

        if let Some(init) = node
            .as_dff()
            .and_then(|dff| module[dff.inputs.rst_val].as_const())
        {
            let sym = net_name(module, node_id);
            self.buffer.write_template(format_args!(
                "
initial begin
    {sym} = {init};
end
"
            ))?;
        }

        Ok(())
    }
}

impl Backend for Verilog {
    const EXT: &'static str = "v";

    fn write<W: Write>(netlist: &NetList, out: W) -> io::Result<W> {
        let mut verilog = VerilogWriter::new(netlist, out);
        verilog.visit_modules()?;
        verilog.buffer.flush()?;

        Ok(verilog.buffer.into_inner())
    }
}

fn write_param<W: Write>(
    module: &Module,
    buffer: &mut Buffer<W>,
    node_id: NodeId,
    kind: ParamKind,
) -> io::Result<()> {
    buffer.write_str(match kind {
        ParamKind::Input => "input ",
        ParamKind::Output => "output ",
    })?;
    write_out(buffer, module[node_id].output())?;
    buffer.write_fmt(format_args!(" {}", net_name(module, node_id)))
}

fn write_out<W: Write>(buffer: &mut Buffer<W>, out: &NodeOutput) -> io::Result<()> {
    match out.kind {
        NetKind::Wire => buffer.write_str("wire")?,
        NetKind::Reg => buffer.write_str("reg")?,
    };

    if out.width() > 1 {
        buffer.write_fmt(format_args!(" [{}:0]", out.width() - 1))?;
    }

    Ok(())
}

const SEP: &str = ",\n";

impl<'n, W: Write> Visitor for VerilogWriter<'n, W> {
    fn visit_modules(&mut self) -> io::Result<()> {
        self.buffer
            .write_str("/* Automatically generated by blinky_netlist. */\n\n")?;

        for module_id in self.netlist.modules() {
            self.visit_module(module_id)?;
        }

        Ok(())
    }

    fn visit_module(&mut self, module_id: ModuleId) -> io::Result<()> {
        self.locals = Default::default();

        let netlist = self.netlist;
        let module = &netlist[module_id];

        self.buffer
            .write_fmt(format_args!("module {}\n(\n", module.name))?;

        let mut inputs = module.inputs().peekable();
        let mut has_inputs = false;
        self.buffer.push_tab();
        if inputs.peek().is_some() {
            has_inputs = true;
            self.buffer.write_tab()?;
            self.buffer.write_str("// Inputs\n")?;

            self.buffer.intersperse(SEP, inputs, |buffer, input| {
                buffer.write_tab()?;
                write_param(module, buffer, input, ParamKind::Input)
            })?;
        }

        let mut outputs = module.outputs().peekable();
        if outputs.peek().is_some() {
            if has_inputs {
                self.buffer.write_str(SEP)?;
            }
            self.buffer.write_tab()?;
            self.buffer.write_str("// Outputs\n")?;

            self.buffer.intersperse(SEP, outputs, |buffer, output| {
                buffer.write_tab()?;
                write_param(module, buffer, output, ParamKind::Output)
            })?;
        }
        self.buffer.pop_tab();

        self.buffer.write_str("\n);\n")?;
        self.buffer.write_eol()?;

        self.buffer.push_tab();
        for (node_id, _) in module.nodes() {
            self.write_local(module, node_id)?;
        }
        self.buffer.write_eol()?;
        for (node_id, _) in module.nodes() {
            self.visit_node(module, node_id)?;
        }
        self.buffer.pop_tab();

        self.buffer.write_str("endmodule\n")
    }

    fn visit_node(&mut self, module: &Module, node_id: NodeId) -> io::Result<()> {
        let output = net_name(module, node_id);

        match &module[node_id] {
            NodeKind::Input(_) | NodeKind::Const(_) => Ok(()),
            NodeKind::BinOp(BinOpNode {
                bin_op,
                inputs: (left, right),
                ..
            }) => {
                let left = Self::inject_input(module, *left);
                let right = Self::inject_input(module, *right);

                self.buffer.write_template(format_args!(
                    "assign {output} = {left} {bin_op} {right};"
                ))
            }
            NodeKind::BitNot(BitNot { input, .. }) => {
                let input = Self::inject_input(module, *input);

                self.buffer
                    .write_template(format_args!("assign {output} = ~{input};"))
            }
            NodeKind::Mux2(Mux2 { inputs, .. }) => {
                let sel = Self::inject_input(module, inputs.sel);
                let on_true = Self::inject_input(module, inputs.on_true);
                let on_false = Self::inject_input(module, inputs.on_false);

                self.buffer.write_template(format_args!(
                    "assign {output} = {sel} ? {on_true} : {on_false};"
                ))
            }
            NodeKind::DFF(DFF {
                inputs,
                rst_kind,
                rst_pol,
                ..
            }) => {
                let data = inputs.data.ok_or_else(|| unconnected(module, node_id))?;
                let clk = Self::inject_input(module, inputs.clk);
                let rst = Self::inject_input(module, inputs.rst);
                let rst_val = Self::inject_input(module, inputs.rst_val);
                let data = Self::inject_input(module, data);
                let cond = match rst_pol {
                    Polarity::ActiveHigh => rst.clone(),
                    Polarity::ActiveLow => format!("!{rst}").into(),
                };
                let sensitivity = match rst_kind {
                    SyncKind::Sync => format!("posedge {clk}"),
                    SyncKind::Async => format!("posedge {clk} or {rst_pol} {rst}"),
                };

                self.buffer.write_template(format_args!(
                    "
always @({sensitivity}) begin
    if ({cond})
        {output} <= {rst_val};
    else
        {output} <= {data};
end
"
                ))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{const_val::ConstVal, node::BinOp, sig_ty::NodeTy};

    #[test]
    fn generates_counter() {
        let mut module = Module::new("counter");
        let clk = module.add_input("clk", NodeTy::Clock).unwrap();
        let rst = module.add_input("rst", NodeTy::Bit).unwrap();
        let zero = module.add_const(ConstVal::zero(2));
        let one = module.add_const(ConstVal::new(1, 2));
        let count = module
            .add_dff(
                "count",
                NodeTy::Unsigned(2),
                clk,
                rst,
                zero,
                SyncKind::Sync,
                Polarity::ActiveHigh,
            )
            .unwrap();
        let inc = module.add_bin_op(BinOp::Add, count, one).unwrap();
        module.connect_dff(count, inc).unwrap();
        module.add_output(count, "value").unwrap();

        let mut netlist = NetList::with_top(module);
        netlist.run_stages().unwrap();

        assert_eq!(
            Verilog::generate(&netlist).unwrap(),
            "/* Automatically generated by blinky_netlist. */

module counter
(
    // Inputs
    input wire clk,
    input wire rst,
    // Outputs
    output reg [1:0] value
);

    initial begin
        value = 2'd0;
    end
    wire [1:0] add$5;

    always @(posedge clk) begin
        if (rst)
            value <= 2'd0;
        else
            value <= add$5;
    end
    assign add$5 = value + 2'd1;
endmodule
"
        );
    }

    #[test]
    fn async_active_low_reset() {
        let mut module = Module::new("toggle");
        let clk = module.add_input("clk", NodeTy::Clock).unwrap();
        let rst = module.add_input("rst_n", NodeTy::Bit).unwrap();
        let init = module.add_const(ConstVal::from(false));
        let q = module
            .add_dff(
                "q",
                NodeTy::Bit,
                clk,
                rst,
                init,
                SyncKind::Async,
                Polarity::ActiveLow,
            )
            .unwrap();
        let not = module.add_bit_not(q).unwrap();
        module.connect_dff(q, not).unwrap();
        module.add_output(q, "q").unwrap();

        let mut netlist = NetList::with_top(module);
        netlist.run_stages().unwrap();
        let text = Verilog::generate(&netlist).unwrap();

        assert!(text.contains("    always @(posedge clk or negedge rst_n) begin\n"));
        assert!(text.contains("        if (!rst_n)\n"));
        assert!(text.contains("    assign bit_not$4 = ~q;\n"));
    }
}
