use std::io::{self, Write};

use super::{net_name, unconnected, Backend};
use crate::{
    buffer::Buffer,
    const_val::ConstVal,
    module::{Module, NodeId},
    netlist::{ModuleId, NetList},
    node::{BinOp, BinOpNode, BitNot, Mux2, NodeKind, Polarity, SyncKind, DFF},
    visitor::Visitor,
};

/// Yosys RTLIL text back end.
pub struct Rtlil;

struct RtlilWriter<'n, W> {
    buffer: Buffer<W>,
    netlist: &'n NetList,
}

impl<'n, W: Write> RtlilWriter<'n, W> {
    pub fn new(netlist: &'n NetList, out: W) -> Self {
        Self {
            buffer: Buffer::with_indent(out, "  "),
            netlist,
        }
    }

    fn sig(module: &Module, node_id: NodeId) -> String {
        match module[node_id].as_const() {
            Some(value) => literal(value),
            None => ident(module, node_id),
        }
    }

    fn write_wire(
        &mut self,
        module: &Module,
        node_id: NodeId,
        port: Option<(&str, usize)>,
    ) -> io::Result<()> {
        let node = &module[node_id];
        if let Some(init) = node
            .as_dff()
            .and_then(|dff| module[dff.inputs.rst_val].as_const())
        {
            self.buffer
                .write_line(format_args!("attribute \\init {}", literal(init)))?;
        }

        let width = node.width();
        let name = ident(module, node_id);
        match port {
            Some((dir, idx)) => self
                .buffer
                .write_line(format_args!("wire width {width} {dir} {idx} {name}")),
            None => self.buffer.write_line(format_args!("wire width {width} {name}")),
        }
    }

    fn write_cell(
        &mut self,
        cell_ty: &str,
        cell_name: &str,
        params: &[(&str, String)],
        connections: &[(&str, String)],
    ) -> io::Result<()> {
        self.buffer
            .write_line(format_args!("cell {cell_ty} {cell_name}"))?;
        self.buffer.push_tab();
        for (param, value) in params {
            self.buffer
                .write_line(format_args!("parameter \\{param} {value}"))?;
        }
        for (port, sig) in connections {
            self.buffer.write_line(format_args!("connect \\{port} {sig}"))?;
        }
        self.buffer.pop_tab();
        self.buffer.write_line(format_args!("end"))
    }
}

impl Backend for Rtlil {
    const EXT: &'static str = "il";

    fn write<W: Write>(netlist: &NetList, out: W) -> io::Result<W> {
        let mut rtlil = RtlilWriter::new(netlist, out);
        rtlil.visit_modules()?;
        rtlil.buffer.flush()?;

        Ok(rtlil.buffer.into_inner())
    }
}

fn literal(value: ConstVal) -> String {
    format!("{}'{}", value.width(), value.to_bitstr())
}

fn ident(module: &Module, node_id: NodeId) -> String {
    let prefix = if module[node_id].output().internal {
        '$'
    } else {
        '\\'
    };

    format!("{prefix}{}", net_name(module, node_id))
}

fn cell_name(node_id: NodeId) -> String {
    format!("$cell${node_id}")
}

fn srst_wire(node_id: NodeId) -> String {
    format!("$srst${node_id}")
}

impl<'n, W: Write> Visitor for RtlilWriter<'n, W> {
    fn visit_modules(&mut self) -> io::Result<()> {
        self.buffer
            .write_str("# Automatically generated by blinky_netlist.\n")?;

        for module_id in self.netlist.modules() {
            self.visit_module(module_id)?;
        }

        Ok(())
    }

    fn visit_module(&mut self, module_id: ModuleId) -> io::Result<()> {
        let netlist = self.netlist;
        let module = &netlist[module_id];

        if module.is_top {
            self.buffer.write_line(format_args!("attribute \\top 1"))?;
        }
        self.buffer
            .write_line(format_args!("module \\{}", module.name))?;
        self.buffer.push_tab();

        for (idx, node_id) in module.inputs().enumerate() {
            self.write_wire(module, node_id, Some(("input", idx + 1)))?;
        }
        let inputs = module.inputs().count();
        for (idx, node_id) in module.outputs().enumerate() {
            self.write_wire(module, node_id, Some(("output", inputs + idx + 1)))?;
        }
        for (node_id, node) in module.nodes() {
            if module.is_port(node_id) || node.is_const() {
                continue;
            }
            self.write_wire(module, node_id, None)?;
        }
        for (node_id, node) in module.nodes() {
            if let Some(dff) = node.as_dff() {
                if dff.rst_kind == SyncKind::Sync {
                    self.buffer.write_line(format_args!(
                        "wire width {} {}",
                        node.width(),
                        srst_wire(node_id)
                    ))?;
                }
            }
        }

        for (node_id, _) in module.nodes() {
            self.visit_node(module, node_id)?;
        }

        self.buffer.pop_tab();
        self.buffer.write_line(format_args!("end"))
    }

    fn visit_node(&mut self, module: &Module, node_id: NodeId) -> io::Result<()> {
        let node = &module[node_id];
        let width = node.width().to_string();
        let y = ident(module, node_id);

        match node {
            NodeKind::Input(_) | NodeKind::Const(_) => Ok(()),
            NodeKind::BinOp(BinOpNode {
                bin_op,
                inputs: (lhs, rhs),
                ..
            }) => {
                let cell_ty = match bin_op {
                    BinOp::Add => "$add",
                    BinOp::Eq => "$eq",
                };
                let operand_width = module[*lhs].width().to_string();

                self.write_cell(
                    cell_ty,
                    &cell_name(node_id),
                    &[
                        ("A_SIGNED", "0".into()),
                        ("A_WIDTH", operand_width.clone()),
                        ("B_SIGNED", "0".into()),
                        ("B_WIDTH", operand_width),
                        ("Y_WIDTH", width),
                    ],
                    &[
                        ("A", Self::sig(module, *lhs)),
                        ("B", Self::sig(module, *rhs)),
                        ("Y", y),
                    ],
                )
            }
            NodeKind::BitNot(BitNot { input, .. }) => self.write_cell(
                "$not",
                &cell_name(node_id),
                &[
                    ("A_SIGNED", "0".into()),
                    ("A_WIDTH", width.clone()),
                    ("Y_WIDTH", width),
                ],
                &[("A", Self::sig(module, *input)), ("Y", y)],
            ),
            NodeKind::Mux2(Mux2 { inputs, .. }) => self.write_cell(
                "$mux",
                &cell_name(node_id),
                &[("WIDTH", width)],
                &[
                    ("A", Self::sig(module, inputs.on_false)),
                    ("B", Self::sig(module, inputs.on_true)),
                    ("S", Self::sig(module, inputs.sel)),
                    ("Y", y),
                ],
            ),
            NodeKind::DFF(DFF {
                inputs,
                rst_kind,
                rst_pol,
                ..
            }) => {
                let data = inputs.data.ok_or_else(|| unconnected(module, node_id))?;
                let clk = Self::sig(module, inputs.clk);
                let rst = Self::sig(module, inputs.rst);
                let rst_val = Self::sig(module, inputs.rst_val);
                let data = Self::sig(module, data);

                match rst_kind {
                    SyncKind::Sync => {
                        let (idle, active) = match rst_pol {
                            Polarity::ActiveHigh => (data, rst_val),
                            Polarity::ActiveLow => (rst_val, data),
                        };
                        let srst = srst_wire(node_id);

                        self.write_cell(
                            "$mux",
                            &format!("{}$srst", cell_name(node_id)),
                            &[("WIDTH", width.clone())],
                            &[("A", idle), ("B", active), ("S", rst), ("Y", srst.clone())],
                        )?;
                        self.write_cell(
                            "$dff",
                            &cell_name(node_id),
                            &[("CLK_POLARITY", "1".into()), ("WIDTH", width)],
                            &[("CLK", clk), ("D", srst), ("Q", y)],
                        )
                    }
                    SyncKind::Async => {
                        let arst_pol = match rst_pol {
                            Polarity::ActiveHigh => "1",
                            Polarity::ActiveLow => "0",
                        };

                        self.write_cell(
                            "$adff",
                            &cell_name(node_id),
                            &[
                                ("ARST_POLARITY", arst_pol.into()),
                                ("ARST_VALUE", rst_val),
                                ("CLK_POLARITY", "1".into()),
                                ("WIDTH", width),
                            ],
                            &[("ARST", rst), ("CLK", clk), ("D", data), ("Q", y)],
                        )
                    }
                }
            }
        }
    }
}
