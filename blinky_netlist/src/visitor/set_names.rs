use tracing::debug;

use crate::{netlist::NetList, symbol::Symbol};

/// Gives a generated name to every node that is referenced by name in the
/// back ends. Constants are always inlined, so they stay anonymous.
pub struct SetNames<'n> {
    netlist: &'n mut NetList,
}

impl<'n> SetNames<'n> {
    pub fn new(netlist: &'n mut NetList) -> Self {
        Self { netlist }
    }

    pub fn run(self) {
        let module_ids = self.netlist.modules().collect::<Vec<_>>();
        for module_id in module_ids {
            let module = &mut self.netlist[module_id];
            let mut named = 0;

            for (node_id, node) in module.nodes_mut() {
                if node.is_const() || node.output().sym.is_some() {
                    continue;
                }

                let sym = Symbol::intern_args(format_args!("{}${}", node.name(), node_id));
                let output = node.output_mut();
                output.sym = Some(sym);
                output.internal = true;
                named += 1;
            }

            debug!("named {named} nodes in module '{}'", module.name);
        }
    }
}
