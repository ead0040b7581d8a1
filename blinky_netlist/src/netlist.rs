use std::ops::{Index, IndexMut};

use crate::{
    error::{Error, Result},
    index::IndexType,
    module::Module,
    visitor::SetNames,
};

crate::idx_ty!(ModuleId);

#[derive(Debug, Default, Clone)]
pub struct NetList {
    modules: Vec<Module>,
    top: Option<ModuleId>,
}

impl Index<ModuleId> for NetList {
    type Output = Module;

    #[inline]
    fn index(&self, module_id: ModuleId) -> &Self::Output {
        &self.modules[module_id.as_usize()]
    }
}

impl IndexMut<ModuleId> for NetList {
    #[inline]
    fn index_mut(&mut self, module_id: ModuleId) -> &mut Self::Output {
        &mut self.modules[module_id.as_usize()]
    }
}

impl NetList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a netlist with `module` as its top module.
    pub fn with_top(mut module: Module) -> Self {
        module.is_top = true;

        let mut netlist = Self::new();
        let module_id = netlist.add_module(module);
        netlist.top = Some(module_id);
        netlist
    }

    pub fn add_module(&mut self, module: Module) -> ModuleId {
        let module_id = ModuleId::from_usize(self.modules.len());
        if module.is_top {
            self.top = Some(module_id);
        }
        self.modules.push(module);
        module_id
    }

    pub fn top(&self) -> Result<ModuleId> {
        self.top.ok_or(Error::MissingTopModule)
    }

    pub fn modules(&self) -> impl DoubleEndedIterator<Item = ModuleId> + '_ {
        (0 .. self.modules.len()).map(ModuleId::from_usize)
    }

    /// Validates every module and names every unnamed node.
    pub fn run_stages(&mut self) -> Result<()> {
        self.top()?;
        for module in &self.modules {
            module.validate()?;
        }

        SetNames::new(self).run();

        Ok(())
    }
}
