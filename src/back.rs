//! Conversion of components into textual netlists.

use blinky_netlist::{backend::Backend, netlist::NetList, symbol::Symbol};
use tracing::debug;

use crate::{component::Component, error::Result, platform::Platform};

/// Name of the top module when none is given.
pub const TOP: &str = "top";

/// Elaborates `component` into a netlist whose top module is called `name`.
pub fn elaborate<C: Component + ?Sized>(
    component: &C,
    name: &str,
    platform: Option<&Platform>,
) -> Result<NetList> {
    let mut module = component.elaborate(platform)?;
    component.signature().check(&module)?;
    module.name = Symbol::intern(name);

    let mut netlist = NetList::with_top(module);
    netlist.run_stages()?;
    debug!("elaborated '{name}'");

    Ok(netlist)
}

pub fn convert_with<B: Backend, C: Component + ?Sized>(
    component: &C,
    name: &str,
    platform: Option<&Platform>,
) -> Result<String> {
    let netlist = elaborate(component, name, platform)?;

    Ok(B::generate(&netlist)?)
}

pub mod rtlil {
    use blinky_netlist::backend::{Backend, Rtlil};

    use super::{convert_with, TOP};
    use crate::{component::Component, error::Result, platform::Platform};

    pub const EXT: &str = <Rtlil as Backend>::EXT;

    /// Renders `component` as Yosys RTLIL with a top module named `top`.
    pub fn convert<C: Component + ?Sized>(
        component: &C,
        platform: Option<&Platform>,
    ) -> Result<String> {
        convert_with::<Rtlil, _>(component, TOP, platform)
    }
}

pub mod verilog {
    use blinky_netlist::backend::{Backend, Verilog};

    use super::{convert_with, TOP};
    use crate::{component::Component, error::Result, platform::Platform};

    pub const EXT: &str = <Verilog as Backend>::EXT;

    pub fn convert<C: Component + ?Sized>(
        component: &C,
        platform: Option<&Platform>,
    ) -> Result<String> {
        convert_with::<Verilog, _>(component, TOP, platform)
    }
}
