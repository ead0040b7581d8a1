use blinky_netlist::module::Module;
use smallvec::SmallVec;

use crate::{
    error::{Error, Result},
    platform::Platform,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    In,
    Out,
}

/// A port of a component's interface.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Member {
    pub name: &'static str,
    pub flow: Flow,
    pub width: u128,
}

impl Member {
    pub const fn input(name: &'static str, width: u128) -> Self {
        Self {
            name,
            flow: Flow::In,
            width,
        }
    }

    pub const fn output(name: &'static str, width: u128) -> Self {
        Self {
            name,
            flow: Flow::Out,
            width,
        }
    }
}

/// Interface of a component, not counting the clock and reset of its domain.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Signature {
    members: SmallVec<[Member; 4]>,
}

impl Signature {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn member(mut self, member: Member) -> Self {
        self.members.push(member);
        self
    }

    pub fn members(&self) -> &[Member] {
        &self.members
    }

    pub fn get(&self, name: &str) -> Option<&Member> {
        self.members.iter().find(|member| member.name == name)
    }

    /// Checks that `module` exposes every member with the declared direction
    /// and width.
    pub fn check(&self, module: &Module) -> Result<()> {
        for member in &self.members {
            let node_id = module
                .find_port(member.name)
                .ok_or_else(|| Error::SignatureMismatch(member.name.to_string()))?;

            let flow_matches = match member.flow {
                Flow::In => module.is_input(node_id),
                Flow::Out => module.is_output(node_id),
            };
            if !flow_matches || module[node_id].width() != member.width {
                return Err(Error::SignatureMismatch(member.name.to_string()));
            }
        }

        Ok(())
    }
}

/// A hardware component that can be turned into a netlist module.
pub trait Component {
    fn signature(&self) -> Signature;

    /// Builds the logic of the component. `platform` may change the
    /// generated logic; `None` means a generic, platform independent design.
    fn elaborate(&self, platform: Option<&Platform>) -> Result<Module>;
}

#[cfg(test)]
mod tests {
    use blinky_netlist::sig_ty::NodeTy;

    use super::*;

    fn passthrough() -> Module {
        let mut module = Module::new("pass");
        let a = module.add_input("a", NodeTy::Unsigned(4)).unwrap();
        let y = module.add_bit_not(a).unwrap();
        module.add_output(y, "y").unwrap();
        module
    }

    #[test]
    fn signature_matches_module() {
        let signature = Signature::new()
            .member(Member::input("a", 4))
            .member(Member::output("y", 4));

        assert!(signature.check(&passthrough()).is_ok());
        assert_eq!(signature.get("y"), Some(&Member::output("y", 4)));
    }

    #[test]
    fn signature_mismatch() {
        let module = passthrough();

        for signature in [
            Signature::new().member(Member::output("a", 4)),
            Signature::new().member(Member::output("y", 1)),
            Signature::new().member(Member::output("z", 4)),
        ] {
            assert!(matches!(
                signature.check(&module),
                Err(Error::SignatureMismatch(_))
            ));
        }
    }
}
