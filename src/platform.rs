use smallvec::SmallVec;
use strum::{Display, EnumIter, EnumString};

/// Something a target platform can provide that changes how components
/// are elaborated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, EnumIter)]
#[strum(serialize_all = "kebab-case")]
pub enum Capability {
    /// Registers are reset asynchronously.
    AsyncReset,
    /// The reset line is asserted when low.
    ResetActiveLow,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Platform {
    pub name: String,
    capabilities: SmallVec<[Capability; 2]>,
}

impl Platform {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            capabilities: SmallVec::new(),
        }
    }

    pub fn with(mut self, capability: Capability) -> Self {
        if !self.has(capability) {
            self.capabilities.push(capability);
        }
        self
    }

    pub fn has(&self, capability: Capability) -> bool {
        self.capabilities.contains(&capability)
    }

    pub fn capabilities(&self) -> &[Capability] {
        &self.capabilities
    }
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use strum::IntoEnumIterator;

    use super::*;

    #[test]
    fn capability_names() {
        let names = Capability::iter().map(|c| c.to_string()).collect::<Vec<_>>();
        assert_eq!(names, ["async-reset", "reset-active-low"]);

        assert_eq!(
            Capability::from_str("async-reset").unwrap(),
            Capability::AsyncReset
        );
        assert!(Capability::from_str("clock-gating").is_err());
    }

    #[test]
    fn capabilities_are_deduplicated() {
        let platform = Platform::new("board")
            .with(Capability::AsyncReset)
            .with(Capability::AsyncReset);

        assert_eq!(platform.capabilities(), [Capability::AsyncReset]);
        assert!(!platform.has(Capability::ResetActiveLow));
    }
}
