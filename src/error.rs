#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("frequency must be at least 2, got {0}")]
    InvalidFrequency(u64),
    #[error("port '{0}' does not match the component signature")]
    SignatureMismatch(String),
    #[error(transparent)]
    Netlist(#[from] blinky_netlist::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
