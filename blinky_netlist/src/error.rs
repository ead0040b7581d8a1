use std::io;

use crate::{module::NodeId, symbol::Symbol};

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("cannot find node {node} in module '{module}'")]
    MissingNode { node: NodeId, module: Symbol },
    #[error("width mismatch for {what}: expected {expected}, found {found}")]
    WidthMismatch {
        what: &'static str,
        expected: u128,
        found: u128,
    },
    #[error("node {0} is not a register")]
    NotDff(NodeId),
    #[error("register '{0}' has no data input")]
    UnconnectedDff(String),
    #[error("register '{0}' is already connected")]
    AlreadyConnected(String),
    #[error("reset value of asynchronous register '{0}' is not a constant")]
    NonConstResetValue(String),
    #[error("port '{0}' is already defined")]
    DuplicatePort(Symbol),
    #[error("cannot find port '{0}'")]
    MissingPort(String),
    #[error("cannot find top module")]
    MissingTopModule,
    #[error("{0}")]
    Io(#[from] io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
