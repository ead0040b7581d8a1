#![deny(unused_must_use)]

use std::hash::BuildHasherDefault;

use indexmap::{IndexMap, IndexSet};
use rustc_hash::FxHasher;

pub mod backend;
pub mod buffer;
pub mod const_val;
pub mod error;
pub mod index;
pub mod module;
pub mod netlist;
pub mod node;
pub mod sig_ty;
pub mod sim;
pub mod symbol;
pub mod visitor;

pub use error::{Error, Result};

/// Environment variable holding the `tracing` filter directives.
pub const LOG_ENV_VAR: &str = "BLINKY_LOG";

pub(crate) type FxIndexMap<K, V> = IndexMap<K, V, BuildHasherDefault<FxHasher>>;
pub(crate) type FxIndexSet<T> = IndexSet<T, BuildHasherDefault<FxHasher>>;
