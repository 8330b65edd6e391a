//! Fake JSON for any `Deserialize` type, without a schema.
//!
//! The type's own deserialization routine is driven against a synthetic
//! decoder that fabricates a plausible value for every request it makes and
//! records the resulting JSON tree. The tree's shape is whatever the routine
//! asks for, so the output decodes back into the same type.
//!
//! ```no_run
//! use serde::Deserialize;
//! use json_mimic::GenerateOptions;
//!
//! #[derive(Deserialize)]
//! struct User { name: String, age: u8, tags: Vec<String> }
//!
//! let json = json_mimic::generate_string::<User>(&GenerateOptions::default())?;
//! println!("{json}");
//! # Ok::<(), json_mimic::Error>(())
//! ```
pub mod decoder;
pub mod error;
pub mod models;
pub mod node;
pub mod options;
pub mod path;
pub mod path_de;
pub mod synth;

use serde::Deserialize;
use serde::de::DeserializeOwned;

pub use error::{Error, Result};
pub use node::{Node, Number};
pub use options::{Bounds, GenerateOptions};
pub use path::{Path, Segment};

/// Drive `T`'s routine against a fresh root decoder and return the recorded tree.
pub fn generate_node<'de, T: Deserialize<'de>>(options: &GenerateOptions) -> Result<Node> {
    options.validate()?;
    log::debug!("generating `{}`", std::any::type_name::<T>());
    let node = decoder::generate::<T>(options)?;
    Ok(node.unwrap_or(Node::Null))
}

/// Pretty-printed JSON bytes with sorted keys.
pub fn generate_vec<'de, T: Deserialize<'de>>(options: &GenerateOptions) -> Result<Vec<u8>> {
    let node = generate_node::<T>(options)?;
    encode(&node)
}

pub fn generate_string<'de, T: Deserialize<'de>>(options: &GenerateOptions) -> Result<String> {
    let bytes = generate_vec::<T>(options)?;
    String::from_utf8(bytes).map_err(|e| Error::CannotMakeString {
        message: format!("could not convert generated JSON into a String: {e}"),
    })
}

/// Encode a node the way the `generate_*` functions do.
pub fn encode(node: &Node) -> Result<Vec<u8>> {
    Ok(serde_json::to_vec_pretty(node)?)
}

/// Decode generated JSON back into `T`, reporting the failing path on error.
pub fn verify<T: DeserializeOwned>(json: &str) -> Result<T> {
    path_de::from_str_with_path::<T>(json)
}
