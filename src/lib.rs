//! Conversion between YAML text and an owned tree of documents, keeping the
//! tags, anchors, styles and directives needed to write a stream back the
//! way it was read.

mod document;
mod dumper;
mod error;
mod event;
mod loader;
mod node;
mod options;
mod raw;
mod scalar;
mod validate;
mod yaml;

pub use document::*;
pub use dumper::*;
pub use error::*;
pub use event::*;
pub use loader::*;
pub use node::*;
pub use options::*;
pub use raw::*;
pub use scalar::*;
pub use validate::*;
pub use yaml::*;
