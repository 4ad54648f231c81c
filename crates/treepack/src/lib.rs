//! treepack is a small library for MessagePack binary serialization.
//!
//! A [`Node`] is a value tree: decode a byte slice into one with [`decode`],
//! walk and edit it with the methods in [`tree`], and turn it back into
//! bytes with [`encode`]. The `create_*` functions below build nodes from
//! scratch without going through the decoder.

pub mod cursor;
pub mod decoder;
pub mod encoder;
pub mod tree;
pub mod types;

pub use decoder::{decode, Decoder};
pub use encoder::{encode, encode_all};
pub use types::{Error, Node, Result};

pub fn create_nil() -> Node {
    Node::Nil
}

pub fn create_bool(b: bool) -> Node {
    Node::Bool(b)
}

pub fn create_int(n: i64) -> Node {
    Node::Int(n)
}

pub fn create_float(n: f64) -> Node {
    Node::Float(n)
}

pub fn create_string(s: impl Into<Vec<u8>>) -> Node {
    Node::Str(s.into())
}

pub fn create_blob(bytes: impl Into<Vec<u8>>) -> Node {
    Node::Blob(bytes.into())
}

/// Not named in the reference's public header directly, but needed for
/// `Ext` nodes to be constructible without going through the decoder —
/// every other wire type has a matching `create_*`.
pub fn create_ext(etype: u8, bytes: impl Into<Vec<u8>>) -> Node {
    Node::Ext {
        etype,
        data: bytes.into(),
    }
}

pub fn create_array() -> Node {
    Node::Array(Vec::new())
}

pub fn create_map() -> Node {
    Node::Map(Vec::new())
}

#[cfg(test)]
mod tests;
