//! Core types for treepack's value tree and error surface.

/// A decoded or hand-built MessagePack value.
///
/// Containers own their children directly (`Vec`) rather than chaining them
/// through sibling pointers, so invariants like "array children have no
/// key" and "map entries always have a key" hold by construction instead of
/// by convention.
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    Nil,
    Bool(bool),
    /// A decoded or constructed signed integer.
    Int(i64),
    /// An integer decoded from an unsigned wire family. Kept distinct from
    /// `Int` because the decoder never merges the two: every unsigned-family
    /// tag (`0xcc..0xcf`) produces `UInt`, every signed-family tag or fixint
    /// produces `Int`. Re-encoding either arm picks the shortest wire form
    /// for its numeric value regardless of which arm it came from.
    UInt(u64),
    Float(f64),
    Str(Vec<u8>),
    Blob(Vec<u8>),
    Ext { etype: u8, data: Vec<u8> },
    Array(Vec<Node>),
    /// Ordered key/value entries. Keys are themselves `Node`s (almost always
    /// `Str`, but the wire format does not require it).
    Map(Vec<(Node, Node)>),
}

impl Node {
    /// The `mp_type` this node decodes from or encodes to.
    pub fn kind(&self) -> &'static str {
        match self {
            Node::Nil => "nil",
            Node::Bool(_) => "bool",
            Node::Int(_) | Node::UInt(_) => "int",
            Node::Float(_) => "float",
            Node::Str(_) => "str",
            Node::Blob(_) => "blob",
            Node::Ext { .. } => "ext",
            Node::Array(_) => "array",
            Node::Map(_) => "map",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// Fewer bytes remain than the format being decoded requires.
    Eof,
    /// A tag byte matched no recognized MessagePack family.
    BadFormat(u8),
    /// A tree-algebra operation was invoked on a node whose kind does not
    /// support it (e.g. `add_to_array` on a `Map`).
    WrongKind,
    /// An index passed to an array operation was out of bounds.
    OutOfBounds,
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::Eof => write!(f, "unexpected end of input"),
            Error::BadFormat(b) => write!(f, "unrecognized format byte: {:#04x}", b),
            Error::WrongKind => write!(f, "operation not supported for this node's kind"),
            Error::OutOfBounds => write!(f, "index out of bounds"),
        }
    }
}

impl std::error::Error for Error {}

pub type Result<T> = std::result::Result<T, Error>;
