use crate::types::Node;

/// Encodes a single value tree to its MessagePack byte representation.
pub fn encode(node: &Node) -> Vec<u8> {
    let mut buf = Vec::new();
    write_node(&mut buf, node);
    buf
}

/// Encodes a sequence of top-level values back to back, the inverse of
/// decoding a multi-value stream.
pub fn encode_all(nodes: &[Node]) -> Vec<u8> {
    let mut buf = Vec::new();
    for node in nodes {
        write_node(&mut buf, node);
    }
    buf
}

fn write_node(buf: &mut Vec<u8>, node: &Node) {
    match node {
        Node::Nil => buf.push(0xc0),
        Node::Bool(false) => buf.push(0xc2),
        Node::Bool(true) => buf.push(0xc3),
        Node::Int(n) => write_int(buf, *n),
        Node::UInt(n) => write_uint(buf, *n),
        Node::Float(d) => write_float(buf, *d),
        Node::Str(bytes) => write_str(buf, bytes),
        Node::Blob(bytes) => write_blob(buf, bytes),
        Node::Ext { etype, data } => write_ext(buf, *etype, data),
        Node::Array(children) => write_array(buf, children),
        Node::Map(entries) => write_map(buf, entries),
    }
}

fn write_int(buf: &mut Vec<u8>, n: i64) {
    if n >= 0 {
        write_uint(buf, n as u64);
        return;
    }
    if n >= -32 {
        buf.push(n as i8 as u8);
    } else if n >= -128 {
        buf.push(0xd0);
        buf.push(n as i8 as u8);
    } else if n >= -32768 {
        buf.push(0xd1);
        buf.extend_from_slice(&(n as i16).to_be_bytes());
    } else if n >= -(1i64 << 31) {
        buf.push(0xd2);
        buf.extend_from_slice(&(n as i32).to_be_bytes());
    } else {
        buf.push(0xd3);
        buf.extend_from_slice(&n.to_be_bytes());
    }
}

fn write_uint(buf: &mut Vec<u8>, n: u64) {
    if n <= 127 {
        buf.push(n as u8);
    } else if n <= 0xff {
        buf.push(0xcc);
        buf.push(n as u8);
    } else if n <= 0xffff {
        buf.push(0xcd);
        buf.extend_from_slice(&(n as u16).to_be_bytes());
    } else if n <= u32::MAX as u64 {
        buf.push(0xce);
        buf.extend_from_slice(&(n as u32).to_be_bytes());
    } else {
        buf.push(0xcf);
        buf.extend_from_slice(&n.to_be_bytes());
    }
}

fn write_float(buf: &mut Vec<u8>, d: f64) {
    let narrowed = d as f32;
    if d == narrowed as f64 {
        buf.push(0xca);
        buf.extend_from_slice(&narrowed.to_be_bytes());
    } else {
        buf.push(0xcb);
        buf.extend_from_slice(&d.to_be_bytes());
    }
}

fn write_str(buf: &mut Vec<u8>, bytes: &[u8]) {
    let len = bytes.len();
    if len < 32 {
        buf.push(0xa0 | len as u8);
    } else if len <= 0xff {
        buf.push(0xd9);
        buf.push(len as u8);
    } else if len <= 0xffff {
        buf.push(0xda);
        buf.extend_from_slice(&(len as u16).to_be_bytes());
    } else {
        buf.push(0xdb);
        buf.extend_from_slice(&(len as u32).to_be_bytes());
    }
    buf.extend_from_slice(bytes);
}

fn write_blob(buf: &mut Vec<u8>, bytes: &[u8]) {
    let len = bytes.len();
    if len <= 0xff {
        buf.push(0xc4);
        buf.push(len as u8);
    } else if len <= 0xffff {
        buf.push(0xc5);
        buf.extend_from_slice(&(len as u16).to_be_bytes());
    } else {
        buf.push(0xc6);
        buf.extend_from_slice(&(len as u32).to_be_bytes());
    }
    buf.extend_from_slice(bytes);
}

fn write_ext(buf: &mut Vec<u8>, etype: u8, data: &[u8]) {
    let len = data.len();
    if let Some(log2) = fixext_log2(len) {
        buf.push(0xd4 + log2);
        buf.push(etype);
        buf.extend_from_slice(data);
        return;
    }
    if len <= 0xff {
        buf.push(0xc7);
        buf.push(len as u8);
    } else if len <= 0xffff {
        buf.push(0xc8);
        buf.extend_from_slice(&(len as u16).to_be_bytes());
    } else {
        buf.push(0xc9);
        buf.extend_from_slice(&(len as u32).to_be_bytes());
    }
    buf.push(etype);
    buf.extend_from_slice(data);
}

/// `0xd4 + log2(len)` for the five fixext lengths 1/2/4/8/16, or `None` if
/// `len` isn't one of those.
fn fixext_log2(len: usize) -> Option<u8> {
    match len {
        1 => Some(0),
        2 => Some(1),
        4 => Some(2),
        8 => Some(3),
        16 => Some(4),
        _ => None,
    }
}

fn write_array(buf: &mut Vec<u8>, children: &[Node]) {
    let len = children.len();
    if len <= 15 {
        buf.push(0x90 | len as u8);
    } else if len <= 0xffff {
        buf.push(0xdc);
        buf.extend_from_slice(&(len as u16).to_be_bytes());
    } else {
        buf.push(0xdd);
        buf.extend_from_slice(&(len as u32).to_be_bytes());
    }
    for child in children {
        write_node(buf, child);
    }
}

fn write_map(buf: &mut Vec<u8>, entries: &[(Node, Node)]) {
    let len = entries.len();
    if len <= 15 {
        buf.push(0x80 | len as u8);
    } else if len <= 0xffff {
        buf.push(0xde);
        buf.extend_from_slice(&(len as u16).to_be_bytes());
    } else {
        buf.push(0xdf);
        buf.extend_from_slice(&(len as u32).to_be_bytes());
    }
    for (key, value) in entries {
        write_node(buf, key);
        write_node(buf, value);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encodes_int_ranges() {
        assert_eq!(encode(&Node::Int(0)), vec![0x00]);
        assert_eq!(encode(&Node::Int(127)), vec![0x7f]);
        assert_eq!(encode(&Node::Int(128)), vec![0xcc, 0x80]);
        assert_eq!(encode(&Node::Int(-1)), vec![0xff]);
        assert_eq!(encode(&Node::Int(-33)), vec![0xd0, 0xdf]);
        assert_eq!(
            encode(&Node::Int(-32769)),
            vec![0xd2, 0xff, 0xff, 0x7f, 0xff]
        );
    }

    #[test]
    fn encodes_array_and_str() {
        let tree = Node::Array(vec![
            Node::Int(1),
            Node::Str(b"a".to_vec()),
            Node::Nil,
        ]);
        assert_eq!(encode(&tree), vec![0x93, 0x01, 0xa1, 0x61, 0xc0]);
    }

    #[test]
    fn encodes_map() {
        let tree = Node::Map(vec![(Node::Str(b"k".to_vec()), Node::Int(42))]);
        assert_eq!(encode(&tree), vec![0x81, 0xa1, 0x6b, 0x2a]);
    }

    #[test]
    fn float_downgrades_when_exact() {
        assert_eq!(
            encode(&Node::Float(1.0)),
            vec![0xca, 0x3f, 0x80, 0x00, 0x00]
        );
        assert_eq!(
            encode(&Node::Float(1.1)),
            vec![0xcb, 0x3f, 0xf1, 0x99, 0x99, 0x99, 0x99, 0x99, 0x9a]
        );
    }

    #[test]
    fn non_power_of_two_ext_uses_non_fix_family() {
        let tree = Node::Ext {
            etype: 9,
            data: vec![0xff, 0xee, 0xdd],
        };
        assert_eq!(encode(&tree), vec![0xc7, 0x03, 0x09, 0xff, 0xee, 0xdd]);
    }
}
