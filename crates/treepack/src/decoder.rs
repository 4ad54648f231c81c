use crate::cursor::Cursor;
use crate::types::Error;
use crate::types::Node;
use crate::types::Result;

/// Decodes every top-level value in `bytes`.
///
/// On the first decode error the whole call fails; no partial tree is
/// returned — whatever nodes had already been built are simply dropped.
pub fn decode(bytes: &[u8]) -> Result<Vec<Node>> {
    Decoder::new(bytes).collect()
}

/// Lazily decodes the top-level values in a byte slice, one per `next()`.
pub struct Decoder<'a> {
    cursor: Cursor<'a>,
}

impl<'a> Decoder<'a> {
    pub fn new(bytes: &'a [u8]) -> Self {
        Self {
            cursor: Cursor::new(bytes),
        }
    }
}

impl<'a> Iterator for Decoder<'a> {
    type Item = Result<Node>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.cursor.is_empty() {
            return None;
        }
        Some(decode_value(&mut self.cursor))
    }
}

fn decode_value(cursor: &mut Cursor<'_>) -> Result<Node> {
    let tag = cursor.read_byte()?;
    match tag {
        0x00..=0x7f => Ok(Node::Int(tag as i64)),
        0xe0..=0xff => Ok(Node::Int(tag as i8 as i64)),
        0xa0..=0xbf => decode_payload(cursor, (tag & 0x1f) as usize).map(Node::Str),
        0x90..=0x9f => decode_array(cursor, (tag & 0x0f) as usize),
        0x80..=0x8f => decode_map(cursor, (tag & 0x0f) as usize),
        0xc0 => Ok(Node::Nil),
        0xc1 => Err(Error::BadFormat(tag)),
        0xc2 => Ok(Node::Bool(false)),
        0xc3 => Ok(Node::Bool(true)),
        0xc4 => {
            let len = cursor.read_u8()? as usize;
            decode_payload(cursor, len).map(Node::Blob)
        }
        0xc5 => {
            let len = cursor.read_u16()? as usize;
            decode_payload(cursor, len).map(Node::Blob)
        }
        0xc6 => {
            let len = cursor.read_u32()? as usize;
            decode_payload(cursor, len).map(Node::Blob)
        }
        0xc7 => {
            let len = cursor.read_u8()? as usize;
            decode_ext(cursor, len)
        }
        0xc8 => {
            let len = cursor.read_u16()? as usize;
            decode_ext(cursor, len)
        }
        0xc9 => {
            let len = cursor.read_u32()? as usize;
            decode_ext(cursor, len)
        }
        0xca => Ok(Node::Float(cursor.read_f32()? as f64)),
        0xcb => Ok(Node::Float(cursor.read_f64()?)),
        0xcc => Ok(Node::UInt(cursor.read_u8()? as u64)),
        0xcd => Ok(Node::UInt(cursor.read_u16()? as u64)),
        0xce => Ok(Node::UInt(cursor.read_u32()? as u64)),
        0xcf => Ok(Node::UInt(cursor.read_u64()?)),
        0xd0 => Ok(Node::Int(cursor.read_i8()? as i64)),
        0xd1 => Ok(Node::Int(cursor.read_i16()? as i64)),
        0xd2 => Ok(Node::Int(cursor.read_i32()? as i64)),
        0xd3 => Ok(Node::Int(cursor.read_i64()?)),
        0xd4..=0xd8 => {
            let len = 1usize << (tag - 0xd4);
            decode_ext(cursor, len)
        }
        0xd9 => {
            let len = cursor.read_u8()? as usize;
            decode_payload(cursor, len).map(Node::Str)
        }
        0xda => {
            let len = cursor.read_u16()? as usize;
            decode_payload(cursor, len).map(Node::Str)
        }
        0xdb => {
            let len = cursor.read_u32()? as usize;
            decode_payload(cursor, len).map(Node::Str)
        }
        0xdc => {
            let len = cursor.read_u16()? as usize;
            decode_array(cursor, len)
        }
        0xdd => {
            let len = cursor.read_u32()? as usize;
            decode_array(cursor, len)
        }
        0xde => {
            let len = cursor.read_u16()? as usize;
            decode_map(cursor, len)
        }
        0xdf => {
            let len = cursor.read_u32()? as usize;
            decode_map(cursor, len)
        }
    }
}

fn decode_payload(cursor: &mut Cursor<'_>, len: usize) -> Result<Vec<u8>> {
    Ok(cursor.read_bytes(len)?.to_vec())
}

fn decode_ext(cursor: &mut Cursor<'_>, len: usize) -> Result<Node> {
    let etype = cursor.read_u8()?;
    let data = decode_payload(cursor, len)?;
    Ok(Node::Ext { etype, data })
}

fn decode_array(cursor: &mut Cursor<'_>, len: usize) -> Result<Node> {
    // `len` comes straight off the wire and is untrusted; cap the upfront
    // reservation so a short, malicious length-prefix can't force a
    // multi-gigabyte allocation before a single child byte is read.
    let mut children = Vec::with_capacity(len.min(cursor.remaining()));
    for _ in 0..len {
        children.push(decode_value(cursor)?);
    }
    Ok(Node::Array(children))
}

fn decode_map(cursor: &mut Cursor<'_>, len: usize) -> Result<Node> {
    let mut entries = Vec::with_capacity(len.min(cursor.remaining()));
    for _ in 0..len {
        let key = decode_value(cursor)?;
        let value = decode_value(cursor)?;
        entries.push((key, value));
    }
    Ok(Node::Map(entries))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_ext() {
        let bytes = [0xc7, 0x03, 0x09, 0xff, 0xee, 0xdd];
        let nodes = decode(&bytes).unwrap();
        assert_eq!(
            nodes,
            vec![Node::Ext {
                etype: 9,
                data: vec![0xff, 0xee, 0xdd]
            }]
        );
    }

    #[test]
    fn decodes_multiple_top_level_values() {
        let bytes = [0xc0, 0xc3, 0x01];
        let nodes = decode(&bytes).unwrap();
        assert_eq!(nodes, vec![Node::Nil, Node::Bool(true), Node::Int(1)]);
    }

    #[test]
    fn truncated_array_is_eof() {
        let bytes = [0x91];
        assert_eq!(decode(&bytes), Err(Error::Eof));
    }

    #[test]
    fn unused_tag_is_bad_format() {
        let bytes = [0xc1];
        assert_eq!(decode(&bytes), Err(Error::BadFormat(0xc1)));
    }
}
