use crate::*;

type R<T> = Result<T>;

#[test]
fn decode_then_encode_ext_round_trips() -> R<()> {
    let bytes = [0xc7, 0x03, 0x09, 0xff, 0xee, 0xdd];
    let nodes = decode(&bytes)?;
    assert_eq!(encode_all(&nodes), bytes);
    Ok(())
}

#[test]
fn decode_then_encode_float_round_trips() -> R<()> {
    let bytes = [0xca, 0x3f, 0x80, 0x00, 0x00];
    let nodes = decode(&bytes)?;
    assert_eq!(nodes, vec![Node::Float(1.0)]);
    assert_eq!(encode_all(&nodes), bytes);

    let bytes = [0xcb, 0x3f, 0xf1, 0x99, 0x99, 0x99, 0x99, 0x99, 0x9a];
    let nodes = decode(&bytes)?;
    assert_eq!(encode_all(&nodes), bytes);
    Ok(())
}

#[test]
fn built_tree_round_trips_through_the_wire() -> R<()> {
    let mut map = create_map();
    map.add_to_map("k", create_int(42))?;
    let bytes = encode(&map);
    let decoded = decode(&bytes)?;
    assert_eq!(decoded, vec![map]);
    Ok(())
}

#[test]
fn constructed_array_supports_the_full_algebra() -> R<()> {
    let mut arr = create_array();
    arr.add_to_array(create_string("a"))?;
    arr.add_to_array(create_nil())?;
    arr.add_to_array(create_bool(true))?;

    assert_eq!(arr.len()?, 3);
    let old = arr.replace_index(1, create_int(7))?;
    assert_eq!(old, Node::Nil);
    assert_eq!(arr.get_index(1)?, Some(&Node::Int(7)));

    let detached = arr.detach_index(0)?;
    assert_eq!(detached, Node::Str(b"a".to_vec()));
    assert_eq!(arr.len()?, 2);
    Ok(())
}

#[test]
fn duplicate_produces_a_disjoint_equal_copy() -> R<()> {
    let mut map = create_map();
    map.add_to_map("nested", create_array())?;
    map.get_key("nested")
        .ok()
        .flatten()
        .expect("just inserted");

    let mut original = create_array();
    original.add_to_array(map)?;

    let dup = original.duplicate(true);
    assert_eq!(dup, original);

    // Mutating the duplicate must not affect the original.
    let mut dup = dup;
    dup.detach_index(0)?;
    assert_ne!(dup, original);
    Ok(())
}

#[test]
fn multi_value_stream_decodes_in_order() -> R<()> {
    let bytes = [0xc0, 0xc3, 0x01];
    let nodes = decode(&bytes)?;
    assert_eq!(nodes, vec![Node::Nil, Node::Bool(true), Node::Int(1)]);
    Ok(())
}

#[test]
fn truncated_input_is_eof_not_a_panic() {
    let bytes = [0x91];
    assert_eq!(decode(&bytes), Err(Error::Eof));
}
