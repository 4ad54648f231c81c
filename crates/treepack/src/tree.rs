use crate::types::Error;
use crate::types::Node;
use crate::types::Result;

fn key_matches(key: &Node, name: &[u8]) -> bool {
    match key {
        Node::Str(bytes) => bytes.eq_ignore_ascii_case(name),
        _ => false,
    }
}

impl Node {
    /// Number of children, for an `Array` or `Map` node.
    pub fn len(&self) -> Result<usize> {
        match self {
            Node::Array(children) => Ok(children.len()),
            Node::Map(entries) => Ok(entries.len()),
            _ => Err(Error::WrongKind),
        }
    }

    /// `i`-th array child, or `None` if `i` is out of range.
    pub fn get_index(&self, i: usize) -> Result<Option<&Node>> {
        match self {
            Node::Array(children) => Ok(children.get(i)),
            _ => Err(Error::WrongKind),
        }
    }

    /// Value whose key matches `name` under a case-insensitive byte
    /// comparison. Entries whose key is missing or not a `Str` are skipped
    /// rather than aborting the search early.
    pub fn get_key(&self, name: &str) -> Result<Option<&Node>> {
        match self {
            Node::Map(entries) => Ok(entries
                .iter()
                .find(|(k, _)| key_matches(k, name.as_bytes()))
                .map(|(_, v)| v)),
            _ => Err(Error::WrongKind),
        }
    }

    /// Appends `node` as the last array child.
    pub fn add_to_array(&mut self, node: Node) -> Result<()> {
        match self {
            Node::Array(children) => {
                children.push(node);
                Ok(())
            }
            _ => Err(Error::WrongKind),
        }
    }

    /// Appends `(Str(name), node)` as the last map entry.
    pub fn add_to_map(&mut self, name: impl Into<Vec<u8>>, node: Node) -> Result<()> {
        match self {
            Node::Map(entries) => {
                entries.push((Node::Str(name.into()), node));
                Ok(())
            }
            _ => Err(Error::WrongKind),
        }
    }

    /// Removes and returns the `i`-th array child.
    pub fn detach_index(&mut self, i: usize) -> Result<Node> {
        match self {
            Node::Array(children) => {
                if i >= children.len() {
                    return Err(Error::OutOfBounds);
                }
                Ok(children.remove(i))
            }
            _ => Err(Error::WrongKind),
        }
    }

    /// Removes and returns the value matching `name`, if present.
    pub fn detach_key(&mut self, name: &str) -> Result<Option<Node>> {
        match self {
            Node::Map(entries) => {
                let pos = entries
                    .iter()
                    .position(|(k, _)| key_matches(k, name.as_bytes()));
                Ok(pos.map(|i| entries.remove(i).1))
            }
            _ => Err(Error::WrongKind),
        }
    }

    /// Removes the `i`-th array child, dropping it.
    pub fn delete_index(&mut self, i: usize) -> Result<()> {
        self.detach_index(i).map(drop)
    }

    /// Removes the value matching `name`, dropping it if present.
    pub fn delete_key(&mut self, name: &str) -> Result<()> {
        self.detach_key(name).map(drop)
    }

    /// Replaces the `i`-th array child with `new`, returning the old value.
    pub fn replace_index(&mut self, i: usize, new: Node) -> Result<Node> {
        match self {
            Node::Array(children) => {
                if i >= children.len() {
                    return Err(Error::OutOfBounds);
                }
                Ok(std::mem::replace(&mut children[i], new))
            }
            _ => Err(Error::WrongKind),
        }
    }

    /// Replaces the value matching `name` with `new`, returning the old
    /// value. A no-op (returning `Ok(None)`, `new` dropped) if `name` isn't
    /// found — this does not insert.
    pub fn replace_key(&mut self, name: &str, new: Node) -> Result<Option<Node>> {
        match self {
            Node::Map(entries) => {
                match entries
                    .iter()
                    .position(|(k, _)| key_matches(k, name.as_bytes()))
                {
                    Some(i) => Ok(Some(std::mem::replace(&mut entries[i].1, new))),
                    None => Ok(None),
                }
            }
            _ => Err(Error::WrongKind),
        }
    }

    /// Copies this node. When `recurse` is true, array/map children are
    /// copied recursively; when false, a container's children list is left
    /// empty (a shallow copy of the container itself).
    pub fn duplicate(&self, recurse: bool) -> Node {
        match self {
            Node::Array(children) => {
                if recurse {
                    Node::Array(children.iter().map(|c| c.duplicate(true)).collect())
                } else {
                    Node::Array(Vec::new())
                }
            }
            Node::Map(entries) => {
                if recurse {
                    Node::Map(
                        entries
                            .iter()
                            .map(|(k, v)| (k.duplicate(false), v.duplicate(true)))
                            .collect(),
                    )
                } else {
                    Node::Map(Vec::new())
                }
            }
            other => other.clone(),
        }
    }
}
