use std::collections::BTreeMap;

use serde::de::value::BorrowedStrDeserializer;
use serde::de::{DeserializeSeed, MapAccess};

use super::{drive, Context};
use crate::error::{Error, Result};
use crate::node::Node;
use crate::path::Path;

/// Where the keys of a mapping come from.
pub enum Keys {
    /// Declared struct fields of `owner`. Every one of them is reported
    /// present, except names the context knows to be shadowed aliases.
    Declared {
        owner: &'static str,
        fields: std::slice::Iter<'static, &'static str>,
        offered: Option<&'static str>,
    },
    /// Map entries; keys are synthesized by the key type's own routine.
    Synthesized { remaining: usize, next_index: usize },
}

impl Keys {
    pub fn declared(owner: &'static str, fields: &'static [&'static str]) -> Self {
        Keys::Declared { owner, fields: fields.iter(), offered: None }
    }

    pub fn synthesized(count: usize) -> Self {
        Keys::Synthesized { remaining: count, next_index: 0 }
    }
}

/// Object-shaped container: accumulates `field -> node`.
pub struct MappingContainer<'a, 'o> {
    ctx: &'a mut Context<'o>,
    path: Path,
    keys: Keys,
    pending: Option<String>,
    entries: BTreeMap<String, Node>,
}

impl<'a, 'o> MappingContainer<'a, 'o> {
    pub fn new(ctx: &'a mut Context<'o>, path: Path, keys: Keys) -> Self {
        Self { ctx, path, keys, pending: None, entries: BTreeMap::new() }
    }

    /// Decode the value for `field`, recording its node unless the value was
    /// an optional decoded as absent.
    pub fn decode_value<'de, S>(&mut self, field: String, seed: S) -> Result<S::Value>
    where
        S: DeserializeSeed<'de>,
    {
        let (value, node) = drive(self.ctx, self.path.field(field.as_str()), seed)?;
        if let Some(node) = node {
            self.entries.insert(field, node);
        }
        Ok(value)
    }

    /// The routine rejected the declared name it was just offered as a
    /// repeat of an earlier field; later traversals skip it.
    pub fn shadow_pending(&mut self) {
        if let (Keys::Declared { owner, offered: Some(name), .. }, Some(_)) = (&self.keys, &self.pending) {
            self.ctx.shadowed.insert((*owner, *name));
        }
    }

    pub fn into_node(self) -> Node {
        Node::Object(self.entries)
    }
}

impl<'de, 'a, 'o> MapAccess<'de> for MappingContainer<'a, 'o> {
    type Error = Error;

    fn next_key_seed<K>(&mut self, seed: K) -> Result<Option<K::Value>>
    where
        K: DeserializeSeed<'de>,
    {
        match &mut self.keys {
            Keys::Declared { owner, fields, offered } => {
                let shadowed = &self.ctx.shadowed;
                let Some(&name) = fields.find(|&&name| !shadowed.contains(&(*owner, name))) else {
                    return Ok(None);
                };
                *offered = Some(name);
                self.pending = Some(name.to_string());
                seed.deserialize(BorrowedStrDeserializer::<Error>::new(name)).map(Some)
            }
            Keys::Synthesized { remaining, next_index } => {
                if *remaining == 0 {
                    return Ok(None);
                }
                *remaining -= 1;
                let path = self.path.index(*next_index);
                *next_index += 1;
                let (key, node) = drive(self.ctx, path, seed)?;
                self.pending = Some(node.map(Node::into_key).unwrap_or_default());
                Ok(Some(key))
            }
        }
    }

    fn next_value_seed<V>(&mut self, seed: V) -> Result<V::Value>
    where
        V: DeserializeSeed<'de>,
    {
        let field = self
            .pending
            .take()
            .ok_or_else(|| Error::Custom(format!("value requested before its key at {}", self.path)))?;
        self.decode_value(field, seed)
    }

    fn size_hint(&self) -> Option<usize> {
        match &self.keys {
            Keys::Declared { fields, .. } => Some(fields.len()),
            Keys::Synthesized { remaining, .. } => Some(*remaining),
        }
    }
}
