use serde::de::{DeserializeSeed, SeqAccess};

use super::{drive, Context};
use crate::error::{Error, Result};
use crate::node::Node;
use crate::path::Path;

/// Upper bound on the item buffer reserved up front. Absent optionals count
/// toward the target without being stored.
const PREALLOC_LIMIT: usize = 1024;

/// Array-shaped container.
///
/// The driving routine keeps asking for elements until [`has_more_elements`]
/// turns false; reaching the target length is the only way a sequence ends.
///
/// [`has_more_elements`]: SequenceContainer::has_more_elements
pub struct SequenceContainer<'a, 'o> {
    ctx: &'a mut Context<'o>,
    path: Path,
    cursor: usize,
    target: usize,
    exhausted: bool,
    items: Vec<Node>,
}

impl<'a, 'o> SequenceContainer<'a, 'o> {
    pub fn new(ctx: &'a mut Context<'o>, path: Path, target: usize) -> Self {
        Self {
            ctx,
            path,
            cursor: 0,
            target,
            exhausted: target == 0,
            items: Vec::with_capacity(target.min(PREALLOC_LIMIT)),
        }
    }

    pub fn has_more_elements(&self) -> bool { !self.exhausted }

    /// Decode the element at the cursor. The cursor advances whether or not
    /// the element ends up recorded, so absent optionals still count toward
    /// the target length.
    pub fn decode_element<'de, S>(&mut self, seed: S) -> Result<S::Value>
    where
        S: DeserializeSeed<'de>,
    {
        let (value, node) = drive(self.ctx, self.path.index(self.cursor), seed)?;
        self.advance();
        if let Some(node) = node {
            self.items.push(node);
        }
        Ok(value)
    }

    fn advance(&mut self) {
        self.cursor += 1;
        if self.cursor >= self.target {
            self.exhausted = true;
        }
    }

    pub fn into_node(self) -> Node {
        Node::Array(self.items)
    }
}

impl<'de, 'a, 'o> SeqAccess<'de> for SequenceContainer<'a, 'o> {
    type Error = Error;

    fn next_element_seed<T>(&mut self, seed: T) -> Result<Option<T::Value>>
    where
        T: DeserializeSeed<'de>,
    {
        if !self.has_more_elements() {
            return Ok(None);
        }
        self.decode_element(seed).map(Some)
    }

    fn size_hint(&self) -> Option<usize> {
        Some(self.target.saturating_sub(self.cursor))
    }
}
