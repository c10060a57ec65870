//! Arena-backed reference tree.
//!
//! Nodes live in a slot vector indexed by their [`NodeId`]. Structural links
//! are stored as ids rather than references, so removing a subtree only
//! empties slots and can never leave a dangling link behind. Slots are never
//! reused: a destroyed id stays invalid for the lifetime of the tree.

use core_types::{AttributeId, AttributeValue, NodeId, NodeType, Position, TreeError, TreeResult};
use tracing::trace;

use crate::attributes::AttributeSet;
use crate::backend::Backend;
use crate::config::TreeConfig;

/// One node in the arena
#[derive(Debug, Clone, Default)]
struct NodeRecord {
    node_type: NodeType,
    parent: Option<NodeId>,
    first_child: Option<NodeId>,
    last_child: Option<NodeId>,
    previous_sibling: Option<NodeId>,
    next_sibling: Option<NodeId>,
    /// Kept in lockstep with the child links
    child_count: usize,
    attributes: AttributeSet,
}

/// Reference [`Backend`] storing nodes in an id-addressed arena.
#[derive(Debug, Clone, Default)]
pub struct ArenaTree {
    slots: Vec<Option<NodeRecord>>,
    live: usize,
    config: TreeConfig,
}

impl ArenaTree {
    /// Create an empty tree with the default configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty tree with an explicit configuration
    pub fn with_config(config: TreeConfig) -> Self {
        Self {
            slots: Vec::new(),
            live: 0,
            config,
        }
    }

    /// Configuration in effect
    pub fn config(&self) -> &TreeConfig {
        &self.config
    }

    fn record(&self, id: NodeId) -> TreeResult<&NodeRecord> {
        self.slots
            .get(id.0 as usize)
            .and_then(Option::as_ref)
            .ok_or(TreeError::InvalidNode(id))
    }

    fn record_mut(&mut self, id: NodeId) -> TreeResult<&mut NodeRecord> {
        self.slots
            .get_mut(id.0 as usize)
            .and_then(Option::as_mut)
            .ok_or(TreeError::InvalidNode(id))
    }

    /// True when `ancestor` is `node` or lies on its parent chain
    fn is_ancestor_or_self(&self, ancestor: NodeId, node: NodeId) -> TreeResult<bool> {
        let mut cursor = Some(node);
        while let Some(current) = cursor {
            if current == ancestor {
                return Ok(true);
            }
            cursor = self.record(current)?.parent;
        }
        Ok(false)
    }

    /// Resolve a position to the sibling the child is inserted before.
    /// `None` means append.
    fn resolve_position(&self, parent: NodeId, position: Position) -> TreeResult<Option<NodeId>> {
        let record = self.record(parent)?;
        match position {
            Position::Append => Ok(None),
            Position::Prepend => Ok(record.first_child),
            Position::At(index) => {
                let len = record.child_count;
                if index as usize > len {
                    return Err(TreeError::PositionOutOfRange { index, len });
                }
                let mut cursor = record.first_child;
                for _ in 0..index {
                    cursor = match cursor {
                        Some(child) => self.record(child)?.next_sibling,
                        None => None,
                    };
                }
                Ok(cursor)
            }
            Position::Before(sibling) => {
                if self.record(sibling)?.parent != Some(parent) {
                    return Err(TreeError::NotAChild {
                        parent,
                        child: sibling,
                    });
                }
                Ok(Some(sibling))
            }
        }
    }

    fn link(&mut self, parent: NodeId, child: NodeId, before: Option<NodeId>) -> TreeResult<()> {
        let previous = match before {
            Some(sibling) => self.record(sibling)?.previous_sibling,
            None => self.record(parent)?.last_child,
        };

        {
            let record = self.record_mut(child)?;
            record.parent = Some(parent);
            record.previous_sibling = previous;
            record.next_sibling = before;
        }

        match previous {
            Some(sibling) => self.record_mut(sibling)?.next_sibling = Some(child),
            None => self.record_mut(parent)?.first_child = Some(child),
        }
        match before {
            Some(sibling) => self.record_mut(sibling)?.previous_sibling = Some(child),
            None => self.record_mut(parent)?.last_child = Some(child),
        }
        self.record_mut(parent)?.child_count += 1;
        Ok(())
    }

    fn unlink(&mut self, parent: NodeId, child: NodeId) -> TreeResult<()> {
        let (previous, next) = {
            let record = self.record_mut(child)?;
            let links = (record.previous_sibling, record.next_sibling);
            record.parent = None;
            record.previous_sibling = None;
            record.next_sibling = None;
            links
        };

        match previous {
            Some(sibling) => self.record_mut(sibling)?.next_sibling = next,
            None => self.record_mut(parent)?.first_child = next,
        }
        match next {
            Some(sibling) => self.record_mut(sibling)?.previous_sibling = previous,
            None => self.record_mut(parent)?.last_child = previous,
        }
        self.record_mut(parent)?.child_count -= 1;
        Ok(())
    }

    /// Empty the slots of `root` and all its descendants
    fn destroy_subtree(&mut self, root: NodeId) -> usize {
        let mut pending = vec![root];
        let mut destroyed = 0;
        while let Some(id) = pending.pop() {
            if let Some(record) = self.slots.get_mut(id.0 as usize).and_then(Option::take) {
                let mut cursor = record.first_child;
                while let Some(child) = cursor {
                    pending.push(child);
                    cursor = self
                        .slots
                        .get(child.0 as usize)
                        .and_then(Option::as_ref)
                        .and_then(|r| r.next_sibling);
                }
                destroyed += 1;
            }
        }
        self.live -= destroyed;
        destroyed
    }
}

impl Backend for ArenaTree {
    fn create_node(&mut self) -> TreeResult<NodeId> {
        if let Some(limit) = self.config.node_limit {
            if self.live >= limit {
                return Err(TreeError::ResourceExhausted(format!(
                    "node limit {} reached",
                    limit
                )));
            }
        }
        let id = u32::try_from(self.slots.len()).map_err(|_| {
            TreeError::ResourceExhausted("node identifier space exhausted".to_string())
        })?;

        self.slots.push(Some(NodeRecord::default()));
        self.live += 1;
        trace!(node = id, "node created");
        Ok(NodeId(id))
    }

    fn contains(&self, node: NodeId) -> bool {
        self.record(node).is_ok()
    }

    fn node_count(&self) -> usize {
        self.live
    }

    fn node_type(&self, node: NodeId) -> TreeResult<NodeType> {
        Ok(self.record(node)?.node_type)
    }

    fn set_node_type(&mut self, node: NodeId, node_type: NodeType) -> TreeResult<()> {
        self.record_mut(node)?.node_type = node_type;
        Ok(())
    }

    fn insert_child(
        &mut self,
        parent: NodeId,
        child: NodeId,
        position: Position,
    ) -> TreeResult<()> {
        self.record(parent)?;
        let attached_to = self.record(child)?.parent;

        if self.is_ancestor_or_self(child, parent)? {
            return Err(TreeError::CycleDetected { parent, child });
        }
        if let Some(current) = attached_to {
            return Err(TreeError::AlreadyAttached {
                child,
                parent: current,
            });
        }

        let before = self.resolve_position(parent, position)?;
        self.link(parent, child, before)?;
        trace!(parent = parent.0, child = child.0, ?position, "child inserted");
        Ok(())
    }

    fn remove_child(&mut self, parent: NodeId, child: NodeId) -> TreeResult<()> {
        self.record(parent)?;
        if self.record(child)?.parent != Some(parent) {
            return Err(TreeError::NotAChild { parent, child });
        }

        self.unlink(parent, child)?;
        let destroyed = self.destroy_subtree(child);
        trace!(parent = parent.0, child = child.0, destroyed, "child removed");
        Ok(())
    }

    fn parent(&self, node: NodeId) -> TreeResult<Option<NodeId>> {
        Ok(self.record(node)?.parent)
    }

    fn first_child(&self, node: NodeId) -> TreeResult<Option<NodeId>> {
        Ok(self.record(node)?.first_child)
    }

    fn last_child(&self, node: NodeId) -> TreeResult<Option<NodeId>> {
        Ok(self.record(node)?.last_child)
    }

    fn next_sibling(&self, node: NodeId) -> TreeResult<Option<NodeId>> {
        Ok(self.record(node)?.next_sibling)
    }

    fn previous_sibling(&self, node: NodeId) -> TreeResult<Option<NodeId>> {
        Ok(self.record(node)?.previous_sibling)
    }

    fn child_count(&self, node: NodeId) -> TreeResult<usize> {
        Ok(self.record(node)?.child_count)
    }

    fn set_attribute(
        &mut self,
        node: NodeId,
        attribute: AttributeId,
        value: AttributeValue,
    ) -> TreeResult<()> {
        let kind = value.attribute_type();
        self.record_mut(node)?.attributes.set(attribute, value);
        trace!(node = node.0, attribute = attribute.0, %kind, "attribute set");
        Ok(())
    }

    fn attribute(&self, node: NodeId, attribute: AttributeId) -> TreeResult<&AttributeValue> {
        self.record(node)?
            .attributes
            .get(attribute)
            .ok_or(TreeError::AttributeNotFound { node, attribute })
    }

    fn clear_attribute(&mut self, node: NodeId, attribute: AttributeId) -> TreeResult<()> {
        self.record_mut(node)?.attributes.remove(attribute);
        Ok(())
    }

    fn clear_attributes(&mut self, node: NodeId) -> TreeResult<()> {
        self.record_mut(node)?.attributes.clear();
        Ok(())
    }

    fn attribute_count(&self, node: NodeId) -> TreeResult<usize> {
        Ok(self.record(node)?.attributes.len())
    }

    fn first_attribute(&self, node: NodeId) -> TreeResult<Option<AttributeId>> {
        Ok(self.record(node)?.attributes.first())
    }

    fn last_attribute(&self, node: NodeId) -> TreeResult<Option<AttributeId>> {
        Ok(self.record(node)?.attributes.last())
    }

    fn next_attribute(&self, node: NodeId, after: AttributeId) -> TreeResult<Option<AttributeId>> {
        let attributes = &self.record(node)?.attributes;
        let index = attributes
            .index_of(after)
            .ok_or(TreeError::InvalidAttribute {
                node,
                attribute: after,
            })?;
        Ok(attributes.id_at(index + 1))
    }

    fn previous_attribute(
        &self,
        node: NodeId,
        before: AttributeId,
    ) -> TreeResult<Option<AttributeId>> {
        let attributes = &self.record(node)?.attributes;
        let index = attributes
            .index_of(before)
            .ok_or(TreeError::InvalidAttribute {
                node,
                attribute: before,
            })?;
        Ok(index.checked_sub(1).and_then(|i| attributes.id_at(i)))
    }
}
