//! Backend contract.
//!
//! The operation set below is everything the interpreter may ask of a
//! tree. A replacement backend implements the required methods; the
//! provided methods are derived from them.

use core_types::{AttributeId, AttributeValue, NodeId, NodeType, Position, TreeError, TreeResult};

/// Tree and attribute storage driven by the interpreter.
///
/// Every method fails with [`TreeError::InvalidNode`] when a node id it is
/// given is unknown. Navigation methods return `Ok(None)` when the relation
/// does not exist. Mutations are all-or-nothing: a failed call leaves the
/// tree exactly as it was.
pub trait Backend {
    /// Allocate a parentless, childless node.
    ///
    /// Fails with [`TreeError::ResourceExhausted`] when identifiers or
    /// configured capacity run out.
    fn create_node(&mut self) -> TreeResult<NodeId>;

    /// Whether the node exists
    fn contains(&self, node: NodeId) -> bool;

    /// Number of live nodes
    fn node_count(&self) -> usize;

    /// Type tag of a node
    fn node_type(&self, node: NodeId) -> TreeResult<NodeType>;

    /// Replace the type tag of a node
    fn set_node_type(&mut self, node: NodeId, node_type: NodeType) -> TreeResult<()>;

    /// Attach `child` under `parent` at `position`.
    ///
    /// Fails with [`TreeError::CycleDetected`] when `parent` is `child` or one
    /// of its descendants, and with [`TreeError::AlreadyAttached`] when
    /// `child` already has a parent.
    fn insert_child(&mut self, parent: NodeId, child: NodeId, position: Position)
        -> TreeResult<()>;

    /// Detach `child` from `parent` and destroy the subtree rooted at it.
    ///
    /// Fails with [`TreeError::NotAChild`] when `child` is not under `parent`.
    fn remove_child(&mut self, parent: NodeId, child: NodeId) -> TreeResult<()>;

    /// Parent of a node
    fn parent(&self, node: NodeId) -> TreeResult<Option<NodeId>>;

    /// First child of a node
    fn first_child(&self, node: NodeId) -> TreeResult<Option<NodeId>>;

    /// Last child of a node
    fn last_child(&self, node: NodeId) -> TreeResult<Option<NodeId>>;

    /// Next sibling of a node
    fn next_sibling(&self, node: NodeId) -> TreeResult<Option<NodeId>>;

    /// Previous sibling of a node
    fn previous_sibling(&self, node: NodeId) -> TreeResult<Option<NodeId>>;

    /// Number of direct children
    fn child_count(&self, node: NodeId) -> TreeResult<usize>;

    /// Create or overwrite an attribute. The value carries its type tag.
    fn set_attribute(
        &mut self,
        node: NodeId,
        attribute: AttributeId,
        value: AttributeValue,
    ) -> TreeResult<()>;

    /// Read an attribute.
    ///
    /// Fails with [`TreeError::AttributeNotFound`] when it is absent.
    fn attribute(&self, node: NodeId, attribute: AttributeId) -> TreeResult<&AttributeValue>;

    /// Remove an attribute. Removing an absent attribute succeeds.
    fn clear_attribute(&mut self, node: NodeId, attribute: AttributeId) -> TreeResult<()>;

    /// Remove every attribute of a node
    fn clear_attributes(&mut self, node: NodeId) -> TreeResult<()>;

    /// Number of attributes on a node
    fn attribute_count(&self, node: NodeId) -> TreeResult<usize>;

    /// First attribute in enumeration order
    fn first_attribute(&self, node: NodeId) -> TreeResult<Option<AttributeId>>;

    /// Last attribute in enumeration order
    fn last_attribute(&self, node: NodeId) -> TreeResult<Option<AttributeId>>;

    /// Attribute following `after`.
    ///
    /// Fails with [`TreeError::InvalidAttribute`] when the node has no
    /// attribute `after`.
    fn next_attribute(&self, node: NodeId, after: AttributeId) -> TreeResult<Option<AttributeId>>;

    /// Attribute preceding `before`.
    ///
    /// Fails with [`TreeError::InvalidAttribute`] when the node has no
    /// attribute `before`.
    fn previous_attribute(
        &self,
        node: NodeId,
        before: AttributeId,
    ) -> TreeResult<Option<AttributeId>>;

    /// Children in order
    fn children(&self, node: NodeId) -> TreeResult<Vec<NodeId>> {
        let mut children = Vec::with_capacity(self.child_count(node)?);
        let mut cursor = self.first_child(node)?;
        while let Some(child) = cursor {
            children.push(child);
            cursor = self.next_sibling(child)?;
        }
        Ok(children)
    }

    /// Ordinal of `child` among the children of `parent`
    fn child_index(&self, parent: NodeId, child: NodeId) -> TreeResult<usize> {
        if self.parent(child)? != Some(parent) {
            return Err(TreeError::NotAChild { parent, child });
        }
        let mut index = 0;
        let mut cursor = self.previous_sibling(child)?;
        while let Some(sibling) = cursor {
            index += 1;
            cursor = self.previous_sibling(sibling)?;
        }
        Ok(index)
    }

    /// True when the node has no parent
    fn is_root(&self, node: NodeId) -> TreeResult<bool> {
        Ok(self.parent(node)?.is_none())
    }

    /// True when the node has no children
    fn is_leaf(&self, node: NodeId) -> TreeResult<bool> {
        Ok(self.first_child(node)?.is_none())
    }

    /// True when the node carries at least one attribute
    fn has_attributes(&self, node: NodeId) -> TreeResult<bool> {
        Ok(self.attribute_count(node)? > 0)
    }

    /// True when the node has neither children nor attributes
    fn is_empty(&self, node: NodeId) -> TreeResult<bool> {
        Ok(self.is_leaf(node)? && !self.has_attributes(node)?)
    }

    /// Attribute ids in enumeration order
    fn attribute_ids(&self, node: NodeId) -> TreeResult<Vec<AttributeId>> {
        let mut ids = Vec::with_capacity(self.attribute_count(node)?);
        let mut cursor = self.first_attribute(node)?;
        while let Some(id) = cursor {
            ids.push(id);
            cursor = self.next_attribute(node, id)?;
        }
        Ok(ids)
    }
}
