//! Unit tests for the tree engine

mod test_structure;
