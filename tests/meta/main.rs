//! Structural checks on the source and test trees
