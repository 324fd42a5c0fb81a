//! Record tree
//!
//! Arena of nodes rooted at a record-less sentinel, plus the traversals that
//! are local to a vertex: children, ancestor chain and subtree flattening.

pub mod arena;
pub mod node;

pub use arena::Tree;
pub use node::NodeIndex;
