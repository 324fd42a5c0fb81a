//! Treestore: hierarchical index over flat parent-linked records
//!
//! Takes a denormalized list of records, each naming its parent, and builds
//! an in-memory tree once so that item, children, descendant and ancestor
//! queries no longer scan the list.
//!
//! ```
//! use treestore::{Identifier, TreeStore};
//!
//! let store = TreeStore::from_json_str(
//!     r#"[{"id": 2, "parent": 1}, {"id": 1, "parent": "root"}]"#,
//! )
//! .unwrap();
//! let ancestors = store.get_all_parents(&Identifier::from(2)).unwrap();
//! assert_eq!(ancestors[0].id(), &Identifier::from(1));
//! ```
//!
//! Tree nodes are internal; only [`TreeStore`] is exposed.
//!
//! ```compile_fail
//! use treestore::tree::Tree;
//! ```

pub mod config;
pub mod error;
pub mod logging;
pub mod store;
pub mod tooling;
pub(crate) mod tree;
pub mod types;

pub use error::{ApiError, StoreError};
pub use store::TreeStore;
pub use types::{Identifier, ParentRef, Record, RecordSchema};
