//! Query translation
//!
//! - translate: descriptor -> native filter, sort and paging
//! - index_req: the composite index a descriptor would need

pub mod index_req;
pub mod translate;

pub use index_req::{required_index, IndexRequirement};
pub use translate::{translate, Translated};
