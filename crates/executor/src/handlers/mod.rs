//! Command handlers organized by category.
//!
//! | Module | Commands |
//! |--------|----------|
//! | `entity` | Put, Get, Delete |
//! | `query` | RunQuery, Next, Count, QueryHistory |
//! | `transaction` | BeginTransaction, Commit, Rollback |
//! | `index` | CreateIndex, GetIndices, UpdateIndex, DeleteIndex |

pub mod entity;
pub mod index;
pub mod query;
pub mod transaction;
