//! Integration tests for the datastore API over the in-memory store.

mod common;

mod ancestors;
mod entities;
mod executor;
mod filters;
mod indexes;
mod limits;
mod ordering;
mod restart;
