//! Reads and writes against the Blogly schema.
//!
//! [`Query`] holds the read side and [`Mutation`] the write side. Every
//! operation takes a `&DbConn`; writes that touch more than one table run in a
//! single transaction.

mod error;
mod form;
mod mutation;
mod query;

pub use error::*;
pub use form::*;
pub use mutation::*;
pub use query::*;

pub use sea_orm;
