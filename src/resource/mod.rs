//! Domain resource construction
//!
//! The paging layer never knows the concrete resource type it produces. It
//! goes through [`FromFields`], the injected construction capability, and
//! [`collection_name`], which derives the collection key a resource type is
//! nested under in page responses.

mod factory;

pub use factory::{collection_name, FromFields};
