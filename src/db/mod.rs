//! Persistence layer built on the Diesel ORM.
//!
//! - [`schema`] declares the `user`, `post`, `comment`, and `follower` tables.
//! - [`model`] holds the row types and their insertable counterparts.
//! - [`relation`] navigates foreign keys in both directions.
//! - [`connection`] pools SQLite connections and applies the embedded schema.
//! - [`layout`] reads the live table layout back out of SQLite.

pub mod connection;
pub mod layout;
pub mod model;
pub mod relation;
pub mod schema;

pub use connection::{
    create_pool, database_exists, establish, open_existing, run_migrations, run_migrations_on,
    DbPool,
};
pub use model::{
    Comment, Follower, NewComment, NewFollower, NewPost, NewUser, Post, User, UserChangeset,
};
