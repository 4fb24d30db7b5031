//! photofeed - relational data model for a photo-sharing social network.
//!
//! Four tables, mapped with the Diesel ORM onto SQLite:
//!
//! - **`user`** - identity and profile; unique username and email
//! - **`post`** - an image with an optional caption, owned by a user
//! - **`comment`** - text attached to a post, written by a user
//! - **`follower`** - a directed edge from a following user to a followed user
//!
//! # Modules
//!
//! - [`db`] - Schema, row types, relationship navigation, connection pooling
//! - [`credential`] - Argon2 hashing for the password column
//! - [`config`] - Configuration loading from TOML with environment overrides
//! - [`error`] - Error types for the crate
//! - [`cli`] - The `photofeed` operator binary
//!
//! # Example
//!
//! ```no_run
//! use photofeed::db::{establish, run_migrations_on, NewFollower, NewPost, NewUser};
//!
//! fn main() -> photofeed::error::Result<()> {
//!     let mut conn = establish("photofeed.db")?;
//!     run_migrations_on(&mut conn)?;
//!
//!     let alice = NewUser::with_password("alice", "a@x.com", "s3cret")?.insert(&mut conn)?;
//!     let bob = NewUser::with_password("bob", "b@x.com", "hunter2")?.insert(&mut conn)?;
//!     let post = NewPost::new(alice.id, "a.jpg").insert(&mut conn)?;
//!     NewFollower::new(alice.id, bob.id).insert(&mut conn)?;
//!
//!     assert_eq!(post.user(&mut conn)?, alice);
//!     assert_eq!(alice.follower_users(&mut conn)?, vec![bob]);
//!     Ok(())
//! }
//! ```

pub mod cli;
pub mod config;
pub mod credential;
pub mod db;
pub mod error;
