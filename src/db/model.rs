//! Database model types for Diesel ORM.
//!
//! Each table has a queryable row type (`User`, `Post`, `Comment`,
//! `Follower`) and an insertable counterpart (`NewUser`, ...). Inserts go
//! through `insert`, which writes the row and reads it back so callers get
//! the surrogate key and any store-assigned defaults.

use chrono::{NaiveDateTime, Utc};
use diesel::prelude::*;
use diesel::SqliteConnection;

use super::schema::{comment, follower, post, user};
use crate::credential::hash_password;
use crate::error::{Error, Result};

/// Identity and profile record.
#[derive(Queryable, Selectable, Identifiable, Debug, Clone, PartialEq, Eq)]
#[diesel(table_name = user)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct User {
    pub id: i32,
    pub username: String,
    pub email: String,
    /// Opaque; whatever the writer stored.
    pub password: String,
    pub full_name: Option<String>,
    pub profile_picture: Option<String>,
    pub bio: Option<String>,
}

/// A piece of user-generated content.
#[derive(Queryable, Selectable, Identifiable, Associations, Debug, Clone, PartialEq, Eq)]
#[diesel(belongs_to(User))]
#[diesel(table_name = post)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct Post {
    pub id: i32,
    pub user_id: i32,
    pub image_url: String,
    pub caption: Option<String>,
    pub created_at: NaiveDateTime,
}

/// A reply attached to a post.
#[derive(Queryable, Selectable, Identifiable, Associations, Debug, Clone, PartialEq, Eq)]
#[diesel(belongs_to(Post))]
#[diesel(belongs_to(User))]
#[diesel(table_name = comment)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct Comment {
    pub id: i32,
    pub post_id: i32,
    pub user_id: i32,
    pub text: String,
    pub created_at: NaiveDateTime,
}

/// Directed edge: `follower_id` follows `user_id`.
///
/// Only the followed role is wired through `belongs_to`; the following role
/// is navigated by filtering on `follower_id` (see [`User::following`]).
#[derive(Queryable, Selectable, Identifiable, Associations, Debug, Clone, PartialEq, Eq)]
#[diesel(belongs_to(User, foreign_key = user_id))]
#[diesel(table_name = follower)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct Follower {
    pub id: i32,
    /// The followed user.
    pub user_id: i32,
    /// The following user.
    pub follower_id: i32,
}

/// Database row for a user (insertable).
#[derive(Insertable, Debug, Clone, PartialEq, Eq)]
#[diesel(table_name = user)]
pub struct NewUser {
    pub username: String,
    pub email: String,
    pub password: String,
    pub full_name: Option<String>,
    pub profile_picture: Option<String>,
    pub bio: Option<String>,
}

impl NewUser {
    /// A user whose password column holds `password` exactly as given.
    pub fn new(
        username: impl Into<String>,
        email: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self {
            username: username.into(),
            email: email.into(),
            password: password.into(),
            full_name: None,
            profile_picture: None,
            bio: None,
        }
    }

    /// A user whose password column holds an Argon2 hash of `password`.
    ///
    /// # Errors
    /// Returns an error if hashing fails.
    pub fn with_password(
        username: impl Into<String>,
        email: impl Into<String>,
        password: &str,
    ) -> Result<Self> {
        Ok(Self::new(username, email, hash_password(password)?))
    }

    #[must_use]
    pub fn full_name(mut self, full_name: impl Into<String>) -> Self {
        self.full_name = Some(full_name.into());
        self
    }

    #[must_use]
    pub fn profile_picture(mut self, profile_picture: impl Into<String>) -> Self {
        self.profile_picture = Some(profile_picture.into());
        self
    }

    #[must_use]
    pub fn bio(mut self, bio: impl Into<String>) -> Self {
        self.bio = Some(bio.into());
        self
    }

    /// Insert the row and return it as stored.
    ///
    /// # Errors
    /// Fails with a constraint violation on a duplicate username or email, or
    /// a value longer than its column allows.
    pub fn insert(&self, conn: &mut SqliteConnection) -> Result<User> {
        insert_and_fetch(
            conn,
            |conn| diesel::insert_into(user::table).values(self).execute(conn),
            |conn, id| user::table.find(id).select(User::as_select()).first(conn),
        )
    }
}

/// Database row for a post (insertable).
#[derive(Insertable, Debug, Clone, PartialEq, Eq)]
#[diesel(table_name = post)]
pub struct NewPost {
    pub user_id: i32,
    pub image_url: String,
    pub caption: Option<String>,
    pub created_at: NaiveDateTime,
}

impl NewPost {
    /// A post by `user_id`, stamped with the current UTC time.
    pub fn new(user_id: i32, image_url: impl Into<String>) -> Self {
        Self {
            user_id,
            image_url: image_url.into(),
            caption: None,
            created_at: Utc::now().naive_utc(),
        }
    }

    #[must_use]
    pub fn caption(mut self, caption: impl Into<String>) -> Self {
        self.caption = Some(caption.into());
        self
    }

    #[must_use]
    pub fn created_at(mut self, created_at: NaiveDateTime) -> Self {
        self.created_at = created_at;
        self
    }

    /// Insert the row and return it as stored.
    ///
    /// # Errors
    /// Fails with a constraint violation if `user_id` names no user.
    pub fn insert(&self, conn: &mut SqliteConnection) -> Result<Post> {
        insert_and_fetch(
            conn,
            |conn| diesel::insert_into(post::table).values(self).execute(conn),
            |conn, id| post::table.find(id).select(Post::as_select()).first(conn),
        )
    }
}

/// Database row for a comment (insertable).
#[derive(Insertable, Debug, Clone, PartialEq, Eq)]
#[diesel(table_name = comment)]
pub struct NewComment {
    pub post_id: i32,
    pub user_id: i32,
    pub text: String,
    pub created_at: NaiveDateTime,
}

impl NewComment {
    /// A comment by `user_id` on `post_id`, stamped with the current UTC time.
    pub fn new(post_id: i32, user_id: i32, text: impl Into<String>) -> Self {
        Self {
            post_id,
            user_id,
            text: text.into(),
            created_at: Utc::now().naive_utc(),
        }
    }

    #[must_use]
    pub fn created_at(mut self, created_at: NaiveDateTime) -> Self {
        self.created_at = created_at;
        self
    }

    /// Insert the row and return it as stored.
    ///
    /// # Errors
    /// Fails with a constraint violation if the post or user does not exist.
    pub fn insert(&self, conn: &mut SqliteConnection) -> Result<Comment> {
        insert_and_fetch(
            conn,
            |conn| diesel::insert_into(comment::table).values(self).execute(conn),
            |conn, id| comment::table.find(id).select(Comment::as_select()).first(conn),
        )
    }
}

/// Database row for a follower edge (insertable).
#[derive(Insertable, Debug, Clone, Copy, PartialEq, Eq)]
#[diesel(table_name = follower)]
pub struct NewFollower {
    pub user_id: i32,
    pub follower_id: i32,
}

impl NewFollower {
    /// `follower_id` starts following `user_id`.
    #[must_use]
    pub fn new(user_id: i32, follower_id: i32) -> Self {
        Self {
            user_id,
            follower_id,
        }
    }

    /// Insert the row and return it as stored.
    ///
    /// # Errors
    /// Fails with a constraint violation if either user is missing, the edge
    /// already exists, or both ids are the same user.
    pub fn insert(&self, conn: &mut SqliteConnection) -> Result<Follower> {
        insert_and_fetch(
            conn,
            |conn| diesel::insert_into(follower::table).values(self).execute(conn),
            |conn, id| follower::table.find(id).select(Follower::as_select()).first(conn),
        )
    }
}

/// Profile edit. `None` leaves a column untouched; for nullable columns
/// `Some(None)` clears it.
#[derive(AsChangeset, Debug, Clone, Default, PartialEq, Eq)]
#[diesel(table_name = user)]
pub struct UserChangeset {
    pub username: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
    pub full_name: Option<Option<String>>,
    pub profile_picture: Option<Option<String>>,
    pub bio: Option<Option<String>>,
}

impl UserChangeset {
    /// Replace the stored password with an Argon2 hash of `password`.
    ///
    /// # Errors
    /// Returns an error if hashing fails.
    pub fn with_password(mut self, password: &str) -> Result<Self> {
        self.password = Some(hash_password(password)?);
        Ok(self)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

impl User {
    /// # Errors
    /// Returns a not-found database error if no user has this id.
    pub fn find(conn: &mut SqliteConnection, id: i32) -> Result<User> {
        Ok(user::table
            .find(id)
            .select(User::as_select())
            .first(conn)?)
    }

    /// # Errors
    /// Returns an error if the query fails.
    pub fn find_by_username(conn: &mut SqliteConnection, username: &str) -> Result<Option<User>> {
        Ok(user::table
            .filter(user::username.eq(username))
            .select(User::as_select())
            .first(conn)
            .optional()?)
    }

    /// Apply a profile edit and return the row as stored afterwards.
    ///
    /// # Errors
    /// Fails with a constraint violation if the edit collides with another
    /// user's username or email.
    pub fn update(&self, conn: &mut SqliteConnection, changes: &UserChangeset) -> Result<User> {
        if !changes.is_empty() {
            diesel::update(self).set(changes).execute(conn)?;
        }
        User::find(conn, self.id)
    }
}

#[derive(QueryableByName)]
struct LastInsertRowId {
    #[diesel(sql_type = diesel::sql_types::BigInt)]
    #[diesel(column_name = "id")]
    id: i64,
}

/// Run `insert`, then load the inserted row by its rowid, atomically.
///
/// A rowid past `i32::MAX` rolls the insert back with
/// [`Error::IdOutOfRange`].
fn insert_and_fetch<T, I, F>(conn: &mut SqliteConnection, insert: I, fetch: F) -> Result<T>
where
    I: FnOnce(&mut SqliteConnection) -> QueryResult<usize>,
    F: FnOnce(&mut SqliteConnection, i32) -> QueryResult<T>,
{
    conn.transaction::<_, Error, _>(|conn| {
        insert(conn)?;
        let rowid = diesel::sql_query("SELECT last_insert_rowid() AS id")
            .get_result::<LastInsertRowId>(conn)?
            .id;
        let id = i32::try_from(rowid).map_err(|_| Error::IdOutOfRange(rowid))?;
        Ok(fetch(conn, id)?)
    })
}
