//! Relationship navigation in both directions.
//!
//! Forward traversals follow a foreign key to its parent row
//! (`Post::user`); back-references collect the children pointing at a row
//! (`User::posts`). Results are ordered by primary key.
//!
//! `follower` points at `user` twice. `user_id` is the followed party and
//! `follower_id` the following party, so `User::followers` and
//! `User::following` select on different columns of the same table.

use diesel::prelude::*;
use diesel::SqliteConnection;

use super::model::{Comment, Follower, Post, User};
use super::schema::{comment, follower, post, user};
use crate::error::Result;

impl User {
    pub fn posts(&self, conn: &mut SqliteConnection) -> Result<Vec<Post>> {
        Ok(Post::belonging_to(self)
            .select(Post::as_select())
            .order(post::id)
            .load(conn)?)
    }

    pub fn comments(&self, conn: &mut SqliteConnection) -> Result<Vec<Comment>> {
        Ok(Comment::belonging_to(self)
            .select(Comment::as_select())
            .order(comment::id)
            .load(conn)?)
    }

    /// Edges in which this user is the one being followed.
    pub fn followers(&self, conn: &mut SqliteConnection) -> Result<Vec<Follower>> {
        Ok(Follower::belonging_to(self)
            .select(Follower::as_select())
            .order(follower::id)
            .load(conn)?)
    }

    /// Edges in which this user is the one following.
    pub fn following(&self, conn: &mut SqliteConnection) -> Result<Vec<Follower>> {
        Ok(follower::table
            .filter(follower::follower_id.eq(self.id))
            .select(Follower::as_select())
            .order(follower::id)
            .load(conn)?)
    }

    /// Users who follow this user.
    pub fn follower_users(&self, conn: &mut SqliteConnection) -> Result<Vec<User>> {
        let following_ids = follower::table
            .filter(follower::user_id.eq(self.id))
            .select(follower::follower_id);

        Ok(user::table
            .filter(user::id.eq_any(following_ids))
            .select(User::as_select())
            .order(user::id)
            .load(conn)?)
    }

    /// Users this user follows.
    pub fn followed_users(&self, conn: &mut SqliteConnection) -> Result<Vec<User>> {
        Ok(follower::table
            .inner_join(user::table)
            .filter(follower::follower_id.eq(self.id))
            .select(User::as_select())
            .order(user::id)
            .load(conn)?)
    }
}

impl Post {
    /// The author.
    pub fn user(&self, conn: &mut SqliteConnection) -> Result<User> {
        User::find(conn, self.user_id)
    }

    pub fn comments(&self, conn: &mut SqliteConnection) -> Result<Vec<Comment>> {
        Ok(Comment::belonging_to(self)
            .select(Comment::as_select())
            .order(comment::id)
            .load(conn)?)
    }

    /// Comments paired with their authors, in one query.
    pub fn comments_with_authors(
        &self,
        conn: &mut SqliteConnection,
    ) -> Result<Vec<(Comment, User)>> {
        Ok(comment::table
            .inner_join(user::table)
            .filter(comment::post_id.eq(self.id))
            .select((Comment::as_select(), User::as_select()))
            .order(comment::id)
            .load(conn)?)
    }
}

impl Comment {
    pub fn post(&self, conn: &mut SqliteConnection) -> Result<Post> {
        Ok(post::table
            .find(self.post_id)
            .select(Post::as_select())
            .first(conn)?)
    }

    /// The author.
    pub fn user(&self, conn: &mut SqliteConnection) -> Result<User> {
        User::find(conn, self.user_id)
    }
}

impl Follower {
    /// The followed user.
    pub fn user(&self, conn: &mut SqliteConnection) -> Result<User> {
        User::find(conn, self.user_id)
    }

    /// The following user.
    pub fn follower(&self, conn: &mut SqliteConnection) -> Result<User> {
        User::find(conn, self.follower_id)
    }
}

/// Each user paired with their posts, using one query for all posts.
pub fn posts_by_user(
    conn: &mut SqliteConnection,
    users: &[User],
) -> Result<Vec<(User, Vec<Post>)>> {
    let posts = Post::belonging_to(users)
        .select(Post::as_select())
        .order(post::id)
        .load(conn)?;

    Ok(users
        .iter()
        .cloned()
        .zip(posts.grouped_by(users))
        .collect())
}

/// Each post paired with its comments, using one query for all comments.
pub fn comments_by_post(
    conn: &mut SqliteConnection,
    posts: &[Post],
) -> Result<Vec<(Post, Vec<Comment>)>> {
    let comments = Comment::belonging_to(posts)
        .select(Comment::as_select())
        .order(comment::id)
        .load(conn)?;

    Ok(posts
        .iter()
        .cloned()
        .zip(comments.grouped_by(posts))
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::connection::{establish, run_migrations_on};
    use crate::db::model::{NewComment, NewFollower, NewPost, NewUser};

    fn conn() -> SqliteConnection {
        let mut conn = establish(":memory:").unwrap();
        run_migrations_on(&mut conn).unwrap();
        conn
    }

    fn create_user(conn: &mut SqliteConnection, name: &str) -> User {
        NewUser::new(name, format!("{name}@x.com"), "pw")
            .insert(conn)
            .unwrap()
    }

    #[test]
    fn post_round_trips_through_its_author() {
        let mut conn = conn();
        let alice = create_user(&mut conn, "alice");
        let post = NewPost::new(alice.id, "a.jpg").insert(&mut conn).unwrap();

        assert_eq!(post.user(&mut conn).unwrap(), alice);
        assert_eq!(alice.posts(&mut conn).unwrap(), vec![post.clone()]);

        for p in alice.posts(&mut conn).unwrap() {
            assert_eq!(p.user(&mut conn).unwrap(), alice);
        }
    }

    #[test]
    fn user_without_children_has_empty_collections() {
        let mut conn = conn();
        let carol = create_user(&mut conn, "carol");

        assert!(carol.posts(&mut conn).unwrap().is_empty());
        assert!(carol.comments(&mut conn).unwrap().is_empty());
        assert!(carol.followers(&mut conn).unwrap().is_empty());
        assert!(carol.following(&mut conn).unwrap().is_empty());
    }

    #[test]
    fn comment_links_post_and_author() {
        let mut conn = conn();
        let alice = create_user(&mut conn, "alice");
        let bob = create_user(&mut conn, "bob");
        let post = NewPost::new(alice.id, "a.jpg").insert(&mut conn).unwrap();
        let comment = NewComment::new(post.id, bob.id, "great shot")
            .insert(&mut conn)
            .unwrap();

        assert_eq!(comment.post(&mut conn).unwrap(), post);
        assert_eq!(comment.user(&mut conn).unwrap(), bob);
        assert_eq!(post.comments(&mut conn).unwrap(), vec![comment.clone()]);
        assert_eq!(bob.comments(&mut conn).unwrap(), vec![comment.clone()]);
        assert!(alice.comments(&mut conn).unwrap().is_empty());

        let with_authors = post.comments_with_authors(&mut conn).unwrap();
        assert_eq!(with_authors, vec![(comment, bob)]);
    }

    #[test]
    fn follower_roles_are_disambiguated() {
        let mut conn = conn();
        let alice = create_user(&mut conn, "alice");
        let bob = create_user(&mut conn, "bob");
        let edge = NewFollower::new(alice.id, bob.id).insert(&mut conn).unwrap();

        assert_eq!(alice.followers(&mut conn).unwrap(), vec![edge.clone()]);
        assert!(alice.following(&mut conn).unwrap().is_empty());
        assert_eq!(bob.following(&mut conn).unwrap(), vec![edge.clone()]);
        assert!(bob.followers(&mut conn).unwrap().is_empty());

        assert_eq!(edge.user(&mut conn).unwrap(), alice);
        assert_eq!(edge.follower(&mut conn).unwrap(), bob);

        assert_eq!(alice.follower_users(&mut conn).unwrap(), vec![bob.clone()]);
        assert_eq!(bob.followed_users(&mut conn).unwrap(), vec![alice.clone()]);
        assert!(alice.followed_users(&mut conn).unwrap().is_empty());
        assert!(bob.follower_users(&mut conn).unwrap().is_empty());
    }

    #[test]
    fn mutual_follow_creates_two_edges() {
        let mut conn = conn();
        let alice = create_user(&mut conn, "alice");
        let bob = create_user(&mut conn, "bob");
        NewFollower::new(alice.id, bob.id).insert(&mut conn).unwrap();
        NewFollower::new(bob.id, alice.id).insert(&mut conn).unwrap();

        assert_eq!(alice.followers(&mut conn).unwrap().len(), 1);
        assert_eq!(alice.following(&mut conn).unwrap().len(), 1);
        assert_eq!(alice.follower_users(&mut conn).unwrap(), vec![bob.clone()]);
        assert_eq!(alice.followed_users(&mut conn).unwrap(), vec![bob]);
    }

    #[test]
    fn posts_by_user_groups_in_input_order() {
        let mut conn = conn();
        let alice = create_user(&mut conn, "alice");
        let bob = create_user(&mut conn, "bob");
        let carol = create_user(&mut conn, "carol");
        let a1 = NewPost::new(alice.id, "a1.jpg").insert(&mut conn).unwrap();
        let b1 = NewPost::new(bob.id, "b1.jpg").insert(&mut conn).unwrap();
        let a2 = NewPost::new(alice.id, "a2.jpg").insert(&mut conn).unwrap();

        let grouped =
            posts_by_user(&mut conn, &[bob.clone(), alice.clone(), carol.clone()]).unwrap();

        assert_eq!(
            grouped,
            vec![(bob, vec![b1]), (alice, vec![a1, a2]), (carol, vec![])]
        );
    }

    #[test]
    fn comments_by_post_groups_each_post() {
        let mut conn = conn();
        let alice = create_user(&mut conn, "alice");
        let p1 = NewPost::new(alice.id, "1.jpg").insert(&mut conn).unwrap();
        let p2 = NewPost::new(alice.id, "2.jpg").insert(&mut conn).unwrap();
        let c1 = NewComment::new(p2.id, alice.id, "first").insert(&mut conn).unwrap();
        let c2 = NewComment::new(p2.id, alice.id, "second").insert(&mut conn).unwrap();

        let grouped = comments_by_post(&mut conn, &[p1.clone(), p2.clone()]).unwrap();

        assert_eq!(grouped, vec![(p1, vec![]), (p2, vec![c1, c2])]);
    }

    #[test]
    fn batch_helpers_accept_empty_input() {
        let mut conn = conn();
        assert!(posts_by_user(&mut conn, &[]).unwrap().is_empty());
        assert!(comments_by_post(&mut conn, &[]).unwrap().is_empty());
    }
}
