use crate::cursor::SliceCursor;
use crate::social::post::Post;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    name: String,
    posts: Vec<Post>, // newest first
    following: Vec<String>, // in the order they were followed
}

impl User {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            posts: Vec::new(),
            following: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn posts(&self) -> &[Post] {
        &self.posts
    }

    pub fn post_cursor(&self) -> SliceCursor<'_, Post> {
        SliceCursor::new(&self.posts)
    }

    /// Inserts keeping the list newest-first. A post sharing a timestamp with
    /// existing ones goes in front of them.
    pub fn add_post(&mut self, post: Post) {
        let index = self
            .posts
            .partition_point(|existing| existing.created_at() > post.created_at());
        self.posts.insert(index, post);
    }

    pub fn following(&self) -> &[String] {
        &self.following
    }

    pub fn is_following(&self, name: &str) -> bool {
        self.following.iter().any(|followed| followed == name)
    }

    /// Returns false if `name` was already followed.
    pub fn follow(&mut self, name: &str) -> bool {
        if self.is_following(name) {
            return false;
        }
        self.following.push(name.to_string());
        true
    }

    /// Returns false if `name` was not followed.
    pub fn unfollow(&mut self, name: &str) -> bool {
        let before = self.following.len();
        self.following.retain(|followed| followed != name);
        self.following.len() != before
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_posts_stay_newest_first() {
        let mut user = User::new("alice");
        user.add_post(Post::at("b", 20));
        user.add_post(Post::at("a", 10));
        user.add_post(Post::at("c", 30));
        user.add_post(Post::at("b2", 20));

        let texts: Vec<&str> = user.posts().iter().map(|p| p.text()).collect();
        assert_eq!(texts, vec!["c", "b2", "b", "a"]);
        assert_eq!(user.post_cursor().len(), 4);
    }

    #[test]
    fn test_follow_and_unfollow() {
        let mut user = User::new("alice");
        assert!(user.follow("bob"));
        assert!(!user.follow("bob"));
        assert!(user.follow("carol"));
        assert_eq!(user.following(), &["bob".to_string(), "carol".to_string()]);

        assert!(user.unfollow("bob"));
        assert!(!user.unfollow("bob"));
        assert!(!user.is_following("bob"));
        assert!(user.is_following("carol"));
    }
}
