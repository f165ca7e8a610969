use crate::cursor::SliceCursor;
use crate::fusion::{FusionCursor, MergeOrder};
use crate::navigator::FeedNavigator;
use crate::social::directory::Directory;
use crate::social::error::SocialError;
use crate::social::post::{Post, post_date};
use crate::social::user::User;

pub type PostKey = fn(&&Post) -> u64;

/// Newest-first fusion of post lists, attributed by author name.
pub type NewsFeed<'a> = FusionCursor<&'a str, SliceCursor<'a, Post>, PostKey>;

pub type NewsFeedNavigator<'a> = FeedNavigator<&'a str, SliceCursor<'a, Post>, PostKey>;

/// The logged-in user together with the directory used to resolve the
/// accounts they follow.
#[derive(Clone, Copy)]
pub struct Session<'a> {
    directory: &'a Directory,
    user: &'a User,
}

impl<'a> Session<'a> {
    pub fn new(directory: &'a Directory, user: &'a User) -> Self {
        Self { directory, user }
    }

    pub fn user(&self) -> &'a User {
        self.user
    }

    pub fn directory(&self) -> &'a Directory {
        self.directory
    }

    /// The user's own posts plus the posts of everyone they follow. Equal
    /// timestamps resolve to the user's own post first, then by follow order.
    pub fn news_feed(&self) -> Result<NewsFeed<'a>, SocialError> {
        let mut sources = Vec::with_capacity(self.user.following().len() + 1);
        sources.push((self.user.name(), self.user.post_cursor()));
        for followed in self.user.following() {
            let author = self.directory.get_user(followed)?;
            sources.push((author.name(), author.post_cursor()));
        }
        Ok(FusionCursor::try_new(
            sources,
            MergeOrder::Descending,
            post_date as PostKey,
        )?)
    }

    /// The user's own posts only.
    pub fn timeline(&self) -> NewsFeed<'a> {
        FusionCursor::new(
            vec![(self.user.name(), self.user.post_cursor())],
            MergeOrder::Descending,
            post_date as PostKey,
        )
    }

    pub fn news_feed_navigator(&self) -> Result<NewsFeedNavigator<'a>, SocialError> {
        Ok(FeedNavigator::new(self.news_feed()?))
    }

    pub fn timeline_navigator(&self) -> NewsFeedNavigator<'a> {
        FeedNavigator::new(self.timeline())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cursor::BidirectionalCursor;

    fn sample_directory() -> Directory {
        let mut directory = Directory::new();
        for name in ["alice", "bob", "carol"] {
            directory.add_user(name).unwrap();
        }
        directory.publish_post("alice", Post::at("alice old", 10)).unwrap();
        directory.publish_post("alice", Post::at("alice new", 40)).unwrap();
        directory.publish_post("bob", Post::at("bob", 30)).unwrap();
        directory.publish_post("carol", Post::at("carol", 20)).unwrap();
        directory.publish_post("carol", Post::at("carol tie", 40)).unwrap();
        directory.follow("alice", "carol").unwrap();
        directory
    }

    fn drain(feed: &mut NewsFeed<'_>) -> Vec<(String, String)> {
        let mut seen = Vec::new();
        while let Ok(post) = feed.next() {
            seen.push((feed.last_source().unwrap().to_string(), post.text().to_string()));
        }
        seen
    }

    #[test]
    fn test_news_feed_merges_own_and_followed_posts() {
        let directory = sample_directory();
        let session = directory.login("alice").unwrap();
        let mut feed = session.news_feed().unwrap();

        assert_eq!(feed.source_count(), 2);
        let seen = drain(&mut feed);
        let expected = vec![
            ("alice", "alice new"),
            ("carol", "carol tie"),
            ("carol", "carol"),
            ("alice", "alice old"),
        ];
        assert_eq!(
            seen,
            expected
                .into_iter()
                .map(|(a, t)| (a.to_string(), t.to_string()))
                .collect::<Vec<_>>()
        );
    }

    #[test]
    fn test_unfollowed_users_are_not_in_feed() {
        let mut directory = sample_directory();
        directory.unfollow("alice", "carol").unwrap();
        directory.follow("alice", "bob").unwrap();
        let session = directory.login("alice").unwrap();

        let authors: Vec<String> = drain(&mut session.news_feed().unwrap())
            .into_iter()
            .map(|(author, _)| author)
            .collect();
        assert_eq!(authors, vec!["alice", "bob", "alice"]);
    }

    #[test]
    fn test_timeline_has_only_own_posts() {
        let directory = sample_directory();
        let session = directory.login("carol").unwrap();

        let seen = drain(&mut session.timeline());
        assert_eq!(seen.len(), 2);
        assert!(seen.iter().all(|(author, _)| author == "carol"));
    }

    #[test]
    fn test_user_without_posts_or_follows() {
        let mut directory = Directory::new();
        directory.add_user("dave").unwrap();
        let session = directory.login("dave").unwrap();
        let mut feed = session.news_feed().unwrap();

        assert!(!feed.has_next());
        assert!(!feed.has_previous());
        assert!(feed.next().is_err());
    }

    #[test]
    fn test_login_unknown_user() {
        let directory = sample_directory();
        assert!(matches!(
            directory.login("bobb"),
            Err(SocialError::UnknownUser { .. })
        ));
    }
}
