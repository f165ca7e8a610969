use std::fs;
use std::path::Path;

use bk_tree::{BKTree, metrics};
use once_cell::sync::Lazy;
use regex::Regex;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::social::error::SocialError;
use crate::social::post::Post;
use crate::social::session::Session;
use crate::social::user::User;

static USER_NAME: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z][A-Za-z0-9_.-]{1,19}$").expect("user name pattern"));

// Max edit distance for "did you mean" suggestions.
const SUGGESTION_TOLERANCE: u32 = 2;

pub fn is_valid_user_name(name: &str) -> bool {
    USER_NAME.is_match(name)
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SeedData {
    pub users: Vec<SeedUser>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeedUser {
    pub name: String,
    #[serde(default)]
    pub following: Vec<String>,
    #[serde(default)]
    pub posts: Vec<Post>,
}

/// Every known user, looked up by name.
pub struct Directory {
    users: FxHashMap<String, User>,
    names: BKTree<String>,
}

impl Default for Directory {
    fn default() -> Self {
        Self::new()
    }
}

impl Directory {
    pub fn new() -> Self {
        Self {
            users: FxHashMap::default(),
            names: BKTree::new(metrics::Levenshtein),
        }
    }

    pub fn from_seed(seed: SeedData) -> Result<Self, SocialError> {
        let mut directory = Directory::new();
        for user in &seed.users {
            directory.add_user(&user.name)?;
        }
        for user in seed.users {
            for post in user.posts {
                directory.publish_post(&user.name, post)?;
            }
            for followed in &user.following {
                directory.follow(&user.name, followed)?;
            }
        }
        Ok(directory)
    }

    pub fn load_seed(path: impl AsRef<Path>) -> Result<Self, SocialError> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path)?;
        let seed: SeedData = serde_json::from_str(&contents)?;
        let directory = Self::from_seed(seed)?;
        info!(
            path = %path.display(),
            users = directory.len(),
            "loaded seed data"
        );
        Ok(directory)
    }

    pub fn len(&self) -> usize {
        self.users.len()
    }

    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }

    pub fn has_user(&self, name: &str) -> bool {
        self.users.contains_key(name)
    }

    pub fn add_user(&mut self, name: &str) -> Result<&User, SocialError> {
        if !is_valid_user_name(name) {
            return Err(SocialError::InvalidUserName(name.to_string()));
        }
        if self.has_user(name) {
            return Err(SocialError::DuplicateUser(name.to_string()));
        }
        self.names.add(name.to_string());
        debug!(name, "user added");
        Ok(self
            .users
            .entry(name.to_string())
            .or_insert_with(|| User::new(name)))
    }

    pub fn get_user(&self, name: &str) -> Result<&User, SocialError> {
        self.users.get(name).ok_or_else(|| self.unknown(name))
    }

    fn get_user_mut(&mut self, name: &str) -> Result<&mut User, SocialError> {
        // the suggestion needs `&self`, so it is worked out before borrowing mutably
        let suggestion = if self.users.contains_key(name) {
            None
        } else {
            self.suggest(name)
        };
        self.users
            .get_mut(name)
            .ok_or_else(|| SocialError::UnknownUser {
                name: name.to_string(),
                suggestion,
            })
    }

    fn unknown(&self, name: &str) -> SocialError {
        SocialError::UnknownUser {
            name: name.to_string(),
            suggestion: self.suggest(name),
        }
    }

    /// Closest known name within a small edit distance, ties broken alphabetically.
    pub fn suggest(&self, name: &str) -> Option<String> {
        self.names
            .find(name, SUGGESTION_TOLERANCE)
            .filter(|(distance, _)| *distance > 0)
            .min_by(|(d1, n1), (d2, n2)| d1.cmp(d2).then_with(|| n1.cmp(n2)))
            .map(|(_, found)| found.clone())
    }

    /// Sorted list of every user name.
    pub fn user_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.users.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    pub fn publish(&mut self, author: &str, text: &str) -> Result<(), SocialError> {
        if text.trim().is_empty() {
            return Err(SocialError::EmptyPost);
        }
        self.publish_post(author, Post::new(text))
    }

    pub fn publish_post(&mut self, author: &str, post: Post) -> Result<(), SocialError> {
        let user = self.get_user_mut(author)?;
        debug!(author, created_at = post.created_at(), "post published");
        user.add_post(post);
        Ok(())
    }

    /// Returns false if the subscription already existed.
    pub fn follow(&mut self, follower: &str, followed: &str) -> Result<bool, SocialError> {
        if follower == followed {
            return Err(SocialError::SelfFollow(follower.to_string()));
        }
        if !self.has_user(followed) {
            return Err(self.unknown(followed));
        }
        let added = self.get_user_mut(follower)?.follow(followed);
        debug!(follower, followed, added, "follow");
        Ok(added)
    }

    /// Returns false if there was no such subscription.
    pub fn unfollow(&mut self, follower: &str, followed: &str) -> Result<bool, SocialError> {
        let removed = self.get_user_mut(follower)?.unfollow(followed);
        debug!(follower, followed, removed, "unfollow");
        Ok(removed)
    }

    /// Opens a session on behalf of `name`. No credentials are involved.
    pub fn login(&self, name: &str) -> Result<Session<'_>, SocialError> {
        let user = self.get_user(name)?;
        Ok(Session::new(self, user))
    }
}
