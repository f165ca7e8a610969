use std::io;

use thiserror::Error;

use crate::cursor::CursorError;

fn did_you_mean(suggestion: &Option<String>) -> String {
    match suggestion {
        Some(name) => format!(", did you mean {}?", name),
        None => String::new(),
    }
}

#[derive(Debug, Error)]
pub enum SocialError {
    #[error("invalid user name {0:?}")]
    InvalidUserName(String),
    #[error("a user named {0} already exists")]
    DuplicateUser(String),
    #[error("unknown user {name}{}", did_you_mean(.suggestion))]
    UnknownUser {
        name: String,
        suggestion: Option<String>,
    },
    #[error("{0} can't follow themselves")]
    SelfFollow(String),
    #[error("a post needs some text")]
    EmptyPost,
    #[error("failed to read seed data: {0}")]
    Io(#[from] io::Error),
    #[error("malformed seed data: {0}")]
    Json(#[from] serde_json::Error),
    #[error(transparent)]
    Cursor(#[from] CursorError),
}
