pub mod directory;
pub mod error;
pub mod post;
pub mod session;
pub mod user;

pub use directory::{Directory, SeedData, SeedUser};
pub use error::SocialError;
pub use post::Post;
pub use session::{NewsFeed, NewsFeedNavigator, Session};
pub use user::User;
