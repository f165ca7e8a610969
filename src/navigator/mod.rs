pub mod feed_navigator;

pub use feed_navigator::FeedNavigator;
