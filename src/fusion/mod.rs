pub mod fusion_cursor;

pub use fusion_cursor::{FusionCursor, MergeOrder};
