pub mod bidirectional;
pub mod error;
pub mod slice_cursor;

pub use bidirectional::BidirectionalCursor;
pub use error::{CursorError, Direction};
pub use slice_cursor::SliceCursor;
