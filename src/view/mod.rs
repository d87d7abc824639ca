pub mod directory;
pub mod filter;

pub use directory::{DirectoryView, DragState};
pub use filter::Filter;
