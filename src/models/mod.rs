// file: src/models/mod.rs
// description: data models module exports
// reference: internal module structure

pub mod endpoint;
pub mod page;
pub mod stage;

pub use endpoint::Endpoint;
pub use page::{DEFAULT_PAGE_SIZE, PageCursor, PageRequest};
pub use stage::Stage;
