pub mod error;
pub mod models;
pub mod payloads;
pub mod transform;

pub use error::NormalizeError;
pub use models::{FlatRecord, UNKNOWN_LANGUAGE};
pub use payloads::{PageInfo, RawNode, SearchPage};
pub use transform::{normalize_node, normalize_nodes};
