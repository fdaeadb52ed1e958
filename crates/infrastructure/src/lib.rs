pub mod memory;
pub mod object_store;
pub mod repository;
pub mod retry;
pub mod s3;

pub use memory::*;
pub use object_store::*;
pub use repository::*;
pub use retry::*;
pub use s3::*;
