pub mod error;
pub mod value;

pub use error::{EngineError, QueryOperation, Result, StorageError};
pub use value::Value;
