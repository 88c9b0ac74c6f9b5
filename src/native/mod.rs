pub mod manager;
pub mod query;
pub mod spec;

pub use manager::{ManagerRegistry, NativeEntity, NativeQueryManager};
pub use query::{NativeQuery, execute_count, execute_list};
pub use spec::{NativeQueryRequest, NativeQuerySpec, Page};
