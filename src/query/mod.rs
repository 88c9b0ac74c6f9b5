pub mod catalog;
pub mod ordering;
pub mod property;
pub mod registry;
pub mod vocabulary;

pub use catalog::PropertyCatalog;
pub use ordering::{Direction, QueryOrdering, render_order_by};
pub use property::QueryProperty;
pub use registry::{QueryPropertyRegistry, RegistryBuilder};
