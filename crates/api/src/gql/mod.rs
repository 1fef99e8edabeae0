pub mod common;
pub mod domains;
pub mod error;
pub mod loaders;
pub mod root;
pub mod schema;
pub mod types;

pub use root::mutation_root::MutationRoot;
pub use root::query_root::QueryRoot;
pub use schema::{build_schema, AppSchema};
