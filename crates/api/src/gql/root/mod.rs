pub mod mutation_root;
pub mod query_root;
