pub mod refresh;
pub mod resolvers;
pub mod service;
pub mod store;
pub mod types;

pub use resolvers::{StandingsMutation, StandingsQuery};
