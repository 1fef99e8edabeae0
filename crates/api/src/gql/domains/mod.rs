// Each domain contains: mod.rs, resolvers.rs, types.rs and, where a workflow
// spans several repositories, service.rs.

pub mod matches;
pub mod players;
pub mod standings;
pub mod teams;
pub mod tournaments;
