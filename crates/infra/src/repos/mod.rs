pub mod goals;
pub mod matches;
pub mod player_bookings;
pub mod players;
pub mod teams;
pub mod tournament_teams;
pub mod tournaments;

pub use goals::ScorerEntry;
pub use matches::{CreateMatch, UpdateMatchResult};
pub use player_bookings::CardCount;
pub use tournament_teams::StandingsCounters;
pub use tournaments::{CreateTournamentData, TournamentRepo, UpdateTournamentData};
