use async_graphql::MergedObject;

use crate::gql::domains::matches::MatchMutation;
use crate::gql::domains::standings::StandingsMutation;
use crate::gql::domains::teams::TeamMutation;
use crate::gql::domains::tournaments::TournamentMutation;

#[derive(MergedObject, Default)]
pub struct MutationRoot(MatchMutation, StandingsMutation, TeamMutation, TournamentMutation);
