use async_graphql::{InputObject, OutputType, SimpleObject};
use infra::pagination::LimitOffset;

/// Upper bound applied to every client-supplied page size or list limit.
pub const MAX_PAGE_SIZE: i32 = 100;

#[derive(InputObject, Clone, Copy, Debug, Default)]
pub struct PaginationInput {
    pub limit: Option<i32>,
    pub offset: Option<i32>,
}

impl PaginationInput {
    pub fn to_limit_offset(&self) -> LimitOffset {
        LimitOffset {
            limit: clamp_limit(self.limit, 50),
            offset: self.offset.unwrap_or(0).max(0) as i64,
        }
    }
}

/// Clamp an optional limit into `1..=MAX_PAGE_SIZE`.
pub fn clamp_limit(limit: Option<i32>, default: i32) -> i64 {
    limit.unwrap_or(default).clamp(1, MAX_PAGE_SIZE) as i64
}

#[derive(SimpleObject)]
#[graphql(concrete(name = "TournamentPage", params(crate::gql::domains::tournaments::types::Tournament)))]
pub struct PaginatedResponse<T: OutputType> {
    pub items: Vec<T>,
    pub total_count: i32,
    pub page_size: i32,
    pub offset: i32,
    pub has_next_page: bool,
}
