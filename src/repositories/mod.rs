pub mod filter;
pub mod review;

pub use filter::{FilterArgError, FilterCriteria, FilterQueryBuilder, ReviewPredicate};
pub use review::{
    InMemoryReviewRepository, ReviewField, ReviewRepositoryTrait, SqliteReviewRepository,
    StoreError,
};
