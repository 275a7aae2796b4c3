//! Product reviews and rating aggregation.

mod review;
mod summary;

pub use review::{Review, ReviewDraft, MAX_RATING};
pub use summary::{average_rating, star_fill, RatingDistribution, ReviewSummary};
