//! Rating model

use super::serde_helpers;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use surrealdb::RecordId;
use validator::Validate;

/// One rating, at most one per (order, user) pair
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Rating {
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "serde_helpers::option_record_id"
    )]
    pub id: Option<RecordId>,
    #[serde(with = "serde_helpers::record_id")]
    pub outlet: RecordId,
    pub user: String,
    #[serde(with = "serde_helpers::record_id")]
    pub order: RecordId,
    pub rating: i32,
    #[serde(default)]
    pub comment: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Create payload; outlet/user linkage is validated against the order
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct RatingCreate {
    pub order_id: String,
    #[validate(range(min = 1, max = 5))]
    pub rating: i32,
    #[validate(length(max = 500))]
    pub comment: Option<String>,
}

/// Aggregate returned by the ratings endpoint
#[derive(Debug, Clone, Serialize)]
pub struct RatingSummary {
    pub ratings: Vec<Rating>,
    pub average_rating: f64,
    pub total_ratings: usize,
}

impl RatingSummary {
    pub fn from_ratings(ratings: Vec<Rating>) -> Self {
        let total_ratings = ratings.len();
        let average_rating = if total_ratings > 0 {
            let sum: i32 = ratings.iter().map(|r| r.rating).sum();
            // One decimal place, matching the storefront display
            (sum as f64 / total_ratings as f64 * 10.0).round() / 10.0
        } else {
            0.0
        };
        Self {
            ratings,
            average_rating,
            total_ratings,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use surrealdb::RecordId;

    fn rating(value: i32) -> Rating {
        Rating {
            id: None,
            outlet: RecordId::from_table_key("outlet", "o1"),
            user: "user:u1".to_string(),
            order: RecordId::from_table_key("order", "x"),
            rating: value,
            comment: None,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn summary_averages_to_one_decimal() {
        let summary = RatingSummary::from_ratings(vec![rating(5), rating(4), rating(4)]);
        assert_eq!(summary.total_ratings, 3);
        assert_eq!(summary.average_rating, 4.3);
    }

    #[test]
    fn empty_summary_is_zero() {
        let summary = RatingSummary::from_ratings(vec![]);
        assert_eq!(summary.total_ratings, 0);
        assert_eq!(summary.average_rating, 0.0);
    }
}
