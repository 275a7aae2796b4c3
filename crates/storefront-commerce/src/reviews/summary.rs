//! Rating aggregation.

use serde::Serialize;

use crate::ids::ProductId;
use crate::reviews::{Review, MAX_RATING};

/// Mean of the ratings above zero, or `None` when there are none.
///
/// Not rounded; round at display time.
pub fn average_rating(reviews: &[Review]) -> Option<f64> {
    let (sum, count) = reviews
        .iter()
        .filter(|review| review.is_rated())
        .fold((0_i64, 0_u32), |(sum, count), review| {
            (sum + i64::from(review.rating), count + 1)
        });

    if count == 0 {
        None
    } else {
        Some(sum as f64 / f64::from(count))
    }
}

/// Which of the five stars are filled for a rating. Star `n` (1-based) is
/// filled when `n <= rating`.
pub fn star_fill(rating: f64) -> [bool; MAX_RATING as usize] {
    std::array::from_fn(|i| (i + 1) as f64 <= rating)
}

/// Distribution of ratings (1-5 stars).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct RatingDistribution {
    pub five_star: u32,
    pub four_star: u32,
    pub three_star: u32,
    pub two_star: u32,
    pub one_star: u32,
}

impl RatingDistribution {
    fn record(&mut self, rating: i32) {
        match rating {
            5 => self.five_star += 1,
            4 => self.four_star += 1,
            3 => self.three_star += 1,
            2 => self.two_star += 1,
            1 => self.one_star += 1,
            _ => {}
        }
    }

    pub fn count(&self, stars: u8) -> u32 {
        match stars {
            5 => self.five_star,
            4 => self.four_star,
            3 => self.three_star,
            2 => self.two_star,
            1 => self.one_star,
            _ => 0,
        }
    }

    /// Share of `total` reviews at this star level, 0-100.
    pub fn percentage(&self, stars: u8, total: u32) -> f32 {
        if total == 0 {
            return 0.0;
        }
        (self.count(stars) as f32 / total as f32) * 100.0
    }
}

/// Per-product review summary.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReviewSummary {
    pub product_id: ProductId,
    pub average_rating: Option<f64>,
    /// Reviews with a rating above zero.
    pub total_reviews: u32,
    pub rating_distribution: RatingDistribution,
}

impl ReviewSummary {
    /// Summarize the reviews that belong to `product_id`; others are
    /// ignored.
    pub fn from_reviews(product_id: ProductId, reviews: &[Review]) -> Self {
        let own: Vec<Review> = reviews
            .iter()
            .filter(|review| review.product_id == product_id)
            .cloned()
            .collect();

        let mut rating_distribution = RatingDistribution::default();
        for review in own.iter().filter(|review| review.is_rated()) {
            rating_distribution.record(review.rating);
        }

        Self {
            average_rating: average_rating(&own),
            total_reviews: own.iter().filter(|review| review.is_rated()).count() as u32,
            product_id,
            rating_distribution,
        }
    }

    /// Average rounded to one decimal for display (e.g., "4.5").
    pub fn display_average(&self) -> Option<String> {
        self.average_rating.map(|avg| format!("{avg:.1}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rated(rating: i32) -> Review {
        Review::new(format!("r{rating}"), "lamp", "text", rating)
    }

    #[test]
    fn test_average_rating_empty() {
        assert_eq!(average_rating(&[]), None);
    }

    #[test]
    fn test_average_rating_ignores_unrated() {
        assert_eq!(average_rating(&[rated(0)]), None);
        assert_eq!(average_rating(&[rated(0), rated(-2), rated(3)]), Some(3.0));
    }

    #[test]
    fn test_average_rating_mean() {
        assert_eq!(average_rating(&[rated(4), rated(5)]), Some(4.5));
        let avg = average_rating(&[rated(5), rated(4), rated(4)]).unwrap();
        assert!((avg - 13.0 / 3.0).abs() < 1e-12);
    }

    #[test]
    fn test_star_fill() {
        assert_eq!(star_fill(4.0), [true, true, true, true, false]);
        assert_eq!(star_fill(0.0), [false; 5]);
        assert_eq!(star_fill(4.5), [true, true, true, true, false]);
    }

    #[test]
    fn test_summary() {
        let mut other = rated(1);
        other.product_id = ProductId::new("sofa");
        let reviews = vec![rated(5), rated(5), rated(3), rated(0), other];

        let summary = ReviewSummary::from_reviews(ProductId::new("lamp"), &reviews);
        assert_eq!(summary.total_reviews, 3);
        assert_eq!(summary.rating_distribution.five_star, 2);
        assert_eq!(summary.rating_distribution.one_star, 0);
        assert_eq!(summary.display_average().as_deref(), Some("4.3"));
        assert!((summary.rating_distribution.percentage(3, summary.total_reviews) - 33.333).abs() < 0.01);
        assert_eq!(summary.rating_distribution.percentage(4, 0), 0.0);
    }
}
