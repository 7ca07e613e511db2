//! Aggregate rating math for novels.
//!
//! A novel's displayed rating is the rounded mean of the nonzero ratings on
//! its comments (a rating of 0 means "review without a star rating" and is
//! excluded from the mean, but the comment still counts toward the review
//! count). Both storage implementations must agree with this module.

/// Compute the aggregate rating from a set of comment ratings.
///
/// Ratings of 0 are ignored. Returns 0 when no comment carries a rating.
pub fn aggregate_rating(ratings: &[i32]) -> i32 {
    let rated: Vec<i32> = ratings.iter().copied().filter(|r| *r > 0).collect();
    if rated.is_empty() {
        return 0;
    }
    let sum: i32 = rated.iter().sum();
    (f64::from(sum) / rated.len() as f64).round() as i32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_ratings_is_zero() {
        assert_eq!(aggregate_rating(&[]), 0);
        assert_eq!(aggregate_rating(&[0, 0, 0]), 0);
    }

    #[test]
    fn test_mean_rounds_half_up() {
        // (4 + 2) / 2 = 3
        assert_eq!(aggregate_rating(&[4, 2]), 3);
        // (4 + 3) / 2 = 3.5 -> 4
        assert_eq!(aggregate_rating(&[4, 3]), 4);
        // (5 + 4 + 4) / 3 = 4.33 -> 4
        assert_eq!(aggregate_rating(&[5, 4, 4]), 4);
    }

    #[test]
    fn test_zero_ratings_excluded_from_mean() {
        // The zeros are unrated reviews; only the 5 counts.
        assert_eq!(aggregate_rating(&[0, 5, 0]), 5);
    }

    #[test]
    fn test_single_rating() {
        assert_eq!(aggregate_rating(&[2]), 2);
    }
}
