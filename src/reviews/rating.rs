/// Pure rating aggregation helpers.
pub struct RatingCalculator;

impl RatingCalculator {
    /// Bucket ratings into a 1..=5 star histogram. Ratings outside that
    /// range are ignored rather than skewing a bucket.
    pub fn distribution<I>(ratings: I) -> [u64; 5]
    where
        I: IntoIterator<Item = i16>,
    {
        let mut buckets = [0u64; 5];
        for rating in ratings {
            if (1..=5).contains(&rating) {
                buckets[(rating - 1) as usize] += 1;
            }
        }
        buckets
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_distribution_buckets_ratings() {
        let dist = RatingCalculator::distribution(vec![1, 5, 5, 3, 4, 5]);
        assert_eq!(dist, [1, 0, 1, 1, 3]);
    }

    #[test]
    fn test_distribution_of_empty_input_is_all_zeros() {
        let dist = RatingCalculator::distribution(vec![]);
        assert_eq!(dist, [0, 0, 0, 0, 0]);
    }

    #[test]
    fn test_out_of_range_ratings_are_ignored() {
        let dist = RatingCalculator::distribution(vec![0, 6, -3, 2, 100]);
        assert_eq!(dist, [0, 1, 0, 0, 0]);
    }

    #[cfg(test)]
    mod property_tests {
        use super::*;
        use proptest::prelude::*;

        /// Bucket counts sum to the number of in-range ratings.
        #[test]
        fn prop_buckets_sum_to_in_range_count() {
            proptest!(|(ratings in prop::collection::vec(-2i16..=8, 0..200))| {
                let in_range = ratings.iter().filter(|r| (1..=5).contains(*r)).count() as u64;
                let dist = RatingCalculator::distribution(ratings);
                prop_assert_eq!(dist.iter().sum::<u64>(), in_range);
            });
        }
    }
}
