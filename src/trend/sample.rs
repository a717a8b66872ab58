//! Uniform subsampling of candidate profile URLs.

use rand::Rng;
use rand::seq::SliceRandom;

/// Pick `limit` URLs uniformly at random without replacement.
///
/// With no limit, or a limit at least as large as the list, the list is returned as-is in
/// its original order. Otherwise a shuffled index permutation is truncated to `limit`.
pub fn sample_urls<R: Rng + ?Sized>(urls: &[String], limit: Option<usize>, rng: &mut R) -> Vec<String> {
    let limit = match limit {
        Some(limit) if limit < urls.len() => limit,
        _ => return urls.to_vec(),
    };

    let mut ordering: Vec<usize> = (0..urls.len()).collect();
    ordering.shuffle(rng);
    ordering[..limit].iter().map(|&i| urls[i].clone()).collect()
}
