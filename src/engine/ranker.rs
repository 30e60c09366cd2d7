//! Candidate ranking.
//!
//! Ranking scores one query against every candidate key and remembers where
//! the best score was seen. Ties are broken by position: the earliest
//! candidate wins, because the running best only moves on a strictly greater
//! score.
//!
//! ```text
//! query "helo"
//!   [0] "hello hi"  0.67  <- best_index
//!   [1] "hi"        0.00
//!   [2] "help"      0.67  (tie, earlier wins)
//! ```

use super::similarity::similarity;

/// Score of one candidate for one query.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rating<'a> {
    pub target: &'a str,
    pub rating: f64,
}

/// Output of one ranking pass: ratings in candidate order plus the winner.
#[derive(Debug, Clone, PartialEq)]
pub struct Ranking<'a> {
    pub ratings: Vec<Rating<'a>>,
    pub best_index: usize,
}

impl<'a> Ranking<'a> {
    /// The winning rating.
    pub fn best(&self) -> Rating<'a> {
        self.ratings[self.best_index]
    }
}

/// Rate `query` against each of `candidates`.
///
/// Returns `None` when there is nothing to rank, since no best index exists.
pub fn rank<'a, I, S>(query: &str, candidates: I) -> Option<Ranking<'a>>
where
    I: IntoIterator<Item = &'a S>,
    S: AsRef<str> + ?Sized + 'a,
{
    let mut ratings: Vec<Rating<'a>> = Vec::new();
    let mut best_index = 0;

    for (idx, candidate) in candidates.into_iter().enumerate() {
        let target = candidate.as_ref();
        let rating = similarity(query, target);
        if idx > 0 && rating > ratings[best_index].rating {
            best_index = idx;
        }
        ratings.push(Rating { target, rating });
    }

    if ratings.is_empty() {
        return None;
    }

    Some(Ranking { ratings, best_index })
}
