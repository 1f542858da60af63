//! Partitioning of a date range into API-sized chunks

use crate::range::DateRange;
use chrono::{Days, NaiveDate};
use serde::Serialize;
use std::fmt;

/// Inclusive sub-interval of a [`DateRange`], fetched with a single request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Chunk {
    /// First day (inclusive)
    pub from: NaiveDate,
    /// Last day (inclusive)
    pub to: NaiveDate,
}

impl Chunk {
    /// `(to - from)` in whole days
    pub fn days(&self) -> i64 {
        (self.to - self.from).num_days()
    }
}

impl fmt::Display for Chunk {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} to {}", self.from, self.to)
    }
}

/// Iterator over the chunks of a range
///
/// Chunk *i* starts the day after chunk *i-1* ends and spans at most
/// `max_days`; the last chunk is cut at the range end. Every day of the range
/// lands in exactly one chunk.
///
/// ```
/// use chrono::NaiveDate;
/// use vessel_track_downloader::downloader::ChunkPlan;
/// use vessel_track_downloader::range::DateRange;
///
/// let today = NaiveDate::from_ymd_opt(2030, 1, 1).unwrap();
/// let range = DateRange::new("2022-01-01", "2022-01-10", today).unwrap();
/// let chunks: Vec<_> = ChunkPlan::new(&range, 4).collect();
/// assert_eq!(chunks.len(), 2);
/// assert_eq!(chunks[1].from.to_string(), "2022-01-06");
/// ```
#[derive(Debug, Clone)]
pub struct ChunkPlan {
    next_from: Option<NaiveDate>,
    end: NaiveDate,
    max_days: u32,
}

impl ChunkPlan {
    /// Plan chunks of at most `max_days` over `range`
    pub fn new(range: &DateRange, max_days: u32) -> Self {
        Self {
            next_from: Some(range.start()),
            end: range.end(),
            max_days,
        }
    }

    /// Chunks still to be yielded
    fn remaining(&self) -> usize {
        match self.next_from {
            Some(from) if from <= self.end => {
                let span = (self.end - from).num_days() as u64 + 1;
                let per_chunk = u64::from(self.max_days) + 1;
                span.div_ceil(per_chunk) as usize
            }
            _ => 0,
        }
    }
}

impl Iterator for ChunkPlan {
    type Item = Chunk;

    fn next(&mut self) -> Option<Chunk> {
        let from = self.next_from.filter(|from| *from <= self.end)?;

        let to = from
            .checked_add_days(Days::new(u64::from(self.max_days)))
            .map_or(self.end, |to| to.min(self.end));

        self.next_from = to.succ_opt();
        Some(Chunk { from, to })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.remaining();
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for ChunkPlan {}
