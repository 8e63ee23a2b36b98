//! Aggregate statistics over the whole store.

use serde::{Deserialize, Serialize};

use crate::model::{Grade, Record, MAX_OVERALL_TOTAL};
use crate::store::Store;

/// Class-wide figures for a non-empty store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Summary {
    pub count: usize,
    pub mean_total: f64,
    pub mean_percentage: f64,
    pub highest_total: u64,
    pub lowest_total: u64,
    /// Count per grade, best grade first. Every grade is present.
    pub grade_distribution: Vec<GradeCount>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GradeCount {
    pub grade: Grade,
    pub count: usize,
}

impl Summary {
    /// Compute the summary, or `None` for an empty store.
    pub fn of(store: &Store) -> Option<Self> {
        let highest_total = store.highest()?.total;
        let lowest_total = store.lowest()?.total;

        let count = store.len();
        let sum: u64 = store.iter().map(Record::overall_total).sum();
        let mean_total = sum as f64 / count as f64;

        let grade_distribution = Grade::ALL
            .iter()
            .map(|&grade| GradeCount {
                grade,
                count: store.iter().filter(|r| r.grade() == grade).count(),
            })
            .collect();

        Some(Self {
            count,
            mean_total,
            mean_percentage: mean_total / f64::from(MAX_OVERALL_TOTAL) * 100.0,
            highest_total,
            lowest_total,
            grade_distribution,
        })
    }

    pub fn count_for(&self, grade: Grade) -> usize {
        self.grade_distribution
            .iter()
            .find(|g| g.grade == grade)
            .map_or(0, |g| g.count)
    }
}
