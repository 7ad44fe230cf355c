//! Registration-count bucketing for the chart views.
//!
//! The backend answers aggregation queries with a sparse map keyed by
//! `"HH"` (per hour of a day) or `"HH:MM"` (per minute). The chart needs a
//! dense, ordered series over a fixed domain with zeros for missing
//! buckets.

use crate::error::{Result, RosterError};
use std::collections::BTreeMap;
use std::fmt;

/// Sparse mapping from bucket label to registration count.
pub type BucketMap = BTreeMap<String, u64>;

/// Headroom above the tallest bar.
pub const AXIS_HEADROOM: f64 = 1.25;

/// Axis ceiling used when every bucket is empty.
pub const MIN_AXIS_MAX: f64 = 1.0;

/// The set of labels a chart is drawn over.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BucketDomain {
    /// `"00"..="23"`
    Hours,
    /// `"00"..="59"` within the given hour
    Minutes { hour: u8 },
}

impl BucketDomain {
    /// Minute domain for `hour`, rejecting hours outside 0..=23.
    pub fn minutes(hour: u32) -> Result<Self> {
        if hour > 23 {
            return Err(RosterError::HourOutOfRange(hour));
        }
        Ok(BucketDomain::Minutes { hour: hour as u8 })
    }

    /// Labels along the horizontal axis, in order.
    pub fn labels(&self) -> Vec<String> {
        let count = match self {
            BucketDomain::Hours => 24,
            BucketDomain::Minutes { .. } => 60,
        };
        (0..count).map(|n| format!("{n:02}")).collect()
    }

    /// Key into the sparse map for an axis label.
    pub fn lookup_key(&self, label: &str) -> String {
        match self {
            BucketDomain::Hours => label.to_string(),
            BucketDomain::Minutes { hour } => format!("{hour:02}:{label}"),
        }
    }

    pub fn title(&self) -> String {
        match self {
            BucketDomain::Hours => "Registrations per hour".to_string(),
            BucketDomain::Minutes { hour } => {
                format!("Registrations per minute ({hour:02}:00-{hour:02}:59)")
            }
        }
    }
}

impl fmt::Display for BucketDomain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BucketDomain::Hours => f.write_str("hours"),
            BucketDomain::Minutes { hour } => write!(f, "minutes of {hour:02}:00"),
        }
    }
}

/// Dense chart series aligned to a [`BucketDomain`].
#[derive(Debug, Clone, PartialEq)]
pub struct DenseSeries {
    pub domain: BucketDomain,
    pub labels: Vec<String>,
    pub counts: Vec<u64>,
}

impl DenseSeries {
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    pub fn total(&self) -> u64 {
        self.counts.iter().sum()
    }

    pub fn max(&self) -> u64 {
        self.counts.iter().copied().max().unwrap_or(0)
    }

    /// Vertical-axis ceiling for this series.
    pub fn axis_max(&self) -> f64 {
        axis_max(&self.counts)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, u64)> {
        self.labels
            .iter()
            .map(String::as_str)
            .zip(self.counts.iter().copied())
    }
}

/// Fill `domain` from the sparse `buckets`, substituting 0 for absent labels.
pub fn reshape(buckets: &BucketMap, domain: BucketDomain) -> DenseSeries {
    let labels = domain.labels();
    let counts = labels
        .iter()
        .map(|label| {
            buckets
                .get(&domain.lookup_key(label))
                .copied()
                .unwrap_or(0)
        })
        .collect();

    DenseSeries {
        domain,
        labels,
        counts,
    }
}

/// `1.25 × max(counts)`, or [`MIN_AXIS_MAX`] when every count is zero.
pub fn axis_max(counts: &[u64]) -> f64 {
    let max = counts.iter().copied().max().unwrap_or(0);
    if max == 0 {
        MIN_AXIS_MAX
    } else {
        max as f64 * AXIS_HEADROOM
    }
}
