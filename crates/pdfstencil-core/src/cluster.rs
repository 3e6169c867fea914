//! Greedy word-to-line clustering for the clustered-words detection
//! strategy.
//!
//! Words are grouped by the vertical center of their boxes: a word joins
//! the first cluster whose key center lies within
//! [`LINE_CLUSTER_TOLERANCE`], else it opens a new cluster keyed by its
//! own center. Keys are never re-centered as members join, so the
//! clustering is order-dependent by construction, not a k-means variant.

use crate::geometry::Region;
use crate::line::LineRecord;

/// Maximum distance between a word's vertical center and a cluster key for
/// the word to join that cluster, in points. Empirically tuned.
pub const LINE_CLUSTER_TOLERANCE: f64 = 5.0;

/// Fraction of the line height the baseline sits above the line bottom.
pub const BASELINE_DESCENT_RATIO: f64 = 0.2;

/// Estimated font size as a fraction of line height.
pub const CLUSTER_FONT_SIZE_RATIO: f64 = 0.8;

/// A single word extracted from a page, with its bounding region.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Word {
    pub text: String,
    pub region: Region,
}

impl Word {
    pub fn new(text: impl Into<String>, region: Region) -> Self {
        Self {
            text: text.into(),
            region,
        }
    }

    /// Vertical center of the word's box.
    pub fn center_y(&self) -> f64 {
        (self.region.y0 + self.region.y1) / 2.0
    }
}

/// Group words into physical lines and derive per-line layout records.
///
/// Within each cluster, words are ordered left-to-right and joined with
/// single spaces. Clusters are ordered top-to-bottom by the minimum `y0`
/// among member words. Each resulting line gets `y0`/`y1` from its
/// members' extent, a baseline estimated [`BASELINE_DESCENT_RATIO`] of the
/// line height above the bottom, and a font size of
/// [`CLUSTER_FONT_SIZE_RATIO`] times the line height.
pub fn cluster_into_lines(words: &[Word]) -> Vec<LineRecord> {
    if words.is_empty() {
        return Vec::new();
    }

    let mut clusters: Vec<(f64, Vec<&Word>)> = Vec::new();
    for word in words {
        let center = word.center_y();
        match clusters
            .iter_mut()
            .find(|(key, _)| (*key - center).abs() < LINE_CLUSTER_TOLERANCE)
        {
            Some((_, members)) => members.push(word),
            None => clusters.push((center, vec![word])),
        }
    }

    clusters.sort_by(|(_, a), (_, b)| {
        let a_top = a.iter().map(|w| w.region.y0).fold(f64::INFINITY, f64::min);
        let b_top = b.iter().map(|w| w.region.y0).fold(f64::INFINITY, f64::min);
        a_top.partial_cmp(&b_top).unwrap_or(std::cmp::Ordering::Equal)
    });

    clusters
        .into_iter()
        .map(|(_, mut members)| {
            members.sort_by(|a, b| {
                a.region
                    .x0
                    .partial_cmp(&b.region.x0)
                    .unwrap_or(std::cmp::Ordering::Equal)
            });
            let text = members
                .iter()
                .map(|w| w.text.as_str())
                .collect::<Vec<_>>()
                .join(" ");
            let y0 = members.iter().map(|w| w.region.y0).fold(f64::INFINITY, f64::min);
            let y1 = members.iter().map(|w| w.region.y1).fold(f64::NEG_INFINITY, f64::max);
            let height = y1 - y0;
            LineRecord {
                text,
                baseline: y1 - height * BASELINE_DESCENT_RATIO,
                y0: Some(y0),
                y1: Some(y1),
                size: Some(height * CLUSTER_FONT_SIZE_RATIO),
                font: None,
                color: None,
            }
        })
        .collect()
}
