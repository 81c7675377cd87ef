//! Single versus double column detection.
//!
//! The left edges of a page's fragments are clustered with 1-D k-means. A
//! double column page shows two well separated groups of left edges; a
//! single column page with indents or a stray right-aligned date shows
//! either a small gap or a lopsided split.

use crate::config::ClassificationPolicy;
use crate::error::Result;
use crate::geometry::Rect;
use crate::layout::kmeans::kmeans_1d;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Page-level column classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColumnLayout {
    /// Text flows in one column
    #[default]
    Single,
    /// Text flows in a left and a right column
    Double,
}

impl ColumnLayout {
    /// Whether the page was classified as double column.
    pub fn is_double(&self) -> bool {
        matches!(self, ColumnLayout::Double)
    }
}

/// Half of the page a box belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ColumnSide {
    /// Box center lies left of the center line
    Left,
    /// Box center lies on or right of the center line
    Right,
}

impl ColumnSide {
    /// Determine the side of `rect` from its horizontal midpoint.
    ///
    /// # Examples
    ///
    /// ```
    /// use column_oxide::geometry::Rect;
    /// use column_oxide::layout::ColumnSide;
    ///
    /// let center_line = 300.0;
    /// assert_eq!(ColumnSide::of(&Rect::new(50.0, 0.0, 250.0, 10.0), center_line), ColumnSide::Left);
    /// assert_eq!(ColumnSide::of(&Rect::new(200.0, 0.0, 500.0, 10.0), center_line), ColumnSide::Right);
    /// ```
    pub fn of(rect: &Rect, center_line: f32) -> Self {
        if rect.center().x < center_line {
            ColumnSide::Left
        } else {
            ColumnSide::Right
        }
    }
}

/// Classify a page from the left edges of its fragments.
///
/// With fewer than `max(2, k)` values there is not enough evidence and the
/// page is single column. Otherwise the values are clustered; the page is
/// double column when the two centers are further apart than
/// `page_width * column_gap_ratio` and the larger cluster is at most
/// `outlier_ratio` times the size of the smaller. `policy` is expected to
/// pass [`ClassificationPolicy::validate`], which pins `k` to 2.
///
/// # Errors
///
/// Only propagates clustering contract violations, which the evidence check
/// above rules out for a valid policy.
///
/// # Examples
///
/// ```
/// use column_oxide::config::ClassificationPolicy;
/// use column_oxide::layout::{classify_columns, ColumnLayout};
/// use rand::SeedableRng;
///
/// let mut rng = rand::rngs::StdRng::seed_from_u64(1);
/// let x0 = [50.0, 51.0, 50.0, 400.0, 402.0, 401.0];
/// let layout = classify_columns(&x0, 500.0, &ClassificationPolicy::default(), &mut rng).unwrap();
/// assert_eq!(layout, ColumnLayout::Double);
/// ```
pub fn classify_columns<R>(
    x0_values: &[f32],
    page_width: f32,
    policy: &ClassificationPolicy,
    rng: &mut R,
) -> Result<ColumnLayout>
where
    R: Rng + ?Sized,
{
    if x0_values.len() < policy.k.max(2) {
        log::debug!(
            "Only {} fragment edges, assuming single column",
            x0_values.len()
        );
        return Ok(ColumnLayout::Single);
    }

    let clustering = kmeans_1d(x0_values, policy.k, policy.max_iterations, rng)?;
    let gap = clustering.center_spread();
    let threshold = page_width * policy.column_gap_ratio;

    if gap <= threshold {
        log::debug!(
            "Center gap {:.1} within {:.1}: single column (centers {:?})",
            gap,
            threshold,
            clustering.centers
        );
        return Ok(ColumnLayout::Single);
    }

    let sizes = clustering.cluster_sizes();
    let largest = sizes.iter().copied().max().unwrap_or(0);
    let smallest = sizes.iter().copied().min().unwrap_or(0);
    let lopsided = smallest == 0 || largest as f32 / smallest as f32 > policy.outlier_ratio;

    log::debug!(
        "Center gap {:.1} exceeds {:.1}, cluster sizes {:?}: {}",
        gap,
        threshold,
        sizes,
        if lopsided {
            "outliers, single column"
        } else {
            "double column"
        }
    );

    if lopsided {
        Ok(ColumnLayout::Single)
    } else {
        Ok(ColumnLayout::Double)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn classify(x0: &[f32], width: f32, seed: u64) -> ColumnLayout {
        let mut rng = StdRng::seed_from_u64(seed);
        classify_columns(x0, width, &ClassificationPolicy::default(), &mut rng).unwrap()
    }

    #[test]
    fn test_two_columns() {
        let x0 = [50.0, 52.0, 48.0, 50.0, 400.0, 401.0, 399.0, 400.0];
        for seed in 0..20 {
            assert_eq!(classify(&x0, 500.0, seed), ColumnLayout::Double);
        }
    }

    #[test]
    fn test_indented_single_column() {
        let x0 = [50.0, 70.0, 50.0, 50.0, 70.0, 50.0];
        for seed in 0..20 {
            assert_eq!(classify(&x0, 500.0, seed), ColumnLayout::Single);
        }
    }

    #[test]
    fn test_not_enough_values() {
        assert_eq!(classify(&[], 500.0, 0), ColumnLayout::Single);
        assert_eq!(classify(&[400.0], 500.0, 0), ColumnLayout::Single);
    }

    #[test]
    fn test_outlier_downgrades_to_single() {
        // Six body lines and one right-aligned date: ratio 6 > 5.
        let x0 = [50.0, 50.0, 52.0, 50.0, 54.0, 50.0, 420.0];
        for seed in 0..20 {
            assert_eq!(classify(&x0, 500.0, seed), ColumnLayout::Single);
        }
    }

    #[test]
    fn test_ratio_at_threshold_stays_double() {
        // Five to one is not above the threshold.
        let x0 = [50.0, 50.0, 50.0, 50.0, 50.0, 400.0];
        for seed in 0..20 {
            assert_eq!(classify(&x0, 500.0, seed), ColumnLayout::Double);
        }
    }

    #[test]
    fn test_stricter_outlier_ratio() {
        let policy = ClassificationPolicy {
            outlier_ratio: 2.0,
            ..Default::default()
        };
        let mut rng = StdRng::seed_from_u64(3);
        let layout =
            classify_columns(&[50.0, 52.0, 54.0, 400.0], 500.0, &policy, &mut rng).unwrap();
        assert_eq!(layout, ColumnLayout::Single);
    }

    #[test]
    fn test_column_side() {
        let line = 250.0;
        assert_eq!(ColumnSide::of(&Rect::new(0.0, 0.0, 100.0, 10.0), line), ColumnSide::Left);
        assert_eq!(ColumnSide::of(&Rect::new(200.0, 0.0, 300.0, 10.0), line), ColumnSide::Right);
        assert!(ColumnSide::Left < ColumnSide::Right);
    }

    #[test]
    fn test_layout_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&ColumnLayout::Double).unwrap(), "\"double\"");
        assert!(ColumnLayout::Double.is_double());
        assert!(!ColumnLayout::default().is_double());
    }
}
