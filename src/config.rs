//! Configuration for column segmentation.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};

/// Thresholds used to decide between single and double column layouts.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClassificationPolicy {
    /// Number of k-means clusters fitted to fragment left edges.
    ///
    /// Merging only knows a left and a right column, so this must be 2.
    pub k: usize,

    /// Upper bound on k-means update rounds.
    pub max_iterations: usize,

    /// Minimum gap between outermost cluster centers, as a fraction of the
    /// page width, for a page to count as multi-column.
    pub column_gap_ratio: f32,

    /// Largest allowed ratio between the biggest and smallest cluster sizes.
    /// Above it the gap is blamed on a few outlier fragments.
    pub outlier_ratio: f32,
}

impl Default for ClassificationPolicy {
    fn default() -> Self {
        Self {
            k: 2,
            max_iterations: 100,
            column_gap_ratio: 0.25,
            outlier_ratio: 5.0,
        }
    }
}

impl ClassificationPolicy {
    /// Check that every threshold is usable.
    pub fn validate(&self) -> Result<()> {
        if self.k != 2 {
            return Err(Error::InvalidConfig(format!(
                "column classification needs exactly 2 clusters, got {}",
                self.k
            )));
        }
        if !(self.column_gap_ratio.is_finite() && self.column_gap_ratio >= 0.0) {
            return Err(Error::InvalidConfig(format!(
                "column_gap_ratio must be a non-negative number, got {}",
                self.column_gap_ratio
            )));
        }
        if !(self.outlier_ratio >= 1.0) {
            return Err(Error::InvalidConfig(format!(
                "outlier_ratio must be at least 1, got {}",
                self.outlier_ratio
            )));
        }
        Ok(())
    }
}

/// Segmentation configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SegmenterConfig {
    /// Height of the stripe at the bottom of the page to ignore.
    pub footer_margin: f32,

    /// Height of the stripe at the top of the page to ignore.
    pub header_margin: f32,

    /// Ignore text blocks that lie on top of an image.
    pub no_image_text: bool,

    /// Column classification thresholds.
    pub classification: ClassificationPolicy,

    /// Blocks whose bottoms lie within this distance form one visual row
    /// during cleanup and are reordered left to right.
    pub bottom_tolerance: f32,

    /// Round all boxes outwards to integer coordinates.
    pub integer_coordinates: bool,

    /// Seed for the clustering RNG. `None` draws from the thread RNG.
    pub seed: Option<u64>,
}

impl Default for SegmenterConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl SegmenterConfig {
    /// Create a configuration with default margins (50 points top and
    /// bottom) and image text suppression enabled.
    pub fn new() -> Self {
        Self {
            footer_margin: 50.0,
            header_margin: 50.0,
            no_image_text: true,
            classification: ClassificationPolicy::default(),
            bottom_tolerance: 10.0,
            integer_coordinates: true,
            seed: None,
        }
    }

    /// Settings for extracting column boxes before text re-extraction:
    /// a 50 point footer, no header, image text ignored.
    pub fn region_extraction() -> Self {
        Self::new().with_header_margin(0.0)
    }

    /// Settings for classifying whole pages: no margins, image text kept.
    pub fn batch_classification() -> Self {
        Self::new()
            .with_footer_margin(0.0)
            .with_header_margin(0.0)
            .with_no_image_text(false)
    }

    /// Set the footer margin.
    pub fn with_footer_margin(mut self, margin: f32) -> Self {
        self.footer_margin = margin;
        self
    }

    /// Set the header margin.
    pub fn with_header_margin(mut self, margin: f32) -> Self {
        self.header_margin = margin;
        self
    }

    /// Enable or disable suppression of text over images.
    pub fn with_no_image_text(mut self, enable: bool) -> Self {
        self.no_image_text = enable;
        self
    }

    /// Replace the classification thresholds.
    pub fn with_classification(mut self, policy: ClassificationPolicy) -> Self {
        self.classification = policy;
        self
    }

    /// Set the row tolerance used when cleaning merged blocks.
    pub fn with_bottom_tolerance(mut self, tolerance: f32) -> Self {
        self.bottom_tolerance = tolerance;
        self
    }

    /// Enable or disable integer rounding of boxes.
    pub fn with_integer_coordinates(mut self, enable: bool) -> Self {
        self.integer_coordinates = enable;
        self
    }

    /// Pin the clustering RNG to a seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Check the configuration for values the algorithm cannot work with.
    pub fn validate(&self) -> Result<()> {
        for (name, value) in [
            ("footer_margin", self.footer_margin),
            ("header_margin", self.header_margin),
            ("bottom_tolerance", self.bottom_tolerance),
        ] {
            if !(value.is_finite() && value >= 0.0) {
                return Err(Error::InvalidConfig(format!(
                    "{} must be a non-negative number, got {}",
                    name, value
                )));
            }
        }
        self.classification.validate()
    }
}
