// Allow some clippy lints that are too pedantic for this project
#![allow(clippy::neg_cmp_op_on_partial_ord)]
#![allow(clippy::nonminimal_bool)]

//! # Column Oxide
//!
//! Column-aware layout segmentation for PDF pages.
//!
//! Given the geometry a PDF text extractor reports for one page (text blocks
//! with line boxes and directions, vector graphic boxes, image placements),
//! the crate rebuilds the page's column regions and tells single column
//! pages from double column ones. Callers then extract the text inside each
//! region, in order, to get reading-order-correct output.
//!
//! ## Pipeline
//!
//! - **Fragments**: each horizontal text block becomes one box; vertical
//!   text, drawings and images become obstacles
//! - **Right extension**: boxes grow to the right page border unless that
//!   would cut through an obstacle or other text
//! - **Classification**: 1-D k-means on fragment left edges, with a gap
//!   threshold and an outlier guard
//! - **Merging**: fragments join into blocks without crossing text,
//!   vertical text, or the center line of a double column page
//!
//! ## Quick Start
//!
//! ```
//! use column_oxide::geometry::Rect;
//! use column_oxide::layout::{ColumnLayout, PageGeometry, TextBlock, TextLine};
//! use column_oxide::{ColumnSegmenter, SegmenterConfig};
//!
//! # fn main() -> column_oxide::Result<()> {
//! let mut page = PageGeometry::new(Rect::new(0.0, 0.0, 600.0, 800.0));
//! for row in 0..4 {
//!     let y = 100.0 + row as f32 * 20.0;
//!     page.blocks.push(TextBlock::from_lines(vec![TextLine::new(
//!         Rect::new(50.0, y, 280.0, y + 12.0),
//!         "left column text",
//!     )]));
//!     page.blocks.push(TextBlock::from_lines(vec![TextLine::new(
//!         Rect::new(320.0, y, 550.0, y + 12.0),
//!         "right column text",
//!     )]));
//! }
//!
//! let segmenter = ColumnSegmenter::new(SegmenterConfig::region_extraction().with_seed(7))?;
//! let result = segmenter.segment(&page)?;
//! assert_eq!(result.layout, ColumnLayout::Double);
//! assert_eq!(result.regions.len(), 2);
//! # Ok(())
//! # }
//! ```
//!
//! ## License
//!
//! Licensed under either of:
//!
//! * Apache License, Version 2.0 ([LICENSE-APACHE](LICENSE-APACHE) or <http://www.apache.org/licenses/LICENSE-2.0>)
//! * MIT license ([LICENSE-MIT](LICENSE-MIT) or <http://opensource.org/licenses/MIT>)
//!
//! at your option.

#![warn(missing_docs)]
#![cfg_attr(docsrs, feature(doc_cfg))]

// Error handling
pub mod error;

// Configuration
pub mod config;

// Layout analysis
pub mod geometry;
pub mod layout;

// Re-exports
pub use config::{ClassificationPolicy, SegmenterConfig};
pub use error::{Error, Result};
pub use layout::{column_boxes, is_double_column, ColumnLayout, ColumnSegmenter, PageSegmentation};

// Internal utilities
pub(crate) mod utils {
    //! Internal utility functions for the library.

    use std::cmp::Ordering;

    /// Compare two floats for sorting, placing NaN after every number.
    #[inline]
    pub fn safe_float_cmp(a: f32, b: f32) -> Ordering {
        a.partial_cmp(&b).unwrap_or_else(|| match (a.is_nan(), b.is_nan()) {
            (true, true) => Ordering::Equal,
            (true, false) => Ordering::Greater,
            _ => Ordering::Less,
        })
    }

}

// Version info
/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");
