//! Layout analysis for a single page.
//!
//! This module provides the column segmentation pipeline:
//! - 1-D k-means clustering of fragment left edges
//! - Fragment construction from text blocks
//! - Single/double column classification
//! - Right extension, merging and reading order of text regions

pub mod column_detector;
pub mod fragments;
pub mod kmeans;
pub mod page;
pub mod segmenter;
pub mod text_block;

// Re-export main types
pub use column_detector::{classify_columns, ColumnLayout, ColumnSide};
pub use fragments::{build_fragments, sort_fragments, FragmentSet};
pub use kmeans::{kmeans_1d, Clustering};
pub use page::PageGeometry;
pub use segmenter::{
    clean_blocks, column_boxes, is_double_column, ColumnSegmenter, PageContext, PageSegmentation,
};
pub use text_block::{TextBlock, TextDirection, TextLine, TextSpan};
