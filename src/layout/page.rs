//! Per-page input geometry.

use crate::error::Result;
use crate::geometry::Rect;
use crate::layout::text_block::TextBlock;
use serde::{Deserialize, Serialize};

/// Everything the segmenter needs to know about one page.
///
/// This is the output contract of the PDF parsing collaborator: the page
/// rectangle, the text blocks, the bounding boxes of vector drawings and the
/// placements of images.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageGeometry {
    /// Full page rectangle
    pub rect: Rect,
    /// Text blocks in extraction order
    #[serde(default)]
    pub blocks: Vec<TextBlock>,
    /// Bounding boxes of vector graphics (colored panels, rules, frames)
    #[serde(default)]
    pub shapes: Vec<Rect>,
    /// Image placement rectangles
    #[serde(default)]
    pub images: Vec<Rect>,
}

impl PageGeometry {
    /// Create an empty page of the given size.
    pub fn new(rect: Rect) -> Self {
        Self {
            rect,
            blocks: Vec::new(),
            shapes: Vec::new(),
            images: Vec::new(),
        }
    }

    /// Decode page geometry from JSON.
    ///
    /// Rectangles are `[x0, y0, x1, y1]` arrays and line directions
    /// `[cos, sin]` pairs.
    ///
    /// # Examples
    ///
    /// ```
    /// use column_oxide::layout::PageGeometry;
    ///
    /// let page = PageGeometry::from_json(r#"{
    ///     "rect": [0, 0, 612, 792],
    ///     "blocks": [{"bbox": [72, 72, 300, 90],
    ///                 "lines": [{"bbox": [72, 72, 300, 90], "dir": [1, 0],
    ///                            "spans": [{"text": "Hello"}]}]}]
    /// }"#).unwrap();
    /// assert_eq!(page.blocks.len(), 1);
    /// assert!(page.shapes.is_empty());
    /// ```
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Add a text block.
    pub fn with_block(mut self, block: TextBlock) -> Self {
        self.blocks.push(block);
        self
    }

    /// Add a vector graphic bounding box.
    pub fn with_shape(mut self, shape: Rect) -> Self {
        self.shapes.push(shape);
        self
    }

    /// Add an image placement.
    pub fn with_image(mut self, image: Rect) -> Self {
        self.images.push(image);
        self
    }

    /// Page width.
    pub fn width(&self) -> f32 {
        self.rect.width()
    }

    /// The usable page area: the page minus header and footer stripes.
    ///
    /// # Examples
    ///
    /// ```
    /// use column_oxide::geometry::Rect;
    /// use column_oxide::layout::PageGeometry;
    ///
    /// let page = PageGeometry::new(Rect::new(0.0, 0.0, 612.0, 792.0));
    /// assert_eq!(page.region(50.0, 40.0), Rect::new(0.0, 40.0, 612.0, 742.0));
    /// ```
    pub fn region(&self, footer_margin: f32, header_margin: f32) -> Rect {
        let mut clip = self.rect;
        clip.y1 -= footer_margin;
        clip.y0 += header_margin;
        clip
    }
}
