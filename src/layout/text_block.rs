//! Text block representation consumed by the segmenter.
//!
//! These structures mirror what a PDF text extractor reports for a page in
//! "dict" form: blocks made of lines made of spans. Only geometry, writing
//! direction and the span text are kept; fonts and colors play no part in
//! column segmentation.

use crate::geometry::Rect;
use serde::{Deserialize, Serialize};

/// Tolerance used when comparing a direction vector against `(1, 0)`.
const DIRECTION_EPSILON: f32 = 1e-6;

/// Writing direction of a line as a unit vector `(cos, sin)`.
///
/// Serialized as a two-element array, e.g. `[1.0, 0.0]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "(f32, f32)", into = "(f32, f32)")]
pub struct TextDirection {
    /// Horizontal component
    pub cos: f32,
    /// Vertical component
    pub sin: f32,
}

impl TextDirection {
    /// Left-to-right horizontal text.
    pub const HORIZONTAL: TextDirection = TextDirection { cos: 1.0, sin: 0.0 };

    /// Top-to-bottom vertical text.
    pub const VERTICAL: TextDirection = TextDirection { cos: 0.0, sin: 1.0 };

    /// Create a direction from its components.
    pub fn new(cos: f32, sin: f32) -> Self {
        Self { cos, sin }
    }

    /// Whether this is plain left-to-right horizontal text.
    ///
    /// # Examples
    ///
    /// ```
    /// use column_oxide::layout::TextDirection;
    ///
    /// assert!(TextDirection::HORIZONTAL.is_horizontal());
    /// assert!(!TextDirection::VERTICAL.is_horizontal());
    /// assert!(!TextDirection::new(-1.0, 0.0).is_horizontal());
    /// ```
    pub fn is_horizontal(&self) -> bool {
        (self.cos - 1.0).abs() <= DIRECTION_EPSILON && self.sin.abs() <= DIRECTION_EPSILON
    }
}

impl From<(f32, f32)> for TextDirection {
    fn from((cos, sin): (f32, f32)) -> Self {
        Self { cos, sin }
    }
}

impl From<TextDirection> for (f32, f32) {
    fn from(dir: TextDirection) -> Self {
        (dir.cos, dir.sin)
    }
}

impl Default for TextDirection {
    fn default() -> Self {
        Self::HORIZONTAL
    }
}

/// A run of text with uniform styling.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct TextSpan {
    /// The span's text
    pub text: String,
}

impl TextSpan {
    /// Create a span from its text.
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }
}

/// A single line of text inside a block.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextLine {
    /// Bounding box of the line
    pub bbox: Rect,
    /// Writing direction
    #[serde(default)]
    pub dir: TextDirection,
    /// Spans in reading order
    #[serde(default)]
    pub spans: Vec<TextSpan>,
}

impl TextLine {
    /// Create a horizontal line holding a single span.
    pub fn new(bbox: Rect, text: impl Into<String>) -> Self {
        Self {
            bbox,
            dir: TextDirection::HORIZONTAL,
            spans: vec![TextSpan::new(text)],
        }
    }

    /// Set the writing direction.
    pub fn with_direction(mut self, dir: TextDirection) -> Self {
        self.dir = dir;
        self
    }

    /// The line's text with each span trimmed of surrounding whitespace.
    ///
    /// # Examples
    ///
    /// ```
    /// use column_oxide::geometry::Rect;
    /// use column_oxide::layout::{TextLine, TextSpan};
    ///
    /// let mut line = TextLine::new(Rect::new(0.0, 0.0, 50.0, 10.0), " Hello ");
    /// line.spans.push(TextSpan::new(" world"));
    /// assert_eq!(line.trimmed_text(), "Helloworld");
    /// ```
    pub fn trimmed_text(&self) -> String {
        self.spans.iter().map(|s| s.text.trim()).collect()
    }
}

/// A block of lines as grouped by the text extractor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextBlock {
    /// Bounding box of the whole block
    pub bbox: Rect,
    /// Lines in reading order
    #[serde(default)]
    pub lines: Vec<TextLine>,
}

impl TextBlock {
    /// Create a block whose box is the union of its lines.
    pub fn from_lines(lines: Vec<TextLine>) -> Self {
        let bbox = lines
            .iter()
            .fold(Rect::EMPTY, |acc, line| acc.union(&line.bbox));
        Self { bbox, lines }
    }

    /// Direction of the first line, if the block has any lines.
    pub fn direction(&self) -> Option<TextDirection> {
        self.lines.first().map(|line| line.dir)
    }

    /// Restrict the block to `clip`.
    ///
    /// Lines that do not overlap `clip` are dropped and the remaining line
    /// boxes are cut to it. Returns `None` if no line survives.
    pub fn clipped(&self, clip: &Rect) -> Option<TextBlock> {
        let lines: Vec<TextLine> = self
            .lines
            .iter()
            .filter_map(|line| {
                let bbox = line.bbox.intersect(clip);
                if bbox.is_empty() {
                    return None;
                }
                Some(TextLine {
                    bbox,
                    dir: line.dir,
                    spans: line.spans.clone(),
                })
            })
            .collect();

        if lines.is_empty() {
            return None;
        }

        Some(TextBlock {
            bbox: self.bbox.intersect(clip),
            lines,
        })
    }
}
