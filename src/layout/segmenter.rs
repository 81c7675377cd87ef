//! Column-aware segmentation of a page into text regions.
//!
//! The segmenter works purely on boxes:
//!
//! 1. Text blocks become fragment boxes ([`build_fragments`]), sorted by
//!    background, top and left.
//! 2. Each fragment is stretched to the right page border unless that would
//!    cut through a colored panel, an image, vertical text or another
//!    fragment ([`PageContext::extend_right`]).
//! 3. The fragments' left edges decide between a single and a double column
//!    layout ([`classify_columns`]).
//! 4. Fragments are joined into larger blocks without crossing other text,
//!    vertical text, or (on double column pages) the page's center line
//!    ([`PageContext::merge_blocks`]).
//! 5. Duplicates are dropped, rows are repaired ([`clean_blocks`]) and the
//!    result is put into reading order.

use crate::config::SegmenterConfig;
use crate::error::Result;
use crate::geometry::{containing_index, Rect};
use crate::layout::column_detector::{classify_columns, ColumnLayout, ColumnSide};
use crate::layout::fragments::{build_fragments, prepare_obstacles, sort_fragments, sort_shapes};
use crate::layout::page::PageGeometry;
use crate::utils::safe_float_cmp;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

/// Segmentation result for one page.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PageSegmentation {
    /// Page classification
    pub layout: ColumnLayout,
    /// Text regions in reading order
    pub regions: Vec<Rect>,
}

/// Obstacles and page measures shared by the extension and merge steps.
#[derive(Debug, Clone, PartialEq)]
pub struct PageContext {
    /// Vector graphics boxes, sorted by top then left
    pub shapes: Vec<Rect>,
    /// Image boxes
    pub images: Vec<Rect>,
    /// Boxes of non-horizontal text
    pub vertical: Vec<Rect>,
    /// Right border used when extending fragments
    pub page_right: f32,
    /// Vertical line splitting the page into left and right halves
    pub center_line: f32,
}

impl PageContext {
    /// Create a context without obstacles.
    pub fn new(page_right: f32, center_line: f32) -> Self {
        Self {
            shapes: Vec::new(),
            images: Vec::new(),
            vertical: Vec::new(),
            page_right,
            center_line,
        }
    }

    /// Whether `temp` may replace `current` without overlapping anything.
    ///
    /// `temp` must not touch vertical text, nor any box of `boxes` other
    /// than those equal to `current`. A shape or image only tolerates `temp`
    /// when it encloses it completely, so text on one panel can grow within
    /// that panel but never across its edge.
    pub fn can_extend(&self, temp: &Rect, current: &Rect, boxes: &[Rect]) -> bool {
        !temp.intersects_any(&self.vertical)
            && !self
                .shapes
                .iter()
                .chain(&self.images)
                .any(|o| temp.intersects(o) && !o.contains(temp))
            && boxes.iter().all(|b| b == current || !temp.intersects(b))
    }

    /// Stretch fragments to the right page border where nothing is in the way.
    ///
    /// Fragments on a shape or an image keep their size. Fragments are
    /// processed in order and later ones see the already extended boxes.
    pub fn extend_right(&self, fragments: &mut [Rect]) {
        let mut extended = 0;
        for i in 0..fragments.len() {
            let bb = fragments[i];

            if containing_index(&bb, &self.shapes) > 0 || containing_index(&bb, &self.images) > 0 {
                continue;
            }

            let temp = bb.with_right(self.page_right);
            if temp.width() <= bb.width() {
                continue;
            }

            if self.can_extend(&temp, &bb, fragments) {
                fragments[i] = temp;
                extended += 1;
            }
        }
        log::debug!("Extended {} of {} fragments to x={}", extended, fragments.len(), self.page_right);
    }

    /// Join fragments into blocks.
    ///
    /// Each fragment joins the first existing block whose union with it
    /// overlaps no other block and no obstacle (see [`can_extend`](Self::can_extend)). Text on
    /// different backgrounds therefore never joins. On double column pages
    /// only blocks on the same side of the center line qualify. If the grown
    /// block would then overlap one of the fragments still to come, the
    /// fragment is kept as a block of its own instead.
    pub fn merge_blocks(&self, fragments: &[Rect], layout: ColumnLayout) -> Vec<Rect> {
        let Some((first, rest)) = fragments.split_first() else {
            return Vec::new();
        };

        let mut blocks = vec![*first];
        for (i, bb) in rest.iter().enumerate() {
            let remaining = &rest[i + 1..];

            let target = blocks.iter().enumerate().find_map(|(j, nbb)| {
                if !self.may_join(bb, nbb, layout) {
                    return None;
                }
                let temp = bb.union(nbb);
                self.can_extend(&temp, nbb, &blocks).then_some((j, temp))
            });

            let (j, temp) = match target {
                Some(found) => found,
                None => {
                    blocks.push(*bb);
                    (blocks.len() - 1, *bb)
                },
            };

            if self.can_extend(&temp, bb, remaining) {
                blocks[j] = temp;
            } else {
                blocks.push(*bb);
            }
        }

        log::debug!("Merged {} fragments into {} blocks", fragments.len(), blocks.len());
        blocks
    }

    /// Put blocks into reading order.
    ///
    /// Double column pages read the whole left column before the right one;
    /// single column pages read top to bottom, then left to right.
    pub fn sort_reading_order(&self, blocks: &mut [Rect], layout: ColumnLayout) {
        match layout {
            ColumnLayout::Double => blocks.sort_by(|a, b| {
                ColumnSide::of(a, self.center_line)
                    .cmp(&ColumnSide::of(b, self.center_line))
                    .then_with(|| safe_float_cmp(a.y0, b.y0))
            }),
            ColumnLayout::Single => blocks.sort_by(|a, b| {
                safe_float_cmp(a.y0, b.y0).then_with(|| safe_float_cmp(a.x0, b.x0))
            }),
        }
    }

    fn may_join(&self, bb: &Rect, nbb: &Rect, layout: ColumnLayout) -> bool {
        !layout.is_double()
            || ColumnSide::of(bb, self.center_line) == ColumnSide::of(nbb, self.center_line)
    }
}

/// Remove duplicate blocks and repair the order inside visual rows.
///
/// Exact duplicates are dropped, keeping the first occurrence. Runs of
/// consecutive blocks whose bottom edges span at most `bottom_tolerance`
/// are then sorted by their left edge. Applying this twice gives the same
/// result as applying it once.
///
/// # Examples
///
/// ```
/// use column_oxide::geometry::Rect;
/// use column_oxide::layout::clean_blocks;
///
/// let right = Rect::new(300.0, 10.0, 500.0, 100.0);
/// let left = Rect::new(50.0, 20.0, 250.0, 104.0);
/// let cleaned = clean_blocks(vec![right, left, right], 10.0);
/// assert_eq!(cleaned, vec![left, right]);
/// ```
pub fn clean_blocks(blocks: Vec<Rect>, bottom_tolerance: f32) -> Vec<Rect> {
    let mut unique: Vec<Rect> = Vec::with_capacity(blocks.len());
    for block in blocks {
        if !unique.contains(&block) {
            unique.push(block);
        }
    }

    let mut start = 0;
    while start < unique.len() {
        let mut low = unique[start].y1;
        let mut high = low;
        let mut end = start + 1;
        while end < unique.len() {
            let y1 = unique[end].y1;
            if high.max(y1) - low.min(y1) > bottom_tolerance {
                break;
            }
            low = low.min(y1);
            high = high.max(y1);
            end += 1;
        }
        unique[start..end].sort_by(|a, b| safe_float_cmp(a.x0, b.x0));
        start = end;
    }

    unique
}

/// Page segmenter.
///
/// Holds only configuration, so one instance can serve many pages, also
/// from several threads.
#[derive(Debug, Clone)]
pub struct ColumnSegmenter {
    config: SegmenterConfig,
}

impl ColumnSegmenter {
    /// Create a segmenter after validating `config`.
    pub fn new(config: SegmenterConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    /// The active configuration.
    pub fn config(&self) -> &SegmenterConfig {
        &self.config
    }

    /// Classify the page and compute its text regions in reading order.
    ///
    /// Uses the configured seed, or the thread RNG when there is none.
    pub fn segment(&self, page: &PageGeometry) -> Result<PageSegmentation> {
        match self.config.seed {
            Some(seed) => self.segment_with_rng(page, &mut StdRng::seed_from_u64(seed)),
            None => self.segment_with_rng(page, &mut rand::thread_rng()),
        }
    }

    /// Like [`segment`](Self::segment) with an explicit random source.
    pub fn segment_with_rng<R>(&self, page: &PageGeometry, rng: &mut R) -> Result<PageSegmentation>
    where
        R: Rng + ?Sized,
    {
        let (context, fragments) = self.prepare(page);
        if fragments.is_empty() {
            log::debug!("No text fragments on page");
            return Ok(PageSegmentation::default());
        }

        let layout = self.classify_fragments(page, &fragments, rng)?;
        let blocks = context.merge_blocks(&fragments, layout);
        let mut regions = clean_blocks(blocks, self.config.bottom_tolerance);
        context.sort_reading_order(&mut regions, layout);

        log::debug!("Page segmented as {:?} with {} regions", layout, regions.len());
        Ok(PageSegmentation { layout, regions })
    }

    /// Classify the page without computing regions.
    pub fn classify(&self, page: &PageGeometry) -> Result<ColumnLayout> {
        match self.config.seed {
            Some(seed) => self.classify_with_rng(page, &mut StdRng::seed_from_u64(seed)),
            None => self.classify_with_rng(page, &mut rand::thread_rng()),
        }
    }

    /// Like [`classify`](Self::classify) with an explicit random source.
    pub fn classify_with_rng<R>(&self, page: &PageGeometry, rng: &mut R) -> Result<ColumnLayout>
    where
        R: Rng + ?Sized,
    {
        let (_, fragments) = self.prepare(page);
        self.classify_fragments(page, &fragments, rng)
    }

    /// Build the page context and the sorted, extended fragments.
    fn prepare(&self, page: &PageGeometry) -> (PageContext, Vec<Rect>) {
        let config = &self.config;
        let integer = config.integer_coordinates;
        let region = page.region(config.footer_margin, config.header_margin);

        let mut shapes = prepare_obstacles(&page.shapes, &region, integer);
        sort_shapes(&mut shapes);
        let images = prepare_obstacles(&page.images, &region, integer);

        let set = build_fragments(&page.blocks, &region, &images, config.no_image_text, integer);
        let mut fragments = set.fragments;
        sort_fragments(&mut fragments, &shapes);

        let page_right = if integer {
            page.rect.x1.floor()
        } else {
            page.rect.x1
        };
        let context = PageContext {
            shapes,
            images,
            vertical: set.vertical,
            page_right,
            center_line: page.rect.x0 + page.width() / 2.0,
        };
        context.extend_right(&mut fragments);

        (context, fragments)
    }

    fn classify_fragments<R>(
        &self,
        page: &PageGeometry,
        fragments: &[Rect],
        rng: &mut R,
    ) -> Result<ColumnLayout>
    where
        R: Rng + ?Sized,
    {
        let x0_values: Vec<f32> = fragments.iter().map(|f| f.x0).collect();
        classify_columns(&x0_values, page.width(), &self.config.classification, rng)
    }
}

/// Compute the text regions of a page in reading order.
///
/// Shorthand for [`ColumnSegmenter::segment`] returning only the regions.
/// A page without usable text yields an empty list.
pub fn column_boxes(page: &PageGeometry, config: &SegmenterConfig) -> Result<Vec<Rect>> {
    Ok(ColumnSegmenter::new(config.clone())?.segment(page)?.regions)
}

/// Whether the page is laid out in two columns.
pub fn is_double_column(page: &PageGeometry, config: &SegmenterConfig) -> Result<bool> {
    Ok(ColumnSegmenter::new(config.clone())?.classify(page)?.is_double())
}
