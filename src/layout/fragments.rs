//! Fragment construction.
//!
//! Turns the text blocks of a page into fragment boxes: one box per block,
//! covering the block's meaningful horizontal lines. Blocks written in any
//! other direction become obstacles instead.

use crate::geometry::{containing_index, Rect};
use crate::layout::text_block::TextBlock;
use crate::utils::safe_float_cmp;

/// Fragment boxes of a page together with the vertical text obstacles.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FragmentSet {
    /// Boxes of horizontal text blocks
    pub fragments: Vec<Rect>,
    /// Boxes of blocks whose first line is not horizontal
    pub vertical: Vec<Rect>,
}

/// Clip `rect` to the page region and optionally round it outwards.
pub(crate) fn normalize(rect: &Rect, region: &Rect, integer_coordinates: bool) -> Rect {
    let clipped = rect.intersect(region);
    if integer_coordinates {
        clipped.round_out()
    } else {
        clipped
    }
}

/// Clip obstacle rectangles to the page region, dropping those left empty.
pub fn prepare_obstacles(rects: &[Rect], region: &Rect, integer_coordinates: bool) -> Vec<Rect> {
    rects
        .iter()
        .map(|r| normalize(r, region, integer_coordinates))
        .filter(|r| !r.is_empty())
        .collect()
}

/// Build fragment boxes from the page's text blocks.
///
/// * Blocks are clipped to `region`; blocks with no line inside it vanish.
/// * With `no_image_text`, a block lying inside an image is ignored.
/// * A block whose first line is not horizontal is recorded as a vertical
///   obstacle.
/// * Otherwise the fragment is the union of the block's lines carrying more
///   than one non-whitespace character. Blocks without such lines are dropped.
///
/// `images` must already be normalized to the region. The returned
/// fragments are in block order; see [`sort_fragments`].
pub fn build_fragments(
    blocks: &[TextBlock],
    region: &Rect,
    images: &[Rect],
    no_image_text: bool,
    integer_coordinates: bool,
) -> FragmentSet {
    let mut set = FragmentSet::default();

    for block in blocks {
        let Some(block) = block.clipped(region) else {
            continue;
        };
        let bbox = normalize(&block.bbox, region, integer_coordinates);

        if no_image_text && containing_index(&bbox, images) > 0 {
            log::trace!("Skipping block {:?} on top of an image", bbox);
            continue;
        }

        match block.direction() {
            Some(dir) if dir.is_horizontal() => {},
            Some(_) => {
                set.vertical.push(bbox);
                continue;
            },
            None => continue,
        }

        let fragment = block
            .lines
            .iter()
            .filter(|line| line.trimmed_text().chars().count() > 1)
            .fold(Rect::EMPTY, |acc, line| {
                acc.union(&normalize(&line.bbox, region, integer_coordinates))
            });

        if !fragment.is_empty() {
            set.fragments.push(fragment);
        }
    }

    log::debug!(
        "Built {} fragments and {} vertical obstacles from {} blocks",
        set.fragments.len(),
        set.vertical.len(),
        blocks.len()
    );

    set
}

/// Sort fragments by background, then top, then left.
///
/// The background key is the 1-based index of the first shape containing the
/// fragment (0 for plain page background), so text on colored panels sorts
/// after ordinary text and stays grouped per panel.
pub fn sort_fragments(fragments: &mut [Rect], shapes: &[Rect]) {
    fragments.sort_by(|a, b| {
        containing_index(a, shapes)
            .cmp(&containing_index(b, shapes))
            .then_with(|| safe_float_cmp(a.y0, b.y0))
            .then_with(|| safe_float_cmp(a.x0, b.x0))
    });
}

/// Sort shape boxes by top, then left.
pub fn sort_shapes(shapes: &mut [Rect]) {
    shapes.sort_by(|a, b| safe_float_cmp(a.y0, b.y0).then_with(|| safe_float_cmp(a.x0, b.x0)));
}
