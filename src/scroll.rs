//! Keeping the caret inside the scroll viewport.
//!
//! The viewport belongs to the host (a scroll viewer); the editor reads its
//! offsets and extent and only issues setter calls when the caret is out of
//! view.

use serde::{Deserialize, Serialize};

use crate::geometry::Rect;
use crate::layout::{LayoutLine, TextAlignment};

/// Scroll viewer surface the editor drives
pub trait ScrollViewport {
    fn horizontal_offset(&self) -> f32;
    fn vertical_offset(&self) -> f32;
    fn viewport_width(&self) -> f32;
    fn viewport_height(&self) -> f32;
    fn scroll_to_horizontal_offset(&mut self, offset: f32);
    fn scroll_to_vertical_offset(&mut self, offset: f32);
}

/// Plain viewport state, for hosts without a scroll viewer of their own
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Viewport {
    pub horizontal_offset: f32,
    pub vertical_offset: f32,
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            horizontal_offset: 0.0,
            vertical_offset: 0.0,
            width,
            height,
        }
    }
}

impl ScrollViewport for Viewport {
    fn horizontal_offset(&self) -> f32 {
        self.horizontal_offset
    }

    fn vertical_offset(&self) -> f32 {
        self.vertical_offset
    }

    fn viewport_width(&self) -> f32 {
        self.width
    }

    fn viewport_height(&self) -> f32 {
        self.height
    }

    fn scroll_to_horizontal_offset(&mut self, offset: f32) {
        self.horizontal_offset = offset;
    }

    fn scroll_to_vertical_offset(&mut self, offset: f32) {
        self.vertical_offset = offset;
    }
}

/// How far to scroll horizontally once the caret leaves the viewport
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum HorizontalScrollPolicy {
    /// Just enough to bring the caret inside
    #[default]
    Minimal,
    /// Overshoot by a third of the viewport in the direction of travel
    Jump,
    /// Align to the trailing edge of the caret's line (leading edge when
    /// right-aligned)
    ShowMaximumLineWidth,
}

/// Offsets to apply; None leaves that axis alone
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ScrollAdjustment {
    pub horizontal: Option<f32>,
    pub vertical: Option<f32>,
}

impl ScrollAdjustment {
    pub fn is_none(&self) -> bool {
        self.horizontal.is_none() && self.vertical.is_none()
    }
}

/// [`HorizontalScrollPolicy::Jump`] overshoots by the viewport width over this
const JUMP_DIVISOR: f32 = 3.0;

/// Maps caret bounds to viewport offsets
#[derive(Debug, Clone, Copy, Default)]
pub struct ScrollSynchronizer;

impl ScrollSynchronizer {
    /// Compute the scroll needed to reveal `caret`.
    ///
    /// `line` is the caret's visual line, consulted only by
    /// [`HorizontalScrollPolicy::ShowMaximumLineWidth`].
    pub fn compute(
        caret: Rect,
        viewport: &dyn ScrollViewport,
        policy: HorizontalScrollPolicy,
        line: Option<(&LayoutLine, TextAlignment)>,
    ) -> ScrollAdjustment {
        let left = viewport.horizontal_offset();
        let top = viewport.vertical_offset();
        let width = viewport.viewport_width();
        let height = viewport.viewport_height();

        let mut adjustment = ScrollAdjustment::default();

        if caret.y < top {
            adjustment.vertical = Some(caret.y.max(0.0));
        } else if caret.bottom() > top + height {
            adjustment.vertical = Some((caret.bottom() - height).max(0.0));
        }

        let off_left = caret.x < left;
        let off_right = caret.right() > left + width;
        if off_left || off_right {
            let target = match policy {
                HorizontalScrollPolicy::Minimal => {
                    if off_left {
                        caret.x
                    } else {
                        caret.right() - width
                    }
                }
                HorizontalScrollPolicy::Jump => {
                    let overshoot = width / JUMP_DIVISOR;
                    if off_left {
                        caret.x - overshoot
                    } else {
                        caret.right() - width + overshoot
                    }
                }
                HorizontalScrollPolicy::ShowMaximumLineWidth => match line {
                    Some((line, TextAlignment::Right)) => line.left,
                    Some((line, _)) => line.right() + (caret.right() - caret.x) - width,
                    None => caret.right() - width,
                },
            };
            adjustment.horizontal = Some(target.max(0.0));
        }

        adjustment
    }

    /// Compute and apply; returns true if any setter was called
    pub fn reveal(
        caret: Rect,
        viewport: &mut dyn ScrollViewport,
        policy: HorizontalScrollPolicy,
        line: Option<(&LayoutLine, TextAlignment)>,
    ) -> bool {
        let adjustment = Self::compute(caret, viewport, policy, line);
        if let Some(x) = adjustment.horizontal {
            viewport.scroll_to_horizontal_offset(x);
        }
        if let Some(y) = adjustment.vertical {
            viewport.scroll_to_vertical_offset(y);
        }
        if !adjustment.is_none() {
            tracing::trace!(?adjustment, "scrolled caret into view");
        }
        !adjustment.is_none()
    }
}
