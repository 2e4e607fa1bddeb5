use glam::Vec2;

use crate::options::{Corner, PipOptions};
use crate::render::Rect;

/// Rectangle of `size` anchored to `corner` of `container`, inset by `gap`.
#[must_use]
pub fn anchored_rect(container: Rect, corner: Corner, size: Vec2, gap: f32) -> Rect {
    let min = container.origin() + Vec2::splat(gap);
    let max = container.max() - size - Vec2::splat(gap);
    let origin = match corner {
        Corner::TopLeft => min,
        Corner::TopRight => Vec2::new(max.x, min.y),
        Corner::BottomLeft => Vec2::new(min.x, max.y),
        Corner::BottomRight => max,
    };
    Rect::new(origin.x, origin.y, size.x, size.y)
}

/// Rectangles for `count` insets over `main`.
///
/// Insets fill `options.corners` in order. Once every corner is taken,
/// further insets stack inward from the same corners, one inset height
/// plus gap per layer.
#[must_use]
pub fn inset_rects(main: Rect, options: &PipOptions, count: usize) -> Vec<Rect> {
    let corners: &[Corner] = if options.corners.is_empty() {
        &[Corner::TopRight]
    } else {
        &options.corners
    };
    let size = Vec2::new(options.width, options.height);
    (0..count)
        .map(|i| {
            let corner = corners[i % corners.len()];
            let layer = (i / corners.len()) as f32;
            let mut rect = anchored_rect(main, corner, size, options.gap);
            let step = layer * (options.height + options.gap);
            match corner {
                Corner::TopLeft | Corner::TopRight => rect.y += step,
                Corner::BottomLeft | Corner::BottomRight => rect.y -= step,
            }
            rect
        })
        .collect()
}

/// Square reset control in the top-right corner of `rect`.
#[must_use]
pub fn reset_button_rect(rect: Rect, size: f32) -> Rect {
    let size = size.min(rect.width).min(rect.height);
    let margin = (size * 0.25).min(4.0);
    Rect::new(
        rect.x + rect.width - size - margin,
        rect.y + margin,
        size,
        size,
    )
}
