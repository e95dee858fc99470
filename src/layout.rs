//! Master-stack tiling.
//!
//! The first window (the master) takes the left part of the screen; every
//! other window is stacked top to bottom in the remaining column.  A single
//! window gets the whole screen.

use crate::event::{Geometry, ScreenSize};

/// Share of the screen width given to the master pane by default.
pub const DEFAULT_MASTER_RATIO: f64 = 0.5;

const MIN_MASTER_RATIO: f64 = 0.1;
const MAX_MASTER_RATIO: f64 = 0.9;

/// Compute one [`Geometry`] per window for `count` windows on `screen`.
///
/// The result is ordered like the client list: index 0 is the master,
/// index 1 the topmost stacked window, and so on.  `master_ratio` is clamped
/// to a usable range; the master width is truncated to whole pixels.
///
/// Stacked windows share the height evenly.  The last one also takes the
/// rows left over by the integer division so the column is fully covered.
///
/// No width or height is ever 0, which X rejects.  When there are more
/// stacked windows than screen rows each gets a single row and the extra
/// ones run past the bottom edge.
pub fn master_stack(count: usize, screen: ScreenSize, master_ratio: f64) -> Vec<Geometry> {
    let ScreenSize { width, height } = screen;
    match count {
        0 => Vec::new(),
        1 => vec![Geometry::new(0, 0, width, height)],
        _ => {
            let ratio = master_ratio.clamp(MIN_MASTER_RATIO, MAX_MASTER_RATIO);
            let master_width = ((width as f64 * ratio) as u32).max(1);
            let stack_width = width.saturating_sub(master_width).max(1);
            let stacked = (count - 1) as u32;
            let row_height = (height / stacked).max(1);

            let mut out = Vec::with_capacity(count);
            out.push(Geometry::new(0, 0, master_width, height));
            for i in 0..stacked {
                let y = i * row_height;
                let h = if i + 1 == stacked {
                    height.saturating_sub(y).max(1)
                } else {
                    row_height
                };
                out.push(Geometry::new(master_width as i32, y as i32, stack_width, h));
            }
            out
        }
    }
}
