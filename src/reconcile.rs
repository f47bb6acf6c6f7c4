//! Coordinate-space reconciliation
//!
//! A window is described by four rectangles:
//!
//! - **user**: what the application sees, in logical units (96 DPI = 1.0)
//! - **actual**: the visible frame in physical pixels (DWM extended frame bounds)
//! - **reported**: what `GetWindowRect` returns, i.e. actual plus the
//!   invisible resize border Windows 10 pads around sizable windows
//! - **client**: the drawable area inside the frame
//!
//! Everything here is pure. Logical/physical conversion rounds half away
//! from zero in both directions, so a logical value survives a trip through
//! physical pixels unchanged at any scale of 1.0 or above.

use serde::{Deserialize, Serialize};

use crate::events::DragEdge;
use crate::geometry::{Insets, Rect, Size};

/// DPI at which one logical unit equals one pixel
pub const BASE_DPI: u32 = 96;

/// Scale factor for a raw DPI value
pub fn scale_for(dpi: u32) -> f64 {
    if dpi == 0 {
        1.0
    } else {
        dpi as f64 / BASE_DPI as f64
    }
}

/// Scale a logical length to pixels
pub fn to_physical(value: i32, scale: f64) -> i32 {
    (value as f64 * scale).round() as i32
}

/// Scale a pixel length to logical units
pub fn to_logical(value: i32, scale: f64) -> i32 {
    (value as f64 / scale).round() as i32
}

pub fn size_to_physical(size: Size, scale: f64) -> Size {
    Size::new(to_physical(size.width, scale), to_physical(size.height, scale))
}

pub fn size_to_logical(size: Size, scale: f64) -> Size {
    Size::new(to_logical(size.width, scale), to_logical(size.height, scale))
}

/// User (logical) rect to actual pixels
pub fn actual_from_user(user: Rect, scale: f64) -> Rect {
    Rect::new(
        to_physical(user.x, scale),
        to_physical(user.y, scale),
        to_physical(user.width, scale),
        to_physical(user.height, scale),
    )
}

/// Actual pixels back to the user rect
pub fn user_from_actual(actual: Rect, scale: f64) -> Rect {
    Rect::new(
        to_logical(actual.x, scale),
        to_logical(actual.y, scale),
        to_logical(actual.width, scale),
        to_logical(actual.height, scale),
    )
}

/// Per-edge padding present in `reported` but not in `actual`
pub fn invisible_borders(actual: Rect, reported: Rect) -> Insets {
    Insets::between(&reported, &actual)
}

pub fn reported_from_actual(actual: Rect, borders: Insets) -> Rect {
    actual.expand(borders)
}

pub fn actual_from_reported(reported: Rect, borders: Insets) -> Rect {
    reported.shrink(borders)
}

/// The rectangle to hand to `SetWindowPos` so the visible frame lands on `user`
pub fn reported_from_user(user: Rect, scale: f64, borders: Insets) -> Rect {
    reported_from_actual(actual_from_user(user, scale), borders)
}

/// Min/max client size in logical units; zero on an axis means unbounded
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SizeLimits {
    pub min: Size,
    pub max: Size,
}

impl SizeLimits {
    pub const fn new(min: Size, max: Size) -> Self {
        Self { min, max }
    }

    pub fn is_unbounded(&self) -> bool {
        self.min.is_zero() && self.max.is_zero()
    }

    /// No negative components and min <= max on every bounded axis
    pub fn is_consistent(&self) -> bool {
        let non_negative =
            self.min.width >= 0 && self.min.height >= 0 && self.max.width >= 0 && self.max.height >= 0;
        let ordered = |min: i32, max: i32| max == 0 || min <= max;
        non_negative
            && ordered(self.min.width, self.max.width)
            && ordered(self.min.height, self.max.height)
    }

    pub fn contains(&self, size: Size) -> bool {
        clamp_client(size, self) == size
    }

    /// The same limits in physical pixels
    pub fn to_physical(&self, scale: f64) -> SizeLimits {
        SizeLimits::new(size_to_physical(self.min, scale), size_to_physical(self.max, scale))
    }
}

fn clamp_axis(value: i32, min: i32, max: i32) -> i32 {
    let value = if min > 0 { value.max(min) } else { value };
    if max > 0 {
        value.min(max)
    } else {
        value
    }
}

/// Clamp a client size into the limits, axis by axis
pub fn clamp_client(size: Size, limits: &SizeLimits) -> Size {
    Size::new(
        clamp_axis(size.width, limits.min.width, limits.max.width),
        clamp_axis(size.height, limits.min.height, limits.max.height),
    )
}

/// Correct a live-drag proposal so the client area honours `limits`.
///
/// `proposal` is the outer window rect the OS wants to apply, `non_client`
/// is the outer-minus-client size for the current frame, both in pixels.
/// The edge under the cursor absorbs the correction while the opposite
/// edge stays where it was. Returns `None` when the proposal is already
/// acceptable or no limits are set.
pub fn constrain_sizing(
    proposal: Rect,
    edge: DragEdge,
    non_client: Size,
    limits: &SizeLimits,
    scale: f64,
) -> Option<Rect> {
    if limits.is_unbounded() {
        return None;
    }

    let client = Size::new(
        proposal.width - non_client.width,
        proposal.height - non_client.height,
    );
    let clamped = clamp_client(client, &limits.to_physical(scale));
    if clamped == client {
        return None;
    }

    let width = clamped.width + non_client.width;
    let height = clamped.height + non_client.height;
    let x = if edge.moves_left() {
        proposal.right() - width
    } else {
        proposal.x
    };
    let y = if edge.moves_top() {
        proposal.bottom() - height
    } else {
        proposal.y
    };

    Some(Rect::new(x, y, width, height))
}

#[cfg(test)]
mod tests {
    use super::*;

    const SCALES: [f64; 4] = [1.0, 1.25, 1.5, 2.0];

    #[test]
    fn user_rect_round_trips_through_reported() {
        let borders = Insets::new(7, 0, 7, 7);
        let rects = [
            Rect::new(0, 0, 1, 1),
            Rect::new(100, 100, 400, 400),
            Rect::new(-1913, -7, 641, 479),
            Rect::new(37, 91, 1023, 767),
            Rect::new(3, 5, 7, 11),
        ];

        for scale in SCALES {
            for user in rects {
                let reported = reported_from_user(user, scale, borders);
                let actual = actual_from_reported(reported, borders);
                assert_eq!(user_from_actual(actual, scale), user, "scale {scale}");
            }
        }
    }

    #[test]
    fn rounding_is_half_away_from_zero() {
        assert_eq!(to_physical(1, 1.5), 2);
        assert_eq!(to_physical(-1, 1.5), -2);
        assert_eq!(to_logical(3, 2.0), 2);
        assert_eq!(to_logical(-3, 2.0), -2);
    }

    #[test]
    fn invisible_borders_are_edge_wise() {
        let reported = Rect::new(93, 100, 416, 439);
        let actual = Rect::new(100, 100, 402, 432);
        let borders = invisible_borders(actual, reported);
        assert_eq!(borders, Insets::new(7, 0, 7, 7));
        assert_eq!(reported_from_actual(actual, borders), reported);
    }

    #[test]
    fn limits_consistency() {
        let ok = SizeLimits::new(Size::new(200, 0), Size::new(800, 600));
        assert!(ok.is_consistent());
        let inverted = SizeLimits::new(Size::new(900, 0), Size::new(800, 0));
        assert!(!inverted.is_consistent());
        let negative = SizeLimits::new(Size::new(-1, 0), Size::ZERO);
        assert!(!negative.is_consistent());
        // an unbounded max never conflicts with a min
        assert!(SizeLimits::new(Size::new(900, 900), Size::ZERO).is_consistent());
    }

    #[test]
    fn clamp_treats_zero_as_unbounded() {
        let limits = SizeLimits::new(Size::new(200, 0), Size::new(0, 300));
        assert_eq!(clamp_client(Size::new(50, 50), &limits), Size::new(200, 50));
        assert_eq!(clamp_client(Size::new(5000, 5000), &limits), Size::new(5000, 300));
    }

    #[test]
    fn in_range_proposals_pass_through() {
        let limits = SizeLimits::new(Size::new(200, 200), Size::new(800, 800));
        let non_client = Size::new(16, 39);
        for edge in [DragEdge::Left, DragEdge::BottomRight, DragEdge::Top] {
            let proposal = Rect::new(10, 10, 500 + 16, 500 + 39);
            assert_eq!(constrain_sizing(proposal, edge, non_client, &limits, 1.0), None);
        }
        let unbounded = SizeLimits::default();
        let tiny = Rect::new(0, 0, 20, 40);
        assert_eq!(constrain_sizing(tiny, DragEdge::Left, non_client, &unbounded, 1.0), None);
    }

    #[test]
    fn dragged_edge_absorbs_the_correction() {
        let limits = SizeLimits::new(Size::new(200, 200), Size::new(800, 800));
        let non_client = Size::new(16, 39);

        // shrinking from the left: right edge must stay put
        let proposal = Rect::from_edges(400, 100, 500, 400);
        let fixed = constrain_sizing(proposal, DragEdge::Left, non_client, &limits, 1.0).unwrap();
        assert_eq!(fixed.right(), 500);
        assert_eq!(fixed.width - non_client.width, 200);
        assert_eq!(fixed.y, proposal.y);

        // growing from the top-left corner: bottom-right stays put
        let proposal = Rect::from_edges(-1000, -1000, 500, 500);
        let fixed =
            constrain_sizing(proposal, DragEdge::TopLeft, non_client, &limits, 1.0).unwrap();
        assert_eq!((fixed.right(), fixed.bottom()), (500, 500));
        assert_eq!(fixed.size(), Size::new(816, 839));

        // shrinking from the bottom-right: origin stays put
        let proposal = Rect::new(50, 60, 30, 30);
        let fixed =
            constrain_sizing(proposal, DragEdge::BottomRight, non_client, &limits, 1.0).unwrap();
        assert_eq!(fixed.origin(), proposal.origin());
        assert_eq!(fixed.size(), Size::new(216, 239));
    }

    #[test]
    fn limits_scale_with_dpi() {
        let limits = SizeLimits::new(Size::new(200, 200), Size::ZERO);
        let non_client = Size::new(20, 49);
        let proposal = Rect::new(0, 0, 100, 100);
        let fixed =
            constrain_sizing(proposal, DragEdge::Right, non_client, &limits, 1.5).unwrap();
        assert_eq!(fixed.size(), Size::new(300 + 20, 300 + 49));
    }
}
