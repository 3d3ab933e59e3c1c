//! Anchor arithmetic for positioning blits.

/// Horizontal reference point on an image rectangle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HAnchor {
    #[default]
    Left,
    Center,
    Right,
}

/// Vertical reference point on an image rectangle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum VAnchor {
    #[default]
    Top,
    Middle,
    Bottom,
}

/// Converts a "draw at this point" request into the top-left corner of the
/// destination rectangle, given the anchor the point refers to.
pub fn anchored_top_left(
    pos: (f32, f32),
    size: (u32, u32),
    h_anchor: HAnchor,
    v_anchor: VAnchor,
) -> (f32, f32) {
    let (x, y) = pos;
    let (w, h) = (size.0 as f32, size.1 as f32);
    let x = match h_anchor {
        HAnchor::Left => x,
        HAnchor::Center => x - w / 2.0,
        HAnchor::Right => x - w,
    };
    let y = match v_anchor {
        VAnchor::Top => y,
        VAnchor::Middle => y - h / 2.0,
        VAnchor::Bottom => y - h,
    };
    (x, y)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_top_left_is_identity() {
        let pos = anchored_top_left((10.0, 20.0), (64, 32), HAnchor::Left, VAnchor::Top);
        assert_eq!(pos, (10.0, 20.0));
    }

    #[test]
    fn test_center_middle_subtracts_half_extent() {
        let pos = anchored_top_left((100.0, 100.0), (64, 32), HAnchor::Center, VAnchor::Middle);
        assert_eq!(pos, (100.0 - 32.0, 100.0 - 16.0));
    }

    #[test]
    fn test_right_bottom_subtracts_full_extent() {
        let pos = anchored_top_left((100.0, 100.0), (64, 32), HAnchor::Right, VAnchor::Bottom);
        assert_eq!(pos, (36.0, 68.0));
    }

    #[test]
    fn test_anchors_default_to_top_left() {
        assert_eq!(HAnchor::default(), HAnchor::Left);
        assert_eq!(VAnchor::default(), VAnchor::Top);
    }
}
