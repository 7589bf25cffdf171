//! FieldExplainer - Floating icon placement
//!
//! The icon sits just below and to the right of the cursor. Near the right
//! or bottom edge of the cursor's monitor it flips to the other side.

use tauri::{PhysicalPosition, PhysicalSize};

/// Icon edge length in physical pixels
pub const ICON_SIZE: i32 = 32;
/// Gap between cursor and icon
pub const ICON_MARGIN: i32 = 10;

/// Top-left corner for the icon
///
/// `monitor` is the work area (position and size) of the monitor under the
/// cursor; without it the icon is placed at the default offset. The right
/// and bottom bounds are the last pixel inside the area, so an icon ending
/// exactly on the edge still flips.
pub fn icon_position(
    cursor: PhysicalPosition<i32>,
    monitor: Option<(PhysicalPosition<i32>, PhysicalSize<u32>)>,
) -> PhysicalPosition<i32> {
    let mut x = cursor.x + ICON_MARGIN;
    let mut y = cursor.y + ICON_MARGIN;

    if let Some((origin, size)) = monitor {
        let right = origin.x + size.width as i32 - 1;
        let bottom = origin.y + size.height as i32 - 1;

        if x + ICON_SIZE > right {
            x = cursor.x - ICON_SIZE - ICON_MARGIN;
        }
        if y + ICON_SIZE > bottom {
            y = cursor.y - ICON_SIZE - ICON_MARGIN;
        }
    }

    PhysicalPosition::new(x, y)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn screen() -> Option<(PhysicalPosition<i32>, PhysicalSize<u32>)> {
        Some((PhysicalPosition::new(0, 0), PhysicalSize::new(1920, 1080)))
    }

    #[test]
    fn default_offset_below_right() {
        let pos = icon_position(PhysicalPosition::new(100, 200), screen());
        assert_eq!(pos, PhysicalPosition::new(110, 210));
    }

    #[test]
    fn flips_left_near_right_edge() {
        let pos = icon_position(PhysicalPosition::new(1900, 200), screen());
        assert_eq!(pos, PhysicalPosition::new(1858, 210));
    }

    #[test]
    fn flips_up_near_bottom_edge() {
        let pos = icon_position(PhysicalPosition::new(100, 1060), screen());
        assert_eq!(pos, PhysicalPosition::new(110, 1018));
    }

    #[test]
    fn flips_both_in_corner() {
        let pos = icon_position(PhysicalPosition::new(1915, 1075), screen());
        assert_eq!(pos, PhysicalPosition::new(1873, 1033));
    }

    #[test]
    fn icon_touching_right_edge_flips() {
        // 1878 + 10 + 32 == 1920, one past the last column
        let pos = icon_position(PhysicalPosition::new(1878, 0), screen());
        assert_eq!(pos.x, 1836);
    }

    #[test]
    fn icon_one_pixel_inside_stays() {
        let pos = icon_position(PhysicalPosition::new(1877, 0), screen());
        assert_eq!(pos.x, 1887);
    }

    #[test]
    fn icon_touching_bottom_edge_flips() {
        // Work area above a 40px taskbar
        let work_area = Some((PhysicalPosition::new(0, 0), PhysicalSize::new(1920, 1040)));
        let pos = icon_position(PhysicalPosition::new(100, 998), work_area);
        assert_eq!(pos.y, 956);
        let pos = icon_position(PhysicalPosition::new(100, 997), work_area);
        assert_eq!(pos.y, 1007);
    }

    #[test]
    fn secondary_monitor_uses_its_own_bounds() {
        let monitor = Some((PhysicalPosition::new(1920, 0), PhysicalSize::new(1280, 1024)));
        let pos = icon_position(PhysicalPosition::new(3190, 500), monitor);
        assert_eq!(pos, PhysicalPosition::new(3148, 510));
    }

    #[test]
    fn no_monitor_keeps_default_offset() {
        let pos = icon_position(PhysicalPosition::new(5000, 5000), None);
        assert_eq!(pos, PhysicalPosition::new(5010, 5010));
    }
}
