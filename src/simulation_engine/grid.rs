use crate::global_variables::{CANVAS_HEIGHT, CANVAS_WIDTH, GRID_SPACING, VEHICLE_RADIUS};

/// A straight grid line in screen coordinates.
pub type GridLine = ((i32, i32), (i32, i32));

/// The drawing surface the simulation is rendered onto.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Canvas {
    pub width: u32,
    pub height: u32,
    /// Distance between grid lines on both axes.
    pub grid_spacing: u32,
    pub vehicle_radius: u32,
}

impl Default for Canvas {
    fn default() -> Self {
        Self {
            width: CANVAS_WIDTH,
            height: CANVAS_HEIGHT,
            grid_spacing: GRID_SPACING,
            vehicle_radius: VEHICLE_RADIUS,
        }
    }
}

impl Canvas {
    /// Maps a world position to pixel coordinates. The y axis is inverted so
    /// that y = 0 sits on the bottom edge.
    pub fn to_screen(&self, x: f64, y: f64) -> (i32, i32) {
        let sx = x.round() as i32;
        let sy = (f64::from(self.height) - y).round() as i32;
        (sx, sy)
    }

    /// Whether a circle of the vehicle radius centred at `point` touches the canvas.
    pub fn is_visible(&self, (sx, sy): (i32, i32)) -> bool {
        let r = self.vehicle_radius as i32;
        sx + r >= 0 && sy + r >= 0 && sx - r <= self.width as i32 && sy - r <= self.height as i32
    }

    /// Horizontal lines first, then vertical ones. Both edges at 0 are
    /// included, and the far edge when the size is a multiple of the spacing.
    pub fn grid_lines(&self) -> Vec<GridLine> {
        if self.grid_spacing == 0 {
            return Vec::new();
        }
        let (w, h) = (self.width as i32, self.height as i32);
        let step = self.grid_spacing as usize;

        let horizontal = (0..=h).step_by(step).map(|y| ((0, y), (w, y)));
        let vertical = (0..=w).step_by(step).map(|x| ((x, 0), (x, h)));
        horizontal.chain(vertical).collect()
    }
}
