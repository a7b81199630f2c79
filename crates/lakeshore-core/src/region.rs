use crate::rng::RandomSource;
use serde::{Deserialize, Serialize};

/// Axis-aligned world rectangle `[0, width] x [0, height]`.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct WorldBounds {
    pub width: f64,
    pub height: f64,
}

impl WorldBounds {
    pub fn contains(&self, point: [f64; 2]) -> bool {
        (0.0..=self.width).contains(&point[0]) && (0.0..=self.height).contains(&point[1])
    }

    pub fn clamp(&self, point: [f64; 2]) -> [f64; 2] {
        [
            point[0].clamp(0.0, self.width),
            point[1].clamp(0.0, self.height),
        ]
    }

    /// Whether a clamped point sits on the left/right and top/bottom edges.
    pub fn touches_edge(&self, point: [f64; 2]) -> (bool, bool) {
        (
            point[0] <= 0.0 || point[0] >= self.width,
            point[1] <= 0.0 || point[1] >= self.height,
        )
    }
}

/// Ellipse inscribed in the rectangle `[x_min, x_max] x [y_min, y_max]`.
///
/// Fish live only inside it; every other species treats it as an obstacle.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Lake {
    pub x_min: f64,
    pub x_max: f64,
    pub y_min: f64,
    pub y_max: f64,
}

impl Default for Lake {
    fn default() -> Self {
        Self {
            x_min: 140.0,
            x_max: 340.0,
            y_min: 90.0,
            y_max: 290.0,
        }
    }
}

impl Lake {
    pub fn center(&self) -> [f64; 2] {
        [
            (self.x_min + self.x_max) / 2.0,
            (self.y_min + self.y_max) / 2.0,
        ]
    }

    pub fn radii(&self) -> [f64; 2] {
        [
            (self.x_max - self.x_min) / 2.0,
            (self.y_max - self.y_min) / 2.0,
        ]
    }

    /// Closed-region membership: points on the rim count as inside.
    pub fn contains(&self, point: [f64; 2]) -> bool {
        let [cx, cy] = self.center();
        let [rx, ry] = self.radii();
        let nx = (point[0] - cx) / rx;
        let ny = (point[1] - cy) / ry;
        nx * nx + ny * ny <= 1.0
    }

    /// Rejection-sample a uniform point inside the lake.
    ///
    /// The ellipse fills ~78.5% of its bounding box, so the expected number of
    /// trials is about 1.27.
    pub fn random_point<R: RandomSource + ?Sized>(&self, rng: &mut R) -> [f64; 2] {
        loop {
            let x = rng.uniform_range(self.x_min, self.x_max);
            let y = rng.uniform_range(self.y_min, self.y_max);
            if self.contains([x, y]) {
                return [x, y];
            }
        }
    }

    /// True when the bounding rectangle lies strictly inside the world, so the
    /// world edge never touches water.
    pub fn fits_within(&self, bounds: &WorldBounds) -> bool {
        self.x_min > 0.0
            && self.y_min > 0.0
            && self.x_max < bounds.width
            && self.y_max < bounds.height
    }
}
