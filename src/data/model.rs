use std::fmt;

// ---------------------------------------------------------------------------
// Axis – one coordinate component of a point
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Axis {
    X,
    Y,
    Z,
}

impl Axis {
    /// Column order in the source files.
    pub const ALL: [Axis; 3] = [Axis::X, Axis::Y, Axis::Z];

    pub fn label(self) -> &'static str {
        match self {
            Axis::X => "X",
            Axis::Y => "Y",
            Axis::Z => "Z",
        }
    }
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// ---------------------------------------------------------------------------
// Point – one row of a point-cloud file
// ---------------------------------------------------------------------------

/// A single 3D sample. Units are whatever the source file uses.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Point {
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Point { x, y, z }
    }

    pub fn component(&self, axis: Axis) -> f64 {
        match axis {
            Axis::X => self.x,
            Axis::Y => self.y,
            Axis::Z => self.z,
        }
    }
}

// ---------------------------------------------------------------------------
// PointCloud – all points of one file, in file order
// ---------------------------------------------------------------------------

/// Points are kept in source order so that a save reproduces the rows as read.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PointCloud {
    points: Vec<Point>,
}

impl PointCloud {
    pub fn from_points(points: Vec<Point>) -> Self {
        PointCloud { points }
    }

    pub fn points(&self) -> &[Point] {
        &self.points
    }

    /// Number of points.
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Whether the cloud is empty.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Lowest and highest Z, or `None` for an empty cloud.
    pub fn z_range(&self) -> Option<(f64, f64)> {
        self.points.iter().fold(None, |acc, p| match acc {
            None => Some((p.z, p.z)),
            Some((lo, hi)) => Some((lo.min(p.z), hi.max(p.z))),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn component_follows_axis() {
        let p = Point::new(1.0, 2.0, 3.0);
        let values: Vec<f64> = Axis::ALL.iter().map(|&a| p.component(a)).collect();
        assert_eq!(values, vec![1.0, 2.0, 3.0]);
    }

    #[test]
    fn z_range_of_empty_cloud_is_none() {
        assert_eq!(PointCloud::default().z_range(), None);
    }

    #[test]
    fn z_range_spans_all_points() {
        let cloud = PointCloud::from_points(vec![
            Point::new(0.0, 0.0, 4.5),
            Point::new(0.0, 0.0, -1.0),
            Point::new(0.0, 0.0, 12.0),
        ]);
        assert_eq!(cloud.z_range(), Some((-1.0, 12.0)));
    }
}
