use crate::data::model::{Axis, PointCloud};

// ---------------------------------------------------------------------------
// Axis pairs
// ---------------------------------------------------------------------------

/// The plane a projection lies in: which component goes along the
/// horizontal and which along the vertical plot axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AxisPair {
    pub horizontal: Axis,
    pub vertical: Axis,
}

impl AxisPair {
    pub const XZ: AxisPair = AxisPair {
        horizontal: Axis::X,
        vertical: Axis::Z,
    };
    pub const YZ: AxisPair = AxisPair {
        horizontal: Axis::Y,
        vertical: Axis::Z,
    };

    pub fn title(self) -> String {
        format!("{}{}", self.horizontal, self.vertical)
    }
}

/// Side and front elevation, the two views used to pick a crown height.
pub const ELEVATIONS: [AxisPair; 2] = [AxisPair::XZ, AxisPair::YZ];

// ---------------------------------------------------------------------------
// Projection
// ---------------------------------------------------------------------------

/// One 2D view of a cloud, rebuilt for every frame and never stored.
#[derive(Debug, Clone, PartialEq)]
pub struct Projection {
    pub axes: AxisPair,
    /// One entry per source point, in source order.
    pub points: Vec<[f64; 2]>,
    /// Height of the horizontal reference line, if one is drawn.
    pub reference: Option<f64>,
}

/// Drop the unused coordinate of every point for each requested plane.
pub fn project(cloud: &PointCloud, pairs: &[AxisPair]) -> Vec<Projection> {
    pairs
        .iter()
        .map(|&axes| Projection {
            axes,
            points: cloud
                .points()
                .iter()
                .map(|p| [p.component(axes.horizontal), p.component(axes.vertical)])
                .collect(),
            reference: None,
        })
        .collect()
}

/// Annotate projections with a horizontal line at height `z`.
///
/// Only planes whose vertical axis is Z get the line; the points are not
/// touched. Passing `None` clears any line.
pub fn with_reference_line(projections: Vec<Projection>, z: Option<f64>) -> Vec<Projection> {
    projections
        .into_iter()
        .map(|mut proj| {
            proj.reference = z.filter(|_| proj.axes.vertical == Axis::Z);
            proj
        })
        .collect()
}
