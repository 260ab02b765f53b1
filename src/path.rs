use crate::layout::{LinkLayout, SankeyLayout};

pub const DEFAULT_CURVATURE: f64 = 0.5;

/// Generates the cubic band centerline for a laid-out link, running from the
/// right edge of the source node to the left edge of the target node.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinkPath {
    curvature: f64,
}

impl Default for LinkPath {
    fn default() -> Self {
        Self {
            curvature: DEFAULT_CURVATURE,
        }
    }
}

impl LinkPath {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn curvature(&self) -> f64 {
        self.curvature
    }

    pub fn set_curvature(&mut self, curvature: f64) -> &mut Self {
        self.curvature = curvature;
        self
    }

    pub fn path(&self, layout: &SankeyLayout, link: &LinkLayout) -> String {
        let source = &layout.nodes[link.source];
        let target = &layout.nodes[link.target];
        let x0 = source.x + source.width;
        let x1 = target.x;
        let x2 = interpolate(x0, x1, self.curvature);
        let x3 = interpolate(x0, x1, 1.0 - self.curvature);
        let y0 = source.y + link.source_offset + link.height / 2.0;
        let y1 = target.y + link.target_offset + link.height / 2.0;
        format!("M{x0},{y0}C{x2},{y0} {x3},{y1} {x1},{y1}")
    }
}

fn interpolate(a: f64, b: f64, t: f64) -> f64 {
    a * (1.0 - t) + b * t
}
