//! Serializable snapshot handed to a renderer.

use serde::Serialize;

use crate::cluster::Assignment;
use crate::geometry::{Bounds, Point};
use crate::session::Phase;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Scene {
    pub width: f64,
    pub height: f64,
    pub phase: Phase,
    pub k: usize,
    pub points: Vec<ScenePoint>,
    pub centroids: Vec<SceneCentroid>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ScenePoint {
    pub x: f64,
    pub y: f64,
    /// Present only while the assignment covers every point; renderers draw
    /// the point-to-centroid link and cluster color from it.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cluster: Option<usize>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SceneCentroid {
    pub index: usize,
    pub x: f64,
    pub y: f64,
}

impl Scene {
    #[must_use]
    pub fn build(
        bounds: &Bounds,
        phase: Phase,
        k: usize,
        points: &[Point],
        centroids: &[Point],
        assignment: Option<&Assignment>,
    ) -> Self {
        let clusters = assignment
            .filter(|a| a.len() == points.len())
            .map(Assignment::as_slice);

        let points = points
            .iter()
            .enumerate()
            .map(|(i, p)| ScenePoint {
                x: p.x,
                y: p.y,
                cluster: clusters.map(|c| c[i]),
            })
            .collect();

        let centroids = centroids
            .iter()
            .enumerate()
            .map(|(index, c)| SceneCentroid {
                index,
                x: c.x,
                y: c.y,
            })
            .collect();

        Self {
            width: bounds.width(),
            height: bounds.height(),
            phase,
            k,
            points,
            centroids,
        }
    }
}
