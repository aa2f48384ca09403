//! `Cluster`: a connected, single-BFS-depth slab of a component, with a
//! centroid, a radius, and adjacency to its sibling clusters.
//!
//! Adjacency is a `BTreeSet<usize>` of indices into the owning `Vec<Cluster>`
//! rather than a raw/weak pointer set: indices are plain data, so the
//! graph stays `Send`/`Sync` for free and iterates in a reproducible
//! order independent of any hasher's seed.

use std::collections::BTreeSet;

pub type Point = (i32, i32, i32);

/// A connected slab of voxel positions, plus geometry filled in by the
/// `Builder`.
#[derive(Debug, Clone)]
pub struct Cluster {
    points: Vec<Point>,
    centroid: Option<(f64, f64, f64)>,
    radius: Option<f64>,
    adjacency: BTreeSet<usize>,
}

impl Cluster {
    /// Creates a new cluster from its member points. Panics if `points`
    /// is empty: an empty cluster is a precondition violation, not a
    /// degenerate-but-valid input.
    pub fn new(points: Vec<Point>) -> Self {
        assert!(!points.is_empty(), "a Cluster must contain at least one point");
        Cluster {
            points,
            centroid: None,
            radius: None,
            adjacency: BTreeSet::new(),
        }
    }

    pub fn points(&self) -> &[Point] {
        &self.points
    }

    /// Arithmetic mean of member points, componentwise.
    pub fn compute_gravity_point(&mut self) {
        let n = self.points.len() as f64;
        let (sx, sy, sz) = self
            .points
            .iter()
            .fold((0.0, 0.0, 0.0), |(sx, sy, sz), &(x, y, z)| (sx + x as f64, sy + y as f64, sz + z as f64));
        self.centroid = Some((sx / n, sy / n, sz / n));
    }

    pub fn centroid(&self) -> (f64, f64, f64) {
        self.centroid
            .expect("compute_gravity_point must be called before centroid() is read")
    }

    /// Radius of the scaled axis-aligned envelope around the centroid.
    /// Requires `compute_gravity_point` to have already run.
    pub fn compute_radius(&mut self, scale_xy: f64, scale_z: f64) {
        let (gx, gy, gz) = self.centroid();
        let mut mdx = 0.0_f64;
        let mut mdy = 0.0_f64;
        let mut mdz = 0.0_f64;
        for &(x, y, z) in &self.points {
            mdx = mdx.max(scale_xy * (x as f64 - gx).abs());
            mdy = mdy.max(scale_xy * (y as f64 - gy).abs());
            mdz = mdz.max(scale_z * (z as f64 - gz).abs());
        }
        self.radius = Some((mdx * mdx + mdy * mdy + mdz * mdz).sqrt());
    }

    pub fn radius(&self) -> f64 {
        self.radius.expect("compute_radius must be called before radius() is read")
    }

    pub fn is_radius_computed(&self) -> bool {
        self.radius.is_some()
    }

    pub fn adjacency(&self) -> &BTreeSet<usize> {
        &self.adjacency
    }

    pub fn connect(&mut self, other: usize) {
        self.adjacency.insert(other);
    }

    pub fn disconnect(&mut self, other: usize) {
        self.adjacency.remove(&other);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    #[should_panic(expected = "at least one point")]
    fn empty_cluster_is_a_precondition_violation() {
        Cluster::new(vec![]);
    }

    #[test]
    fn centroid_is_componentwise_mean() {
        let mut cluster = Cluster::new(vec![(0, 0, 0), (2, 0, 0), (0, 2, 0), (0, 0, 2)]);
        cluster.compute_gravity_point();
        let (gx, gy, gz) = cluster.centroid();
        assert!(float_cmp::approx_eq!(f64, gx, 0.5, ulps = 4));
        assert!(float_cmp::approx_eq!(f64, gy, 0.5, ulps = 4));
        assert!(float_cmp::approx_eq!(f64, gz, 0.5, ulps = 4));
    }

    #[test]
    fn radius_is_envelope_diagonal() {
        let mut cluster = Cluster::new(vec![(0, 0, 0), (2, 0, 0)]);
        cluster.compute_gravity_point();
        cluster.compute_radius(1.0, 1.0);
        assert!(float_cmp::approx_eq!(f64, cluster.radius(), 1.0, ulps = 4));
    }

    #[test]
    fn anisotropic_scales_affect_radius() {
        let mut cluster = Cluster::new(vec![(0, 0, 0), (0, 0, 4)]);
        cluster.compute_gravity_point();
        cluster.compute_radius(1.0, 2.0);
        // half-extent along z is 2, scaled by 2.0 => 4
        assert!(float_cmp::approx_eq!(f64, cluster.radius(), 4.0, ulps = 4));
    }

    #[test]
    #[should_panic(expected = "compute_radius must be called")]
    fn radius_before_computed_panics() {
        let cluster = Cluster::new(vec![(0, 0, 0)]);
        cluster.radius();
    }

    #[test]
    fn singleton_cluster_has_zero_radius() {
        let mut cluster = Cluster::new(vec![(3, 3, 3)]);
        cluster.compute_gravity_point();
        cluster.compute_radius(1.0, 1.0);
        assert!(float_cmp::approx_eq!(f64, cluster.radius(), 0.0, ulps = 4));
    }
}
