//! 26-connected component labeling and level-set cluster extraction.
//!
//! Translated from `examples/original_source/sigen_core/extractor/extractor.cpp`,
//! with the recursive `set_label` flood fill replaced by the iterative
//! `bfs_collect`: recursion depth there is bounded only by component
//! diameter, which is unacceptable for volumes up to ~10^8 voxels.

use std::collections::BTreeSet;
use std::collections::HashMap;

use crate::core::cluster::{Cluster, Point};
use crate::core::volume::BinaryVolume;
use crate::util::graph;

const NEIGHBOR_OFFSETS: [(i32, i32, i32); 26] = build_offsets();

const fn build_offsets() -> [(i32, i32, i32); 26] {
    let mut offsets = [(0, 0, 0); 26];
    let mut idx = 0;
    let mut dx = -1i32;
    while dx <= 1 {
        let mut dy = -1i32;
        while dy <= 1 {
            let mut dz = -1i32;
            while dz <= 1 {
                if !(dx == 0 && dy == 0 && dz == 0) {
                    offsets[idx] = (dx, dy, dz);
                    idx += 1;
                }
                dz += 1;
            }
            dy += 1;
        }
        dx += 1;
    }
    offsets
}

/// One 26-connected component: its voxel positions and their local
/// adjacency, indexed 0..len in ascending lex (x, y, z) order.
struct Component {
    points: Vec<Point>,
    adjacency: Vec<BTreeSet<usize>>,
}

/// Turns a binary volume into an ordered list of clusters. Consumes the
/// volume since the pre-filter mutates it in place and nothing downstream
/// needs it back.
pub struct Extractor;

impl Extractor {
    pub fn extract(mut volume: BinaryVolume) -> Vec<Cluster> {
        volume.clear_frame();
        volume.remove_isolated_voxels();

        let components = Self::labeling(&volume);
        log::info!("labeling found {} component(s)", components.len());

        let mut clusters = Vec::new();
        for component in &components {
            let before = clusters.len();
            Self::extract_component(component, &mut clusters);
            log::debug!(
                "component of {} voxel(s) yielded {} cluster(s)",
                component.points.len(),
                clusters.len() - before
            );
        }
        clusters
    }

    /// Builds the voxel adjacency graph and partitions it into
    /// 26-connected components, sorted by descending size (stable).
    fn labeling(volume: &BinaryVolume) -> Vec<Component> {
        let (x_dim, y_dim, z_dim) = volume.dims();

        let mut index_of: HashMap<Point, usize> = HashMap::new();
        let mut points: Vec<Point> = Vec::new();
        for x in 0..x_dim {
            for y in 0..y_dim {
                for z in 0..z_dim {
                    if volume.get(x, y, z) {
                        let p = (x as i32, y as i32, z as i32);
                        index_of.insert(p, points.len());
                        points.push(p);
                    }
                }
            }
        }

        let n = points.len();
        let mut adjacency: Vec<BTreeSet<usize>> = vec![BTreeSet::new(); n];
        for (i, &(x, y, z)) in points.iter().enumerate() {
            for &(dx, dy, dz) in NEIGHBOR_OFFSETS.iter() {
                if let Some(&j) = index_of.get(&(x + dx, y + dy, z + dz)) {
                    adjacency[i].insert(j);
                }
            }
        }

        let mut label = vec![usize::MAX; n];
        let mut visited = vec![false; n];
        let mut label_count = 0;
        for start in 0..n {
            if visited[start] {
                continue;
            }
            let collected = graph::bfs_collect(&adjacency, start, &mut visited, |_, _| true);
            for idx in collected {
                label[idx] = label_count;
            }
            label_count += 1;
        }

        let mut members: Vec<Vec<usize>> = vec![Vec::new(); label_count];
        for (idx, &l) in label.iter().enumerate() {
            members[l].push(idx);
        }

        let mut components: Vec<Component> = members
            .into_iter()
            .map(|indices| {
                let mut local_of: HashMap<usize, usize> = HashMap::new();
                for (local, &global) in indices.iter().enumerate() {
                    local_of.insert(global, local);
                }
                let local_points: Vec<Point> = indices.iter().map(|&g| points[g]).collect();
                let local_adjacency: Vec<BTreeSet<usize>> = indices
                    .iter()
                    .map(|&g| adjacency[g].iter().map(|n| local_of[n]).collect())
                    .collect();
                Component {
                    points: local_points,
                    adjacency: local_adjacency,
                }
            })
            .collect();

        components.sort_by_key(|c| std::cmp::Reverse(c.points.len()));
        components
    }

    /// Slices one component into level-set clusters.
    fn extract_component(component: &Component, out: &mut Vec<Cluster>) {
        let n = component.points.len();
        if n == 0 {
            return;
        }

        // Step A: double-BFS pseudo-endpoint seed.
        let seed = graph::peripheral_vertex(&component.adjacency, 0);

        // Step B: BFS distance field from the seed.
        let distances = graph::bfs_distances(&component.adjacency, seed);

        // Step C: level-set clustering.
        let mut visited = vec![false; n];
        for start in 0..n {
            if visited[start] {
                continue;
            }
            let collected = graph::bfs_collect(&component.adjacency, start, &mut visited, |current, next| {
                distances[next] == distances[current]
            });
            let cluster_points: Vec<Point> = collected.iter().map(|&idx| component.points[idx]).collect();
            out.push(Cluster::new(cluster_points));
        }
    }
}
