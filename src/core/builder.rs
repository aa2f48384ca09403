//! `Builder`: turns a list of geometry-less clusters into a list of
//! rooted neuron trees.
//!
//! Translated from `examples/original_source/src/sigen/builder/builder.cpp`.
//! The flagged `FIXME TOOOOOO SLOW` O(N^2) node re-lookup in
//! `convert_to_neuron` is replaced by direct arena-index translation;
//! the `is_radius_computed_` gate that file uses for `cut_loops` is kept,
//! moved from a bare bool into `Builder` so the wrong call order is a
//! compile-visible misuse of the type rather than a silent landmine.

use std::collections::BTreeSet;
use std::collections::HashMap;

use crate::core::cluster::{Cluster, Point};
use crate::core::neuron::{Neuron, NeuronNode, Role};
use crate::core::volume::Scales;
use crate::util::dsu::DisjointSet;
use crate::util::graph;

const ADJACENCY_OFFSETS: [(i32, i32, i32); 27] = build_offsets();

const fn build_offsets() -> [(i32, i32, i32); 27] {
    let mut offsets = [(0, 0, 0); 27];
    let mut idx = 0;
    let mut dx = -1i32;
    while dx <= 1 {
        let mut dy = -1i32;
        while dy <= 1 {
            let mut dz = -1i32;
            while dz <= 1 {
                offsets[idx] = (dx, dy, dz);
                idx += 1;
                dz += 1;
            }
            dy += 1;
        }
        dx += 1;
    }
    offsets
}

pub struct Builder {
    scales: Scales,
    radius_computed: bool,
}

impl Builder {
    pub fn new(scales: Scales) -> Self {
        Builder {
            scales,
            radius_computed: false,
        }
    }

    /// Centroid of every cluster.
    pub fn compute_gravity_point(clusters: &mut [Cluster]) {
        for cluster in clusters.iter_mut() {
            cluster.compute_gravity_point();
        }
    }

    /// Radius of every cluster, gating `cut_loops`.
    pub fn compute_radius(&mut self, clusters: &mut [Cluster]) {
        for cluster in clusters.iter_mut() {
            cluster.compute_radius(self.scales.xy, self.scales.z);
        }
        self.radius_computed = true;
    }

    /// Recovers cluster-to-cluster adjacency: two clusters are adjacent
    /// iff some point in one lies in the 26-neighborhood of some point
    /// in the other.
    pub fn connect_neighbor(clusters: &mut [Cluster]) {
        let mut owners: HashMap<Point, Vec<usize>> = HashMap::new();
        for (i, cluster) in clusters.iter().enumerate() {
            for &p in cluster.points() {
                owners.entry(p).or_default().push(i);
            }
        }

        for i in 0..clusters.len() {
            let points = clusters[i].points().to_vec();
            for p in points {
                for &(dx, dy, dz) in ADJACENCY_OFFSETS.iter() {
                    let q = (p.0 + dx, p.1 + dy, p.2 + dz);
                    if let Some(hits) = owners.get(&q) {
                        for &j in hits {
                            if j != i {
                                clusters[i].connect(j);
                            }
                        }
                    }
                }
            }
        }
    }

    /// Removes the lightest edge of every cycle via a maximum-weight
    /// spanning forest: edges are walked heaviest-first, and an edge is
    /// kept only if it still connects two different components.
    pub fn cut_loops(&self, clusters: &mut [Cluster]) {
        assert!(
            self.radius_computed,
            "cut_loops requires compute_radius to have run first"
        );

        let mut edges: Vec<(f64, usize, usize)> = Vec::new();
        for (i, cluster) in clusters.iter().enumerate() {
            for &j in cluster.adjacency() {
                if i < j {
                    edges.push(((cluster.radius() + clusters[j].radius()) / 2.0, i, j));
                }
            }
        }
        // Descending by weight, ties broken by (a, b) index order so the
        // result is reproducible regardless of HashMap iteration order
        // upstream.
        edges.sort_by(|a, b| b.0.partial_cmp(&a.0).unwrap().then((a.1, a.2).cmp(&(b.1, b.2))));

        let mut dsu = DisjointSet::new();
        for i in 0..clusters.len() {
            dsu.add(i);
        }
        dsu.setup();

        let mut kept = 0usize;
        for (_, a, b) in edges {
            if dsu.same(&a, &b) {
                clusters[a].disconnect(b);
                clusters[b].disconnect(a);
            } else {
                dsu.merge(&a, &b);
                kept += 1;
            }
        }
        log::debug!("cut_loops kept {kept} edge(s) across {} cluster(s)", clusters.len());

        debug_assert!(Self::is_forest(clusters), "cluster adjacency graph must be a forest after cut_loops");
    }

    fn is_forest(clusters: &[Cluster]) -> bool {
        let adjacency: Vec<BTreeSet<usize>> = clusters.iter().map(|c| c.adjacency().clone()).collect();
        let edge_count: usize = adjacency.iter().map(|s| s.len()).sum::<usize>() / 2;
        let mut visited = vec![false; clusters.len()];
        let mut components = 0;
        for start in 0..clusters.len() {
            if !visited[start] {
                graph::bfs_collect(&adjacency, start, &mut visited, |_, _| true);
                components += 1;
            }
        }
        edge_count + components == clusters.len()
    }

    /// Transmutes clusters into neuron nodes and splits the forest into
    /// one `Neuron` per connected component. Cluster index and node
    /// index coincide before splitting, so adjacency translates over
    /// directly with no lookup, replacing the upstream's flagged O(N^2)
    /// scan.
    pub fn convert_to_neuron(&self, clusters: Vec<Cluster>) -> Vec<Neuron> {
        let n = clusters.len();
        let scales = self.scales;

        let mut nodes: Vec<NeuronNode> = Vec::with_capacity(n);
        let mut adjacency: Vec<BTreeSet<usize>> = Vec::with_capacity(n);
        for cluster in &clusters {
            let (gx, gy, gz) = cluster.centroid();
            nodes.push(NeuronNode::new(
                (gx * scales.xy, gy * scales.xy, gz * scales.z),
                cluster.radius(),
            ));
            adjacency.push(cluster.adjacency().clone());
        }
        for (i, neighbors) in adjacency.iter().enumerate() {
            for &j in neighbors {
                nodes[i].connect(j);
            }
        }

        let mut used = vec![false; n];
        let mut neurons = Vec::new();
        for start in 0..n {
            if used[start] {
                continue;
            }

            let root_global = graph::peripheral_vertex(&adjacency, start);

            let mut component_visited = vec![false; n];
            let members = graph::bfs_collect(&adjacency, start, &mut component_visited, |_, _| true);
            for &g in &members {
                used[g] = true;
            }

            let mut global_to_local: HashMap<usize, usize> = HashMap::new();
            for (local, &global) in members.iter().enumerate() {
                global_to_local.insert(global, local);
            }

            let local_nodes: Vec<NeuronNode> = members
                .iter()
                .map(|&global| {
                    let source = &nodes[global];
                    let mut local = NeuronNode::new(source.position, source.radius);
                    for &neighbor in source.adjacency() {
                        local.connect(global_to_local[&neighbor]);
                    }
                    local
                })
                .collect();

            let root_local = global_to_local[&root_global];
            neurons.push(Neuron::new(local_nodes, root_local));
        }

        log::info!("convert_to_neuron produced {} neuron(s) from {n} cluster(s)", neurons.len());
        neurons
    }

    /// Assigns globally unique, contiguous 1-based ids and parent
    /// references via DFS from each neuron's root.
    pub fn compute_id(neurons: &mut [Neuron]) {
        let mut counter: usize = 1;
        for neuron in neurons.iter_mut() {
            let root = neuron.root_index();
            Self::compute_id_inner(neuron, root, None, &mut counter);
        }
    }

    fn compute_id_inner(neuron: &mut Neuron, current: usize, parent: Option<usize>, counter: &mut usize) {
        let id = *counter;
        *counter += 1;
        let parent_id = parent.map(|p| neuron.nodes()[p].id as i64).unwrap_or(-1);
        neuron.nodes_mut()[current].id = id;
        neuron.nodes_mut()[current].parent_id = parent_id;

        let neighbors: Vec<usize> = neuron.nodes()[current].adjacency().iter().copied().collect();
        for next in neighbors {
            if Some(next) != parent {
                Self::compute_id_inner(neuron, next, Some(current), counter);
            }
        }
    }

    /// Classifies every node's role by its neighbor count.
    pub fn compute_node_type(neurons: &mut [Neuron]) {
        for neuron in neurons.iter_mut() {
            let root = neuron.root_index();
            Self::compute_node_type_inner(neuron, root, None);
        }
    }

    fn compute_node_type_inner(neuron: &mut Neuron, current: usize, parent: Option<usize>) {
        let degree = neuron.nodes()[current].degree();
        neuron.nodes_mut()[current].role = Role::from_degree(degree);

        let neighbors: Vec<usize> = neuron.nodes()[current].adjacency().iter().copied().collect();
        for next in neighbors {
            if Some(next) != parent {
                Self::compute_node_type_inner(neuron, next, Some(current));
            }
        }
    }

    /// Runs the full pipeline: gravity point, radius, adjacency, loop
    /// cutting, tree splitting, id assignment, role classification.
    pub fn build(&mut self, mut clusters: Vec<Cluster>) -> Vec<Neuron> {
        Self::compute_gravity_point(&mut clusters);
        log::debug!("compute_gravity_point");
        self.compute_radius(&mut clusters);
        log::debug!("compute_radius");
        Self::connect_neighbor(&mut clusters);
        log::debug!("connect_neighbor");
        self.cut_loops(&mut clusters);
        log::debug!("cut_loops");
        let mut neurons = self.convert_to_neuron(clusters);
        log::debug!("convert_to_neuron");
        Self::compute_id(&mut neurons);
        log::debug!("compute_id");
        Self::compute_node_type(&mut neurons);
        log::debug!("compute_node_type");
        neurons
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cluster_at(points: Vec<Point>) -> Cluster {
        Cluster::new(points)
    }

    #[test]
    #[should_panic(expected = "compute_radius to have run first")]
    fn cut_loops_before_radius_panics() {
        let mut clusters = vec![cluster_at(vec![(0, 0, 0)])];
        let builder = Builder::new(Scales::new(1.0, 1.0));
        builder.cut_loops(&mut clusters);
    }

    #[test]
    fn chain_build_produces_one_neuron_with_edge_connect_edge_roles() {
        let clusters = vec![
            cluster_at(vec![(1, 2, 2)]),
            cluster_at(vec![(2, 2, 2)]),
            cluster_at(vec![(3, 2, 2)]),
        ];
        let mut builder = Builder::new(Scales::new(1.0, 1.0));
        let mut clusters = clusters;
        Builder::compute_gravity_point(&mut clusters);
        builder.compute_radius(&mut clusters);
        Builder::connect_neighbor(&mut clusters);
        builder.cut_loops(&mut clusters);
        let mut neurons = builder.convert_to_neuron(clusters);
        Builder::compute_id(&mut neurons);
        Builder::compute_node_type(&mut neurons);

        assert_eq!(neurons.len(), 1);
        let neuron = &neurons[0];
        assert!(neuron.is_tree());
        assert_eq!(neuron.len(), 3);
        let mut roles: Vec<Role> = neuron.nodes().iter().map(|n| n.role).collect();
        roles.sort_by_key(|r| matches!(r, Role::Connect) as u8);
        let edges = roles.iter().filter(|r| matches!(r, Role::Edge)).count();
        let connects = roles.iter().filter(|r| matches!(r, Role::Connect)).count();
        assert_eq!(edges, 2);
        assert_eq!(connects, 1);

        let mut ids: Vec<usize> = neuron.nodes().iter().map(|n| n.id).collect();
        ids.sort();
        assert_eq!(ids, vec![1, 2, 3]);
    }

    #[test]
    fn loop_cut_removes_lightest_edge_of_a_square_ring() {
        // Four clusters forming a ring; the (2,3) edge is the lightest.
        let mut clusters = vec![
            cluster_at(vec![(0, 0, 0), (0, 0, 1), (0, 0, -1), (0, 1, 0), (0, -1, 0)]), // radius ~2
            cluster_at(vec![(4, 0, 0), (4, 0, 1), (4, 0, -1), (4, 1, 0), (4, -1, 0)]), // radius ~2
            cluster_at(vec![(0, 4, 0), (0, 4, 1), (0, 4, -1), (0, 5, 0), (0, 3, 0)]),  // radius ~2
            cluster_at(vec![(4, 4, 0)]),                                              // radius 0 (thin link)
        ];
        Builder::compute_gravity_point(&mut clusters);
        let mut builder = Builder::new(Scales::new(1.0, 1.0));
        builder.compute_radius(&mut clusters);

        // Wire a ring by hand: 0-1, 1-3, 3-2, 2-0 (closing the loop).
        clusters[0].connect(1);
        clusters[1].connect(0);
        clusters[1].connect(3);
        clusters[3].connect(1);
        clusters[3].connect(2);
        clusters[2].connect(3);
        clusters[2].connect(0);
        clusters[0].connect(2);

        builder.cut_loops(&mut clusters);

        let total_edges: usize = clusters.iter().map(|c| c.adjacency().len()).sum::<usize>() / 2;
        assert_eq!(total_edges, 3, "a 4-cycle must lose exactly one edge");
        assert!(Builder::is_forest(&clusters));
    }

    #[test]
    fn empty_cluster_list_yields_no_neurons() {
        let mut builder = Builder::new(Scales::new(1.0, 1.0));
        let neurons = builder.build(Vec::new());
        assert!(neurons.is_empty());
    }
}
