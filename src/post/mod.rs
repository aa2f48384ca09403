//! Post-processing passes over a finished set of neuron trees.
//!
//! The upstream's own `connect_interpolate` step is an empty stub, and no
//! smoothing/clipping source was part of the retrieved original, so none
//! of these currently change the trees they're given. They exist as a
//! slot in the pipeline with a fixed signature so a real algorithm can
//! land later without touching the CLI surface.

use crate::core::neuron::Neuron;

pub struct Interpolate;

impl Interpolate {
    pub fn apply(neurons: Vec<Neuron>, dt: f64, vt: i32) -> Vec<Neuron> {
        log::debug!("interpolate pass: dt={dt}, vt={vt} ({} neuron(s), identity)", neurons.len());
        neurons
    }
}

pub struct Smoothing;

impl Smoothing {
    pub fn apply(neurons: Vec<Neuron>, level: i32) -> Vec<Neuron> {
        log::debug!("smoothing pass: level={level} ({} neuron(s), identity)", neurons.len());
        neurons
    }
}

pub struct Clipping;

impl Clipping {
    pub fn apply(neurons: Vec<Neuron>, level: i32) -> Vec<Neuron> {
        log::debug!("clipping pass: level={level} ({} neuron(s), identity)", neurons.len());
        neurons
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::neuron::{Neuron, NeuronNode};

    fn single_node_neuron() -> Neuron {
        Neuron::new(vec![NeuronNode::new((0.0, 0.0, 0.0), 1.0)], 0)
    }

    #[test]
    fn passes_preserve_neuron_count() {
        let neurons = vec![single_node_neuron(), single_node_neuron()];
        let neurons = Interpolate::apply(neurons, 0.5, 2);
        let neurons = Smoothing::apply(neurons, 1);
        let neurons = Clipping::apply(neurons, 1);
        assert_eq!(neurons.len(), 2);
    }
}
