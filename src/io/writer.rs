//! Serializes a finished `Neuron` to the SWC morphology format.
//!
//! Translated from `examples/original_source/src/writer/swc_writer.h`:
//! one line per node, `id type x y z radius parent`, ordered by ascending
//! id (the original's recursive `write_rec` visits the tree depth-first
//! from the root, which also happens to emit ids in ascending order since
//! `Builder::compute_id` assigns them that way; sorting explicitly here
//! makes the guarantee independent of traversal order).

use std::fs;
use std::io::Write as _;
use std::path::Path;

use crate::core::error::DendriteError;
use crate::core::neuron::Neuron;

pub fn write_neuron(path: &Path, neuron: &Neuron) -> Result<(), DendriteError> {
    let mut nodes: Vec<_> = neuron.nodes().iter().collect();
    nodes.sort_by_key(|node| node.id);

    let mut out = String::new();
    for node in nodes {
        let (x, y, z) = node.position;
        out.push_str(&format!(
            "{} {} {} {} {} {} {}\n",
            node.id,
            node.role.swc_type(),
            x,
            y,
            z,
            node.radius,
            node.parent_id
        ));
    }

    let mut file = fs::File::create(path).map_err(|source| DendriteError::WriteSwc { path: path.to_path_buf(), source })?;
    file.write_all(out.as_bytes()).map_err(|source| DendriteError::WriteSwc { path: path.to_path_buf(), source })?;
    log::info!("wrote {} node(s) to {}", neuron.len(), path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::neuron::NeuronNode;

    #[test]
    fn writes_one_line_per_node_ordered_by_id() {
        let mut a = NeuronNode::new((0.0, 0.0, 0.0), 1.0);
        let mut b = NeuronNode::new((1.0, 0.0, 0.0), 1.0);
        a.connect(1);
        b.connect(0);
        let mut neuron = Neuron::new(vec![a, b], 0);
        crate::core::builder::Builder::compute_id(std::slice::from_mut(&mut neuron));
        crate::core::builder::Builder::compute_node_type(std::slice::from_mut(&mut neuron));

        let path = std::env::temp_dir().join(format!("dendrite-writer-test-{}.swc", std::process::id()));
        write_neuron(&path, &neuron).unwrap();

        let contents = fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = contents.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with("1 3 "));
        assert!(lines[0].ends_with(" -1"));
        assert!(lines[1].starts_with("2 3 "));
        assert!(lines[1].ends_with(" 1"));

        fs::remove_file(&path).unwrap();
    }
}
