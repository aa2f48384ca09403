//! CLI entry point: wires the Loader, Binarizer, Extractor, Builder,
//! post-processing passes and SwcWriter into one pipeline run.
//!
//! CLI shape (derive struct, `env_logger::init()` before anything else,
//! `clap::Parser`) follows `examples/meilisearch-arroy/examples/import-vectors.rs`.

use std::path::{Path, PathBuf};

use clap::Parser;

use dendrite::core::builder::Builder;
use dendrite::core::error::DendriteError;
use dendrite::core::extractor::Extractor;
use dendrite::core::neuron::Neuron;
use dendrite::core::volume::Scales;
use dendrite::io::binarizer;
use dendrite::io::loader::{DirectoryImageLoader, ImageStackLoader};
use dendrite::io::writer;
use dendrite::post::{Clipping, Interpolate, Smoothing};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Directory of raw grayscale image-stack frames.
    #[arg(long)]
    input: PathBuf,

    /// Destination for the SWC output: a directory when more than one
    /// neuron is produced, the literal file path when exactly one is.
    #[arg(long)]
    output: PathBuf,

    /// Foreground threshold: a voxel is foreground iff its sample is
    /// strictly greater than this value.
    #[arg(long, default_value_t = 128)]
    threshold: u8,

    #[arg(long, default_value_t = 1.0)]
    scale_xy: f64,

    #[arg(long, default_value_t = 1.0)]
    scale_z: f64,

    #[arg(long, default_value_t = 0.0)]
    dt: f64,

    #[arg(long, default_value_t = 0)]
    vt: i32,

    #[arg(long, default_value_t = 0)]
    clipping: i32,

    #[arg(long, default_value_t = 0)]
    smoothing: i32,
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();
    if let Err(err) = run(cli) {
        log::error!("{err}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), DendriteError> {
    let stack = DirectoryImageLoader.load(&cli.input)?;
    log::info!("loaded stack of {} plane(s), {}x{}", stack.depth(), stack.width, stack.height);

    let volume = binarizer::binarize(&stack, cli.threshold);
    log::info!("binarized to {} foreground voxel(s)", volume.count_true());

    let clusters = Extractor::extract(volume);
    let mut builder = Builder::new(Scales::new(cli.scale_xy, cli.scale_z));
    let neurons = builder.build(clusters);

    let neurons = Interpolate::apply(neurons, cli.dt, cli.vt);
    let neurons = Smoothing::apply(neurons, cli.smoothing);
    let neurons = Clipping::apply(neurons, cli.clipping);

    write_output(&cli.output, &neurons)?;
    log::info!("wrote {} neuron(s) to {}", neurons.len(), cli.output.display());
    Ok(())
}

fn write_output(output: &Path, neurons: &[Neuron]) -> Result<(), DendriteError> {
    if neurons.len() == 1 {
        if let Some(parent) = output.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)
                    .map_err(|source| DendriteError::CreateOutputDirectory { path: parent.to_path_buf(), source })?;
            }
        }
        return writer::write_neuron(output, &neurons[0]);
    }

    std::fs::create_dir_all(output)
        .map_err(|source| DendriteError::CreateOutputDirectory { path: output.to_path_buf(), source })?;
    for (i, neuron) in neurons.iter().enumerate() {
        writer::write_neuron(&output.join(format!("{i}.swc")), neuron)?;
    }
    Ok(())
}
