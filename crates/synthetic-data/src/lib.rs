//! Synthetic Binding Data
//!
//! Infers binding affinities for an allele from the measurements of similar
//! alleles. Each synthesized affinity is the similarity-weighted mean of the
//! observed affinities of a peptide, shrunk towards zero by a smoothing term.

mod config;
mod lookup;
mod synthesis;

pub use config::SynthesisConfig;
pub use lookup::{
    reverse_lookup_from_affinity_maps, reverse_lookup_from_allele_datasets, Observation,
    PeptideObservations,
};
pub use synthesis::{
    synthesize_affinities_for_all_alleles, synthesize_affinities_for_single_allele,
    SynthesizedAffinities,
};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum SynthesisError {
    #[error("Invalid synthesis configuration: {0}")]
    InvalidConfig(String),
}
