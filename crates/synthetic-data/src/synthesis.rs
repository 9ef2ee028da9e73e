//! Similarity-Weighted Affinity Synthesis

use crate::config::SynthesisConfig;
use crate::lookup::PeptideObservations;
use crate::SynthesisError;
use binding_data::{AlleleSimilarities, SimilarityMatrix};
use metrics::counter;
use std::collections::{BTreeMap, HashMap};
use tracing::{debug, info};

/// Peptide sequence to synthesized affinity
pub type SynthesizedAffinities = HashMap<String, f64>;

/// Synthesize affinities for the allele whose neighbours are `similarities`
///
/// For each peptide:
///
/// ```text
/// Σ sim^exponent · weight · affinity / (smoothing + Σ sim^exponent · weight)
/// ```
///
/// over the observations of alleles with non-zero similarity that are not
/// excluded. Peptides without any such observation, or whose weights sum to
/// zero, are left out.
pub fn synthesize_affinities_for_single_allele(
    similarities: &AlleleSimilarities,
    observations: &PeptideObservations,
    config: &SynthesisConfig,
) -> Result<SynthesizedAffinities, SynthesisError> {
    config.validate()?;

    let mut results = SynthesizedAffinities::new();
    for (peptide, peptide_observations) in observations {
        let mut total = 0.0;
        let mut denom = 0.0;
        for observation in peptide_observations {
            if config.is_excluded(&observation.allele) {
                continue;
            }
            let sim = similarities.get(&observation.allele).copied().unwrap_or(0.0);
            if sim == 0.0 {
                continue;
            }
            let combined_weight = sim.powf(config.exponent) * observation.weight;
            total += combined_weight * observation.affinity;
            denom += combined_weight;
        }
        if denom > 0.0 {
            results.insert(peptide.clone(), total / (config.smoothing + denom));
        }
    }

    counter!("synthetic_affinities_total").increment(results.len() as u64);
    Ok(results)
}

/// Synthesize affinities for every allele with a row in `similarities`
pub fn synthesize_affinities_for_all_alleles(
    observations: &PeptideObservations,
    similarities: &SimilarityMatrix,
    config: &SynthesisConfig,
) -> Result<BTreeMap<String, SynthesizedAffinities>, SynthesisError> {
    config.validate()?;
    info!(
        "Synthesizing affinities for {} alleles from {} peptides",
        similarities.alleles().count(),
        observations.len()
    );

    let mut all_predictions = BTreeMap::new();
    for (allele, row) in similarities.rows() {
        let predictions = synthesize_affinities_for_single_allele(row, observations, config)?;
        debug!("{}: {} synthesized affinities", allele, predictions.len());
        all_predictions.insert(allele.to_string(), predictions);
    }
    Ok(all_predictions)
}
