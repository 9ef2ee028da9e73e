//! Reverse Peptide Lookups

use binding_data::AlleleDatasets;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Affinity of a peptide measured against one allele
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Observation {
    pub allele: String,
    /// Normalized affinity, 1.0 = strongest binding
    pub affinity: f64,
    #[serde(default = "unit_weight")]
    pub weight: f64,
}

fn unit_weight() -> f64 {
    1.0
}

impl Observation {
    /// Observation with unit sample weight
    pub fn new(allele: impl Into<String>, affinity: f64) -> Self {
        Self {
            allele: allele.into(),
            affinity,
            weight: unit_weight(),
        }
    }

    pub fn with_weight(mut self, weight: f64) -> Self {
        self.weight = weight;
        self
    }
}

/// Peptide sequence to every observation of it
pub type PeptideObservations = HashMap<String, Vec<Observation>>;

/// Index the records of every allele dataset by peptide
///
/// Observations carry the regression target and sample weight of each record.
pub fn reverse_lookup_from_allele_datasets(datasets: &AlleleDatasets) -> PeptideObservations {
    let mut lookup = PeptideObservations::new();
    for (allele, dataset) in datasets {
        for record in dataset.records() {
            lookup
                .entry(record.peptide.clone())
                .or_default()
                .push(
                    Observation::new(allele.as_str(), record.affinity).with_weight(record.weight),
                );
        }
    }
    lookup
}

/// Index allele → peptide → affinity maps by peptide, with unit weights
pub fn reverse_lookup_from_affinity_maps<'a, I, M>(affinities: I) -> PeptideObservations
where
    I: IntoIterator<Item = (&'a String, &'a M)>,
    M: 'a,
    &'a M: IntoIterator<Item = (&'a String, &'a f64)>,
{
    let mut lookup = PeptideObservations::new();
    for (allele, peptide_affinities) in affinities {
        for (peptide, &affinity) in peptide_affinities {
            lookup
                .entry(peptide.clone())
                .or_default()
                .push(Observation::new(allele.as_str(), affinity));
        }
    }
    lookup
}
