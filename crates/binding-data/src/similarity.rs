//! Allele Similarity Matrix

use crate::error::DataError;
use serde::Deserialize;
use std::collections::{BTreeMap, HashMap};
use std::io::Read;
use std::path::Path;
use tracing::{debug, info};

/// Similarities of every other allele to one target allele
pub type AlleleSimilarities = HashMap<String, f64>;

/// Row of the similarity CSV
#[derive(Debug, Deserialize)]
struct SimilarityRow {
    #[serde(rename = "allele_A")]
    allele_a: String,
    #[serde(rename = "allele_B")]
    allele_b: String,
    similarity: f64,
}

const REQUIRED_COLUMNS: [&str; 3] = ["allele_A", "allele_B", "similarity"];

/// Pairwise allele similarities keyed by (allele A, allele B)
///
/// Stored curried, `A -> B -> similarity`. Symmetry is not enforced: the
/// entry for (A, B) says nothing about (B, A).
#[derive(Debug, Clone, Default)]
pub struct SimilarityMatrix {
    rows: BTreeMap<String, AlleleSimilarities>,
}

impl SimilarityMatrix {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from pair-keyed entries
    pub fn from_pairs<I, S>(pairs: I) -> Result<Self, DataError>
    where
        I: IntoIterator<Item = ((S, S), f64)>,
        S: Into<String>,
    {
        let mut matrix = Self::new();
        for ((a, b), similarity) in pairs {
            matrix.insert(a, b, similarity)?;
        }
        Ok(matrix)
    }

    /// Load from a CSV with columns `allele_A, allele_B, similarity`
    pub fn from_csv_path(path: impl AsRef<Path>) -> Result<Self, DataError> {
        let path = path.as_ref();
        info!("Loading allele similarities from {}", path.display());
        let reader = csv::Reader::from_path(path)?;
        Self::from_csv(reader)
    }

    /// Load from any CSV source with a header row
    pub fn from_reader<R: Read>(reader: R) -> Result<Self, DataError> {
        Self::from_csv(csv::Reader::from_reader(reader))
    }

    fn from_csv<R: Read>(mut reader: csv::Reader<R>) -> Result<Self, DataError> {
        let headers = reader.headers()?.clone();
        for column in REQUIRED_COLUMNS {
            if !headers.iter().any(|h| h == column) {
                return Err(DataError::MissingColumn(column));
            }
        }

        let mut matrix = Self::new();
        for row in reader.deserialize::<SimilarityRow>() {
            let row = row?;
            matrix.insert(row.allele_a, row.allele_b, row.similarity)?;
        }
        debug!(
            "Loaded {} similarity rows for {} alleles",
            matrix.len(),
            matrix.rows.len()
        );
        Ok(matrix)
    }

    /// Set the similarity of `b` to `a`
    pub fn insert(
        &mut self,
        a: impl Into<String>,
        b: impl Into<String>,
        similarity: f64,
    ) -> Result<(), DataError> {
        if !(0.0..=1.0).contains(&similarity) {
            return Err(DataError::OutOfRange {
                field: "similarity",
                value: similarity,
                min: 0.0,
                max: 1.0,
            });
        }
        self.rows
            .entry(a.into())
            .or_default()
            .insert(b.into(), similarity);
        Ok(())
    }

    pub fn get(&self, a: &str, b: &str) -> Option<f64> {
        self.rows.get(a).and_then(|row| row.get(b)).copied()
    }

    /// Similarities of all alleles to `allele`
    pub fn row(&self, allele: &str) -> Option<&AlleleSimilarities> {
        self.rows.get(allele)
    }

    /// Alleles that have a row, in sorted order
    pub fn alleles(&self) -> impl Iterator<Item = &str> {
        self.rows.keys().map(String::as_str)
    }

    /// Iterate rows as (target allele, similarities)
    pub fn rows(&self) -> impl Iterator<Item = (&str, &AlleleSimilarities)> {
        self.rows.iter().map(|(allele, row)| (allele.as_str(), row))
    }

    /// Pair-keyed view of every entry
    pub fn pairs(&self) -> impl Iterator<Item = ((&str, &str), f64)> {
        self.rows.iter().flat_map(|(a, row)| {
            row.iter()
                .map(move |(b, &similarity)| ((a.as_str(), b.as_str()), similarity))
        })
    }

    /// Number of (A, B) entries
    pub fn len(&self) -> usize {
        self.rows.values().map(HashMap::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}
