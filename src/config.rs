use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::aligner::scoring::EditCosts;
use crate::aligner::{AlignmentType, PairwiseAligner};
use crate::errors::AlignError;

/// Aligner settings, as read from a JSON file. Missing fields take their default value.
///
/// ```json
/// {
///   "alignment_type": "semi-global",
///   "off_diagonal": 32,
///   "costs": {
///     "match_cost": 0.0,
///     "mismatch_cost": 4.0,
///     "gaps": { "model": "affine", "open": 8.0, "elongate": 2.0 }
///   }
/// }
/// ```
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AlignerConfig {
    pub alignment_type: AlignmentType,
    pub off_diagonal: Option<usize>,
    pub costs: EditCosts,
}

impl AlignerConfig {
    pub fn from_json_str(json: &str) -> Result<Self, AlignError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, AlignError> {
        let reader = File::open(path).map(BufReader::new)?;

        Ok(serde_json::from_reader(reader)?)
    }

    /// A fresh aligner with these costs and band. Each thread needs its own.
    pub fn build_aligner(&self) -> PairwiseAligner<EditCosts> {
        PairwiseAligner::new(self.costs)
            .with_off_diagonal(self.off_diagonal)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aligner::scoring::GapCosts;

    #[test]
    fn test_defaults() {
        let config = AlignerConfig::default();

        assert_eq!(config.alignment_type, AlignmentType::Global);
        assert_eq!(config.off_diagonal, None);
        assert_eq!(config.costs.match_cost, 0.0);
        assert_eq!(config.costs.mismatch_cost, 4.0);
        assert_eq!(config.costs.gaps, GapCosts::Affine { open: 8.0, elongate: 2.0 });

        assert_eq!(AlignerConfig::from_json_str("{}").unwrap(), config);
    }

    #[test]
    fn test_parse_json() {
        let json = r#"{
            "alignment_type": "free-shift",
            "off_diagonal": 5,
            "costs": { "mismatch_cost": 1.0, "gaps": { "model": "linear", "gap": 2.0 } }
        }"#;

        let config = AlignerConfig::from_json_str(json).unwrap();
        assert_eq!(config.alignment_type, AlignmentType::FreeShift);
        assert_eq!(config.off_diagonal, Some(5));
        assert_eq!(config.costs, EditCosts::new(0.0, 1.0, GapCosts::Linear { gap: 2.0 }));

        let aligner = config.build_aligner();
        assert_eq!(aligner.off_diagonal(), Some(5));
        assert!(!aligner.is_affine());
    }

    #[test]
    fn test_invalid_json() {
        let result = AlignerConfig::from_json_str(r#"{ "alignment_type": "sideways" }"#);
        assert!(matches!(result, Err(AlignError::ConfigError { .. })));
    }

    #[test]
    fn test_missing_file() {
        let result = AlignerConfig::from_json_file("/nonexistent/aligner.json");
        assert!(matches!(result, Err(AlignError::IOError(_))));
    }
}
