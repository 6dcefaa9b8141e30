//! The bundled sample dataset.
//!
//! The widget visualizes a single static series that is read exactly once
//! at startup. The records are embedded in the binary, so the viewer does
//! no runtime I/O and no network fetch.

use anyhow::Context;

use crate::types::Sample;

const DATASET: &str = include_str!("../assets/data.json");

/// Deserialize the embedded dataset.
///
/// A malformed bundle is a startup error; there is nothing sensible to
/// render without the series.
pub fn load_dataset() -> anyhow::Result<Vec<Sample>> {
    parse_dataset(DATASET).context("embedded dataset is malformed")
}

/// Parse a JSON array of `{timestamp, value}` records.
pub fn parse_dataset(json: &str) -> Result<Vec<Sample>, serde_json::Error> {
    serde_json::from_str(json)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn bundled_dataset_parses() {
        let samples = load_dataset().unwrap();
        assert!(!samples.is_empty());
        assert_eq!(samples[0].timestamp, "2024-01-01");
    }

    #[test]
    fn parses_a_record_list() {
        let samples = parse_dataset(
            r#"[
                {"timestamp": "2024-01-01", "value": 10.5},
                {"timestamp": "2024-01-02", "value": 20.0}
            ]"#,
        )
        .unwrap();
        assert_eq!(
            samples,
            vec![
                Sample {
                    timestamp: "2024-01-01".to_string(),
                    value: 10.5,
                },
                Sample {
                    timestamp: "2024-01-02".to_string(),
                    value: 20.0,
                },
            ]
        );
    }

    #[test]
    fn rejects_malformed_json() {
        assert!(parse_dataset("{\"timestamp\": 1}").is_err());
        assert!(parse_dataset("[{\"value\": 1.0}]").is_err());
    }
}
