// Helpers shared between the engine and anything that reads its output.

/// Fixed-point rounding applied after every arithmetic result.
///
/// Rounding works on the exact binary value of the input, through the
/// precision formatter, so a value stored just below a halfway point is never
/// pushed onto it by scaling. Exact ties go to the even digit.
/// The rounding is observable in the output: recursive indicators (EMA, MACD
/// signal) feed the rounded value back into the next step.
pub mod precision {
    /// Number of fractional digits kept for every price and indicator value.
    pub const DECIMALS: usize = 4;

    pub fn round_to(value: f64, decimals: usize) -> f64 {
        let rounded = format!("{:.*}", decimals, value)
            .parse::<f64>()
            .unwrap_or(value);
        // Avoid writing "-0.0" for values that round to zero.
        if rounded == 0.0 {
            0.0
        } else {
            rounded
        }
    }

    pub fn round4(value: f64) -> f64 {
        round_to(value, DECIMALS)
    }

    #[cfg(test)]
    mod tests {
        use super::*;

        #[test]
        fn test_round4_nearest() {
            assert_eq!(round4(1.23456), 1.2346);
            assert_eq!(round4(-1.23456), -1.2346);
            assert_eq!(round4(83.33333333333333), 83.3333);
        }

        #[test]
        fn test_round4_values_stored_below_halfway_round_down() {
            // 2.00005 is stored as 2.0000499999..., so the nearest 4-digit value is 2.0.
            assert_eq!(round4(2.00005), 2.0);
            assert_eq!(round4(10.00005), 10.0);
            assert_eq!(round4(0.00015), 0.0001);
            assert_eq!(round4(-2.00005), -2.0);
        }

        #[test]
        fn test_round_to_other_precision() {
            assert_eq!(round_to(1.23456, 2), 1.23);
            assert_eq!(round_to(1.5, 0), 2.0);
        }

        #[test]
        fn test_round4_keeps_short_values() {
            assert_eq!(round4(10.0), 10.0);
            assert_eq!(round4(0.5), 0.5);
        }

        #[test]
        fn test_round4_normalizes_negative_zero() {
            let value = round4(-0.00001);
            assert_eq!(value, 0.0);
            assert!(value.is_sign_positive());
        }
    }
}

/// Serde adapter writing `None` as the literal `NA`, the marker downstream
/// consumers of the TA files expect for values still warming up.
pub mod not_available {
    use serde::{Deserialize, Deserializer, Serializer};

    pub const MARKER: &str = "NA";

    pub fn serialize<S>(value: &Option<f64>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match value {
            Some(v) => serializer.serialize_f64(*v),
            None => serializer.serialize_str(MARKER),
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        let raw = raw.trim();
        if raw == MARKER || raw.is_empty() {
            return Ok(None);
        }
        raw.parse::<f64>()
            .map(Some)
            .map_err(|e| serde::de::Error::custom(format!("invalid indicator value '{}': {}", raw, e)))
    }
}
