use serde::Serialize;

/// Great-circle distance between two sky positions.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum Separation {
    /// Separation in degrees, `[0, 180]`.
    Degrees(f64),
    /// At least one position is unknown.
    Undefined,
}

impl Separation {
    pub fn degrees(&self) -> Option<f64> {
        match self {
            Separation::Degrees(d) => Some(*d),
            Separation::Undefined => None,
        }
    }

    /// `Some(true)` when closer than `threshold_deg`, `None` when undefined.
    pub fn is_closer_than(&self, threshold_deg: f64) -> Option<bool> {
        self.degrees().map(|d| d < threshold_deg)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_threshold_comparison() {
        assert_eq!(Separation::Degrees(59.9).is_closer_than(60.0), Some(true));
        assert_eq!(Separation::Degrees(60.0).is_closer_than(60.0), Some(false));
        assert_eq!(Separation::Undefined.is_closer_than(60.0), None);
    }

    #[test]
    fn test_serialization() {
        let json = serde_json::to_string(&Separation::Degrees(12.5)).unwrap();
        assert_eq!(json, r#"{"kind":"degrees","value":12.5}"#);
        let json = serde_json::to_string(&Separation::Undefined).unwrap();
        assert_eq!(json, r#"{"kind":"undefined"}"#);
    }
}
