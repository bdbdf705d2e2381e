use serde::Deserialize;

/// Knobs for [`crate::diff::diff`].
///
/// Deserializable from any serde format; missing keys take their defaults.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct DiffOptions {
    /// Report unchanged messages, signals, nodes and value tables too.
    pub include_unchanged: bool,
    /// Absolute tolerance for numeric fields. `None` (default) compares the
    /// parsed `f64` values exactly.
    pub float_tolerance: Option<f64>,
}

impl DiffOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn include_unchanged(mut self, yes: bool) -> Self {
        self.include_unchanged = yes;
        self
    }

    pub fn float_tolerance(mut self, tolerance: f64) -> Self {
        self.float_tolerance = Some(tolerance.abs());
        self
    }

    /// Numeric equality under these options.
    pub(crate) fn same_f64(&self, a: f64, b: f64) -> bool {
        match self.float_tolerance {
            None => a == b,
            Some(tol) => a == b || (a - b).abs() <= tol,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exact_by_default() {
        let opts = DiffOptions::default();
        assert!(!opts.include_unchanged);
        assert!(opts.same_f64(0.25, 0.25));
        assert!(!opts.same_f64(0.1 + 0.2, 0.3));
    }

    #[test]
    fn tolerance_is_opt_in() {
        let opts = DiffOptions::new().float_tolerance(1e-9);
        assert!(opts.same_f64(0.1 + 0.2, 0.3));
        assert!(!opts.same_f64(0.25, 0.5));
    }

    #[test]
    fn deserializes_with_defaults() {
        let opts: DiffOptions = serde_json::from_str(r#"{"include_unchanged": true}"#).unwrap();
        assert_eq!(opts, DiffOptions::new().include_unchanged(true));
        let opts: DiffOptions = serde_json::from_str("{}").unwrap();
        assert_eq!(opts, DiffOptions::default());
    }
}
