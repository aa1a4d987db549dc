use serde::{Deserialize, Serialize};

/// How the Czuber mode treats a modal class at the edge of the table.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CzuberBoundary {
    /// A missing neighbour counts as a class with zero frequency.
    #[default]
    ZeroNeighbor,
    /// A modal class in the first or last row, or one whose neighbour
    /// differences are not both positive, uses its raw mode (midpoint).
    RawModeFallback,
}

/// Tunable parameters of the engine.
///
/// Every field has a default, so a partial JSON object is a valid
/// configuration:
///
/// ```
/// use freqtab_stats::{CzuberBoundary, EngineConfig};
///
/// let config: EngineConfig =
///     serde_json::from_str(r#"{"czuber_boundary": "raw_mode_fallback"}"#).unwrap();
/// assert_eq!(config.czuber_boundary, CzuberBoundary::RawModeFallback);
/// assert_eq!(config.width_tolerance, 1e-5);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Relative tolerance used when comparing class widths.
    pub width_tolerance: f64,
    /// Boundary convention of the Czuber mode.
    pub czuber_boundary: CzuberBoundary,
    /// Relative tolerance used to detect tied frequencies and duplicate modes.
    pub mode_tolerance: f64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            width_tolerance: 1e-5,
            czuber_boundary: CzuberBoundary::default(),
            mode_tolerance: 1e-9,
        }
    }
}
