//! Advisory findings collected alongside a successful result.

use serde::Serialize;

use crate::FrequencyColumn;

/// A non-fatal finding about the input table.
///
/// Warnings never abort the computation. They are returned next to the
/// statistics so the caller can decide how to present them.
#[derive(Debug, Clone, PartialEq, Serialize, derive_more::Display, derive_more::IsVariant)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Warning {
    #[display("overlap detected between classes '{previous}' and '{current}'")]
    Overlap { previous: String, current: String },
    #[display("gap detected between classes '{previous}' and '{current}'")]
    Gap { previous: String, current: String },
    #[display(
        "classes have different widths (from {min_width} to {max_width}); \
         this may reduce the accuracy of some statistics"
    )]
    HeterogeneousWidth { min_width: f64, max_width: f64 },
    #[display("class '{label}' has non-numeric {column} value '{text}'; treated as unknown")]
    UnparsedFrequency {
        label: String,
        column: FrequencyColumn,
        text: String,
    },
    #[display(
        "class '{label}' has {column} {supplied}, but the other column gives {derived}; \
         using {derived}"
    )]
    FrequencyMismatch {
        label: String,
        column: FrequencyColumn,
        supplied: f64,
        derived: f64,
    },
    #[display("amodal distribution: every class has frequency {frequency}")]
    Amodal { frequency: f64 },
}
