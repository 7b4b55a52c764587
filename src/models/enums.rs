use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Invalid {field} value: {value}")]
pub struct InvalidEnum {
    pub field: String,
    pub value: String,
}

/// Macro to generate enum with as_str + std::str::FromStr pattern.
/// `as_str` yields the display label; parsing accepts the label or the
/// snake_case serde name, ignoring ASCII case.
macro_rules! str_enum {
    ($(#[$meta:meta])* $name:ident { $($variant:ident => $s:literal),+ $(,)? }) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(rename_all = "snake_case")]
        pub enum $name {
            $($variant),+
        }

        impl $name {
            pub const ALL: &'static [$name] = &[$(Self::$variant),+];

            pub fn as_str(&self) -> &'static str {
                match self {
                    $(Self::$variant => $s),+
                }
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl std::str::FromStr for $name {
            type Err = InvalidEnum;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let trimmed = s.trim();
                Self::ALL
                    .iter()
                    .copied()
                    .find(|v| {
                        v.as_str().eq_ignore_ascii_case(trimmed)
                            || serde_json::to_value(v)
                                .ok()
                                .and_then(|j| j.as_str().map(|n| n.eq_ignore_ascii_case(trimmed)))
                                .unwrap_or(false)
                    })
                    .ok_or_else(|| InvalidEnum {
                        field: stringify!($name).into(),
                        value: s.into(),
                    })
            }
        }
    };
}

str_enum!(
    /// Physiological compartment an analyte is reported in. Drives which
    /// adjustment rule applies.
    Compartment {
        Intracellular => "Intracellular",
        Extracellular => "Extracellular",
        Metal => "Heavy Metal",
        Vitamin => "Vitamin",
    }
);

str_enum!(
    /// Seven-band position of an adjusted value against its reference range.
    Classification {
        NotAvailable => "N/A",
        VeryLow => "Very Low",
        Low => "Low",
        LowerEndNormal => "Lower-End Normal",
        Normal => "Normal",
        HighEndNormal => "High-End Normal",
        High => "High",
        VeryHigh => "Very High",
    }
);

str_enum!(
    /// Interpretation of a heavy-metal reading under the detox assessment.
    MetalStatus {
        Measured => "Measured",
        HiddenRisk => "HIGH RISK (Hidden)",
        ConfirmedHigh => "Confirmed High",
    }
);

str_enum!(
    /// Text allowed between an analyte label and its value.
    LabelGap {
        Plain => "Plain",
        Symbol => "Symbol",
        Annotated => "Annotated",
    }
);

impl Default for LabelGap {
    fn default() -> Self {
        Self::Plain
    }
}

impl Compartment {
    /// Minerals take the optical correction; metals and vitamins do not.
    pub fn is_mineral(&self) -> bool {
        matches!(self, Self::Intracellular | Self::Extracellular)
    }
}

impl Classification {
    /// Measured and outside the reference range. `NotAvailable` is neither.
    pub fn is_out_of_range(&self) -> bool {
        matches!(self, Self::VeryLow | Self::Low | Self::High | Self::VeryHigh)
    }
}
