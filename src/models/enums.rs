use serde::{Deserialize, Serialize};

use super::ModelError;

/// Macro to generate enum with as_str + std::str::FromStr pattern
macro_rules! str_enum {
    ($name:ident { $($variant:ident => $s:literal),+ $(,)? }) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub enum $name {
            $(#[serde(rename = $s)] $variant),+
        }

        impl $name {
            pub fn as_str(&self) -> &'static str {
                match self {
                    $(Self::$variant => $s),+
                }
            }
        }

        impl std::str::FromStr for $name {
            type Err = ModelError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($s => Ok(Self::$variant)),+,
                    _ => Err(ModelError::InvalidEnum {
                        field: stringify!($name).into(),
                        value: s.into(),
                    }),
                }
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

str_enum!(Breathing {
    Yes => "yes",
    No => "no",
    Abnormal => "abnormal",
    Unknown => "unknown",
});

str_enum!(Consciousness {
    Yes => "yes",
    No => "no",
    Unknown => "unknown",
});

str_enum!(Bleeding {
    None => "none",
    Mild => "mild",
    Severe => "severe",
    Unknown => "unknown",
});

str_enum!(YesNo {
    Yes => "yes",
    No => "no",
});

str_enum!(PainLevel {
    None => "none",
    Mild => "mild",
    Moderate => "moderate",
    Severe => "severe",
});

impl Breathing {
    /// Breathing that stopped or is laboured.
    pub fn is_impaired(&self) -> bool {
        matches!(self, Self::No | Self::Abnormal)
    }
}
