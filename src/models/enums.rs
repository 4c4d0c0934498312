use serde::{Deserialize, Serialize};

/// Raised when a wire string does not name a known variant.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Invalid value for {field}: {value}")]
pub struct InvalidEnum {
    pub field: String,
    pub value: String,
}

/// Macro to generate enum with as_str + std::str::FromStr pattern.
/// Serde uses the same strings as `as_str`.
macro_rules! str_enum {
    ($(#[$meta:meta])* $name:ident { $($variant:ident => $s:literal),+ $(,)? }) => {
        $(#[$meta])*
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

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl std::str::FromStr for $name {
            type Err = InvalidEnum;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($s => Ok(Self::$variant)),+,
                    _ => Err(InvalidEnum {
                        field: stringify!($name).into(),
                        value: s.into(),
                    }),
                }
            }
        }
    };
}

str_enum!(
    /// Coarse cost/quality class of a hospital. Only scales estimates.
    HospitalTier {
        Premium => "Premium",
        Budget => "Budget",
    }
);

str_enum!(
    /// How a policy holder can be treated at a hospital for a specialty.
    CoverageStatus {
        Cashless => "CASHLESS",
        Reimbursement => "REIMBURSEMENT",
        Unavailable => "UNAVAILABLE",
    }
);

str_enum!(Theme {
    Dark => "dark",
    Light => "light",
});

// Ranking order: CASHLESS > REIMBURSEMENT > UNAVAILABLE.
impl Ord for CoverageStatus {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        use std::cmp::Ordering;
        use CoverageStatus::*;

        match (self, other) {
            (a, b) if a == b => Ordering::Equal,
            (Cashless, _) => Ordering::Greater,
            (_, Cashless) => Ordering::Less,
            (Reimbursement, _) => Ordering::Greater,
            (_, Reimbursement) => Ordering::Less,
            _ => Ordering::Equal,
        }
    }
}

impl PartialOrd for CoverageStatus {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl CoverageStatus {
    /// Coverage exists under the policy (cashless or via reimbursement).
    pub fn is_covered(&self) -> bool {
        !matches!(self, Self::Unavailable)
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::Dark
    }
}

impl Theme {
    pub fn from_dark_flag(is_dark: bool) -> Self {
        if is_dark {
            Self::Dark
        } else {
            Self::Light
        }
    }

    pub fn is_dark(&self) -> bool {
        matches!(self, Self::Dark)
    }

    pub fn toggled(&self) -> Self {
        match self {
            Self::Dark => Self::Light,
            Self::Light => Self::Dark,
        }
    }
}
