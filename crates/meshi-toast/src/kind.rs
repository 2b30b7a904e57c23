use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::ToastError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ToastKind {
    Success,
    Error,
    Info,
    Warning,
}

impl ToastKind {
    pub const ALL: [ToastKind; 4] = [Self::Success, Self::Error, Self::Info, Self::Warning];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::Error => "error",
            Self::Info => "info",
            Self::Warning => "warning",
        }
    }

    /// Position in [`ToastKind::ALL`].
    pub(crate) fn index(self) -> usize {
        match self {
            Self::Success => 0,
            Self::Error => 1,
            Self::Info => 2,
            Self::Warning => 3,
        }
    }
}

impl fmt::Display for ToastKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Exact, case-sensitive match on the kind name.
impl FromStr for ToastKind {
    type Err = ToastError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| ToastError::UnknownKind(s.to_owned()))
    }
}
