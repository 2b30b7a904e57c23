//! Transient user-facing notifications with per-kind styling and timed
//! auto-dismissal.

pub mod config;
pub mod controller;
pub mod kind;

pub use config::{Dismiss, ToastConfig, ToastRegistry, FALLBACK_STYLE};
pub use controller::{ToastController, ToastId, ToastMessage};
pub use kind::ToastKind;

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ToastError {
    #[error("unknown toast type: \"{0}\"")]
    UnknownKind(String),

    #[error("no toast config for kind '{0}'")]
    MissingConfig(ToastKind),

    #[error("toast kind '{0}' is configured more than once")]
    DuplicateConfig(ToastKind),
}
