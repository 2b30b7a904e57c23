use std::time::Duration;

use crate::{ToastError, ToastKind};

/// Style used when presenting a toast whose kind is not recognised.
pub const FALLBACK_STYLE: &str = "alert-info";

/// When a toast disappears on its own.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dismiss {
    After(Duration),
    Never,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToastConfig {
    pub kind: ToastKind,
    /// Presentation class, e.g. `alert-success`.
    pub style: String,
    pub dismiss: Dismiss,
}

impl ToastConfig {
    #[must_use]
    pub fn new(kind: ToastKind, style: impl Into<String>, dismiss: Dismiss) -> Self {
        Self {
            kind,
            style: style.into(),
            dismiss,
        }
    }
}

/// One config per [`ToastKind`], checked when the registry is built.
#[derive(Debug, Clone)]
pub struct ToastRegistry {
    configs: [ToastConfig; 4],
}

impl ToastRegistry {
    /// Builds a registry from exactly one config per kind, in any order.
    ///
    /// # Errors
    ///
    /// Returns [`ToastError::DuplicateConfig`] if a kind appears twice, or
    /// [`ToastError::MissingConfig`] for the first kind without a config.
    pub fn new(configs: Vec<ToastConfig>) -> Result<Self, ToastError> {
        let mut slots: [Option<ToastConfig>; 4] = Default::default();
        for config in configs {
            let slot = &mut slots[config.kind.index()];
            if slot.is_some() {
                return Err(ToastError::DuplicateConfig(config.kind));
            }
            *slot = Some(config);
        }

        let [success, error, info, warning] = slots;
        let take = |slot: Option<ToastConfig>, kind| slot.ok_or(ToastError::MissingConfig(kind));
        Ok(Self {
            configs: [
                take(success, ToastKind::Success)?,
                take(error, ToastKind::Error)?,
                take(info, ToastKind::Info)?,
                take(warning, ToastKind::Warning)?,
            ],
        })
    }

    #[must_use]
    pub fn get(&self, kind: ToastKind) -> &ToastConfig {
        &self.configs[kind.index()]
    }

    /// Presentation class for a kind name, [`FALLBACK_STYLE`] if unknown.
    #[must_use]
    pub fn style_for(&self, kind: &str) -> &str {
        kind.parse::<ToastKind>()
            .map_or(FALLBACK_STYLE, |k| self.get(k).style.as_str())
    }
}

impl Default for ToastRegistry {
    fn default() -> Self {
        let after = |ms| Dismiss::After(Duration::from_millis(ms));
        Self {
            configs: [
                ToastConfig::new(ToastKind::Success, "alert-success", after(3000)),
                ToastConfig::new(ToastKind::Error, "alert-error", after(5000)),
                ToastConfig::new(ToastKind::Info, "alert-info", after(3000)),
                ToastConfig::new(ToastKind::Warning, "alert-warning", after(4000)),
            ],
        }
    }
}
