//! Diagnostic configuration.
//!
//! A [`DiagnosticConfig`] is passed explicitly to
//! [`Diagnostics::new`](crate::Diagnostics::new). A process-wide default can
//! be installed once at start-up with [`configure`]; it is what
//! [`Diagnostics::global`](crate::Diagnostics::global) and the top-level
//! [`log`](crate::log) / [`user_message`](crate::user_message) helpers read.
//! The combinators never read it.
//!
//! # Examples
//!
//! ```
//! use outcome_rail::config::{DiagnosticAdapter, DiagnosticConfig};
//!
//! let config = DiagnosticConfig::default()
//!     .with_owning_component("billing")
//!     .with_adapter(DiagnosticAdapter::Json)
//!     .with_list_limit(10);
//!
//! assert_eq!(config.owning_component.as_deref(), Some("billing"));
//! assert_eq!(config.shrink.list_limit, 10);
//! ```
use std::sync::OnceLock;

use crate::callsite::Resolver;
use crate::shrink::{ShrinkConfig, Shrinker};

static GLOBAL: OnceLock<DiagnosticConfig> = OnceLock::new();

/// How structured details are encoded before reaching the log sink.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum DiagnosticAdapter {
    /// Details are attached as a shrunk [`Value`](crate::Value).
    #[default]
    Plain,
    /// Details are encoded as a JSON string.
    Json,
}

/// Settings read by the resolver and the log facade.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct DiagnosticConfig {
    /// Symbol path prefix of the application's own code, e.g. `billing`.
    pub owning_component: Option<String>,
    pub adapter: DiagnosticAdapter,
    pub shrink: ShrinkConfig,
}

impl DiagnosticConfig {
    /// Configuration for services emitting JSON log lines.
    #[inline]
    pub fn json() -> Self {
        Self { adapter: DiagnosticAdapter::Json, ..Default::default() }
    }

    #[inline]
    pub fn with_owning_component(mut self, component: impl Into<String>) -> Self {
        self.owning_component = Some(component.into());
        self
    }

    #[inline]
    pub fn with_adapter(mut self, adapter: DiagnosticAdapter) -> Self {
        self.adapter = adapter;
        self
    }

    #[inline]
    pub fn with_list_limit(mut self, list_limit: usize) -> Self {
        self.shrink.list_limit = list_limit;
        self
    }

    /// Builds the call-site resolver for this configuration.
    pub fn resolver(&self) -> Resolver {
        Resolver::new(self.owning_component.clone())
    }

    /// Builds the shrinker for this configuration.
    #[inline]
    pub fn shrinker(&self) -> Shrinker {
        Shrinker::new(self.shrink)
    }
}

/// Installs the process-wide configuration.
///
/// Only the first call succeeds.
///
/// # Errors
///
/// Returns the rejected configuration when one is already installed.
pub fn configure(config: DiagnosticConfig) -> Result<(), DiagnosticConfig> {
    GLOBAL.set(config)
}

/// Returns the process-wide configuration, initializing it to the default on
/// first access.
pub fn global() -> &'static DiagnosticConfig {
    GLOBAL.get_or_init(DiagnosticConfig::default)
}
