//! Named background gradients applied behind a rendered invoice.

use std::sync::LazyLock;

use serde::Serialize;
use tracing::debug;

use crate::error::{Error, Result};

pub const DEFAULT_GRADIENT_ID: &str = "sunrise";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GradientOption {
    pub id: &'static str,
    pub name: &'static str,
    pub swatch_class: &'static str,
    pub background_class: &'static str,
    pub highlight_class: &'static str,
}

const BUILTIN_GRADIENTS: [GradientOption; 5] = [
    GradientOption {
        id: "none",
        name: "No gradient",
        swatch_class: "bg-white border border-slate-200",
        background_class: "bg-white",
        highlight_class: "from-transparent to-transparent",
    },
    GradientOption {
        id: "sunrise",
        name: "Sunrise",
        swatch_class: "bg-gradient-to-br from-orange-200 via-rose-200 to-sky-200",
        background_class: "bg-gradient-to-br from-orange-50 via-white to-sky-100",
        highlight_class: "from-orange-400/50 to-sky-400/50",
    },
    GradientOption {
        id: "copper",
        name: "Copper",
        swatch_class: "bg-gradient-to-br from-amber-200 via-orange-200 to-rose-200",
        background_class: "bg-gradient-to-br from-amber-50 via-white to-rose-100",
        highlight_class: "from-amber-400/50 to-rose-400/50",
    },
    GradientOption {
        id: "emerald",
        name: "Emerald",
        swatch_class: "bg-gradient-to-br from-emerald-200 via-teal-200 to-cyan-200",
        background_class: "bg-gradient-to-br from-emerald-50 via-white to-cyan-100",
        highlight_class: "from-emerald-400/50 to-cyan-400/50",
    },
    GradientOption {
        id: "lilac",
        name: "Lilac",
        swatch_class: "bg-gradient-to-br from-fuchsia-200 via-purple-200 to-indigo-200",
        background_class: "bg-gradient-to-br from-fuchsia-50 via-white to-indigo-100",
        highlight_class: "from-fuchsia-400/50 to-indigo-400/50",
    },
];

static BUILTIN: LazyLock<GradientCatalog> = LazyLock::new(|| GradientCatalog {
    options: BUILTIN_GRADIENTS.to_vec(),
    default_id: DEFAULT_GRADIENT_ID.to_string(),
});

#[derive(Debug, Clone)]
pub struct GradientCatalog {
    options: Vec<GradientOption>,
    default_id: String,
}

impl GradientCatalog {
    /// Fails on an empty list so that [`resolve`](Self::resolve) always has
    /// a last-resort entry.
    pub fn new(options: Vec<GradientOption>, default_id: impl Into<String>) -> Result<Self> {
        if options.is_empty() {
            return Err(Error::EmptyGradientCatalog);
        }
        Ok(Self { options, default_id: default_id.into() })
    }

    pub fn builtin() -> &'static GradientCatalog {
        &BUILTIN
    }

    pub fn options(&self) -> &[GradientOption] {
        &self.options
    }

    pub fn default_id(&self) -> &str {
        &self.default_id
    }

    pub fn contains(&self, id: &str) -> bool {
        self.find(id).is_some()
    }

    fn find(&self, id: &str) -> Option<&GradientOption> {
        self.options.iter().find(|o| o.id == id)
    }

    /// Exact id, then the catalog default, then the first entry.
    pub fn resolve(&self, id: Option<&str>) -> &GradientOption {
        if let Some(found) = id.and_then(|id| self.find(id)) {
            return found;
        }
        debug!(requested = ?id, default = %self.default_id, "gradient not found, using default");
        self.find(&self.default_id).unwrap_or(&self.options[0])
    }
}
