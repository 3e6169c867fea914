//! pdfstencil-core: Backend-independent data types and algorithms.
//!
//! This crate provides the foundational types (Region, LineRecord,
//! DetectionResult, styles, template records) and pure algorithms (word
//! clustering, style resolution, width heuristics) used by pdfstencil.
//! It knows nothing about any concrete PDF backend.

pub mod cluster;
pub mod detection;
pub mod error;
pub mod geometry;
pub mod line;
pub mod measure;
pub mod style;
pub mod template;
pub mod unicode_norm;

pub use cluster::{Word, cluster_into_lines};
pub use detection::{DetectionResult, DetectionSource};
pub use error::{EngineOptions, EngineResult, EngineWarning, Result, StencilError, WarningCode};
pub use geometry::Region;
pub use line::{LineRecord, join_text, sort_top_to_bottom};
pub use measure::heuristic_text_width;
pub use style::{Color, EffectiveStyle, FontWeight, PlaceholderStyle, resolve};
pub use template::{ContentType, Placeholder, Replacement, ResolvedReplacement, Template};
pub use unicode_norm::UnicodeNorm;
