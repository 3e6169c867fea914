//! pdfstencil: layout-preserving PDF placeholder detection and
//! substitution.
//!
//! Mark rectangular regions of a PDF page as named placeholders, capture
//! what text occupies each region, and later regenerate the document (or a
//! structurally similar one) by substituting new values while preserving
//! the original visual layout.
//!
//! # Architecture
//!
//! - **pdfstencil-core**: backend-independent record types and pure
//!   algorithms (geometry, line records, styles, word clustering).
//! - **pdfstencil** (this crate): the engine — detection strategies,
//!   region erasure, content insertion, and the generation orchestrator —
//!   operating over the [`handles`] traits a caller implements for its
//!   document backend.
//!
//! The engine consumes page and document handles from its environment and
//! never parses PDF files itself; persistence, routing, and rendering for
//! display are external collaborators.

pub mod detector;
pub mod engine;
pub mod eraser;
pub mod handles;
pub mod inserter;

pub use pdfstencil_core;

pub use detector::TextDetector;
pub use engine::{ApplyOutcome, Engine, GenerationOutcome};
pub use handles::{
    DocumentHandle, OcrEngine, OcrLayout, PageHandle, RasterImage, SaveOptions, SpanLine,
    TextSpan, Widget, WidgetId,
};
