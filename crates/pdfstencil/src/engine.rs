//! The generation orchestrator and public engine API.
//!
//! [`Engine`] iterates a template's placeholders against a document,
//! applying the region eraser and content inserter per placeholder, and
//! optionally running the detector first for cross-document apply and
//! preview modes.

use std::collections::BTreeMap;

use pdfstencil_core::{
    ContentType, DetectionResult, EngineOptions, EngineResult, EngineWarning, Region, Replacement,
    Result, StencilError, Template, WarningCode, resolve,
};

use crate::detector::TextDetector;
use crate::eraser::erase_region;
use crate::handles::{DocumentHandle, OcrEngine, PageHandle, SaveOptions};
use crate::inserter::{insert_image, insert_text};

/// Outcome of a same-document generation run.
#[derive(Debug, Clone)]
pub struct GenerationOutcome {
    /// Number of placeholders actually erased and refilled.
    pub replaced: usize,
    /// Degraded operations encountered along the way.
    pub warnings: Vec<EngineWarning>,
}

/// Outcome of applying a template to a different target document.
#[derive(Debug, Clone)]
pub struct ApplyOutcome {
    /// Number of placeholders actually erased and refilled.
    pub replaced: usize,
    /// Text detected at each placeholder's position, present only when
    /// detect-and-replace was requested.
    pub detected: Option<BTreeMap<String, String>>,
    /// Degraded operations encountered along the way.
    pub warnings: Vec<EngineWarning>,
}

/// The detection-and-generation engine.
///
/// Synchronous and single-document-instance-per-call: one document handle
/// is mutated in place across all placeholders of one request, then saved.
/// Distinct requests may run concurrently; the engine itself holds no
/// shared mutable state.
pub struct Engine {
    options: EngineOptions,
    ocr: Option<Box<dyn OcrEngine>>,
}

impl Engine {
    pub fn new(options: EngineOptions) -> Self {
        Self { options, ocr: None }
    }

    /// Attach an OCR engine, enabling the OCR detection strategy.
    pub fn with_ocr(mut self, ocr: Box<dyn OcrEngine>) -> Self {
        self.ocr = Some(ocr);
        self
    }

    pub fn options(&self) -> &EngineOptions {
        &self.options
    }

    fn detector(&self) -> TextDetector<'_> {
        TextDetector::new(&self.options, self.ocr.as_deref())
    }

    /// Detect what text occupies `region` on a page.
    pub fn detect_text(
        &self,
        page: &dyn PageHandle,
        region: &Region,
    ) -> Result<EngineResult<DetectionResult>> {
        let detection = self.detector().detect(page, region)?;
        let warnings = self.finalize(detection.warnings)?;
        Ok(EngineResult::with_warnings(detection.value, warnings))
    }

    /// Generate a document by applying replacements to its own template.
    ///
    /// Every placeholder label must have a replacement entry; a label with
    /// no entry fails validation before any mutation. An entry whose
    /// resolved value is empty is skipped without error and not counted.
    pub fn generate(
        &self,
        template: &Template,
        doc: &mut dyn DocumentHandle,
        replacements: &BTreeMap<String, Replacement>,
    ) -> Result<GenerationOutcome> {
        template.validate()?;
        self.require_labels(template, replacements)?;

        let mut warnings = Vec::new();
        let mut replaced = 0;

        for placeholder in &template.placeholders {
            let Some(replacement) = replacements.get(&placeholder.label) else {
                continue;
            };
            let resolved = replacement.resolved();
            if resolved.value.is_empty() {
                continue;
            }
            if placeholder.page >= doc.page_count() {
                return Err(StencilError::NotFound(format!(
                    "page {} out of range ({} pages)",
                    placeholder.page,
                    doc.page_count()
                )));
            }

            let style = resolve(placeholder.style.as_ref(), resolved.style);
            erase_region(doc, placeholder.page, &placeholder.region, &style, &mut warnings);
            match resolved.content_type {
                ContentType::Image => insert_image(
                    doc,
                    placeholder.page,
                    &placeholder.region,
                    resolved.value,
                    &style,
                    &mut warnings,
                ),
                ContentType::Text => insert_text(
                    doc,
                    placeholder.page,
                    &placeholder.region,
                    resolved.value,
                    placeholder.lines.as_deref().unwrap_or(&[]),
                    placeholder.strict_match,
                    &style,
                    &mut warnings,
                ),
            }
            replaced += 1;
        }

        doc.save(&SaveOptions::compacted())?;
        let warnings = self.finalize(warnings)?;
        Ok(GenerationOutcome { replaced, warnings })
    }

    /// Apply a template's placeholder geometry to a different target
    /// document.
    ///
    /// A placeholder whose page index exceeds the target's page count is
    /// skipped with a warning rather than failing the run. When
    /// `detect_and_replace` is set, the detector runs at each surviving
    /// placeholder first and its text is recorded per label regardless of
    /// whether a replacement is then applied.
    pub fn apply_template(
        &self,
        template: &Template,
        target: &mut dyn DocumentHandle,
        replacements: &BTreeMap<String, Replacement>,
        detect_and_replace: bool,
    ) -> Result<ApplyOutcome> {
        template.validate()?;
        self.require_labels(template, replacements)?;
        if detect_and_replace {
            // Degenerate regions would fail detection mid-run; reject them
            // before any mutation.
            for placeholder in &template.placeholders {
                if placeholder.region.is_degenerate(self.options.min_region_size) {
                    return Err(StencilError::Validation(format!(
                        "placeholder {:?} region is too small to detect",
                        placeholder.label
                    )));
                }
            }
        }

        let mut warnings = Vec::new();
        let mut detected = BTreeMap::new();
        let mut replaced = 0;

        for placeholder in &template.placeholders {
            if placeholder.page >= target.page_count() {
                warnings.push(
                    EngineWarning::on_page(
                        WarningCode::PageMissing,
                        format!(
                            "page {} doesn't exist in target document ({} pages)",
                            placeholder.page,
                            target.page_count()
                        ),
                        placeholder.page,
                    )
                    .for_label(&placeholder.label),
                );
                continue;
            }

            if detect_and_replace {
                if let Some(page) = target.page(placeholder.page) {
                    let detection = self.detector().detect(page, &placeholder.region)?;
                    warnings.extend(detection.warnings);
                    detected.insert(placeholder.label.clone(), detection.value.text);
                }
            }

            let Some(replacement) = replacements.get(&placeholder.label) else {
                continue;
            };
            let resolved = replacement.resolved();
            if resolved.value.is_empty() {
                continue;
            }

            let style = resolve(placeholder.style.as_ref(), resolved.style);
            erase_region(target, placeholder.page, &placeholder.region, &style, &mut warnings);
            insert_text(
                target,
                placeholder.page,
                &placeholder.region,
                resolved.value,
                placeholder.lines.as_deref().unwrap_or(&[]),
                placeholder.strict_match,
                &style,
                &mut warnings,
            );
            replaced += 1;
        }

        target.save(&SaveOptions::compacted())?;
        let warnings = self.finalize(warnings)?;
        Ok(ApplyOutcome {
            replaced,
            detected: detect_and_replace.then_some(detected),
            warnings,
        })
    }

    /// Detect text at every placeholder position of a template in a target
    /// document, without mutating anything.
    ///
    /// A placeholder on a missing page maps to a `[Page N not found]`
    /// marker value.
    pub fn preview_detected_values(
        &self,
        template: &Template,
        target: &dyn DocumentHandle,
    ) -> Result<EngineResult<BTreeMap<String, String>>> {
        template.validate()?;

        let mut warnings = Vec::new();
        let mut detected = BTreeMap::new();
        for placeholder in &template.placeholders {
            if placeholder.page >= target.page_count() {
                detected.insert(
                    placeholder.label.clone(),
                    format!("[Page {} not found]", placeholder.page),
                );
                continue;
            }
            if let Some(page) = target.page(placeholder.page) {
                let detection = self.detector().detect(page, &placeholder.region)?;
                warnings.extend(detection.warnings);
                detected.insert(placeholder.label.clone(), detection.value.text);
            }
        }

        let warnings = self.finalize(warnings)?;
        Ok(EngineResult::with_warnings(detected, warnings))
    }

    /// Fail if any placeholder label lacks a replacement entry.
    fn require_labels(
        &self,
        template: &Template,
        replacements: &BTreeMap<String, Replacement>,
    ) -> Result<()> {
        let mut missing: Vec<&str> = template
            .placeholders
            .iter()
            .map(|p| p.label.as_str())
            .filter(|label| !replacements.contains_key(*label))
            .collect();
        if missing.is_empty() {
            return Ok(());
        }
        missing.sort_unstable();
        Err(StencilError::Validation(format!(
            "missing replacement values for: {}",
            missing.join(", ")
        )))
    }

    /// Apply strict-mode escalation and the warning-collection switch.
    fn finalize(&self, warnings: Vec<EngineWarning>) -> Result<Vec<EngineWarning>> {
        if self.options.strict_mode {
            if let Some(warning) = warnings.first() {
                return Err(warning.to_error());
            }
        }
        Ok(if self.options.collect_warnings {
            warnings
        } else {
            Vec::new()
        })
    }
}
