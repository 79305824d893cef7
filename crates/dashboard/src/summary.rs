use api::Locale;

use crate::traits::{SummaryApi, SummaryKind};

/// Fixed failure string shown in place of a summary, per display language.
/// Distinct from any real summary the backend would produce.
pub fn summary_failure_message(locale: Locale) -> &'static str {
    match locale {
        Locale::Ja => "AIサマリーの取得に失敗しました。",
        Locale::En => "Failed to fetch the AI summary.",
    }
}

/// Modal lifecycle for one panel's AI summary slot.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SummarySlot {
    /// Modal closed, no text held.
    #[default]
    Idle,
    /// Modal open, request in flight, loading indicator shown.
    Requesting,
    /// Modal open, showing either the summary or the fixed failure string.
    Resolved(String),
}

/// The summary modal for one table.
///
/// Only a single request may occupy the slot: [`begin`](Self::begin) refuses
/// while a previous request is still unresolved, which is what disables the
/// triggering control. Opening always clears any previously held text, so a
/// stale result for one URL is never shown while another URL is resolving.
#[derive(Debug, Default)]
pub struct SummaryViewer {
    slot: SummarySlot,
}

impl SummaryViewer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether the modal should be drawn.
    pub fn is_open(&self) -> bool {
        !matches!(self.slot, SummarySlot::Idle)
    }

    pub fn is_requesting(&self) -> bool {
        matches!(self.slot, SummarySlot::Requesting)
    }

    /// The triggering control is enabled only while nothing is in flight.
    pub fn can_generate(&self) -> bool {
        !self.is_requesting()
    }

    /// Resolved text, if any. Markdown is passed through verbatim; the
    /// render layer decides whether to interpret it.
    pub fn text(&self) -> Option<&str> {
        match &self.slot {
            SummarySlot::Resolved(text) => Some(text),
            _ => None,
        }
    }

    /// Open the modal and enter the requesting state, clearing any prior
    /// result first. Returns false, changing nothing, while a request is
    /// already in flight.
    pub fn begin(&mut self) -> bool {
        if self.is_requesting() {
            return false;
        }
        self.slot = SummarySlot::Requesting;
        true
    }

    /// Settle the in-flight request with the text to display.
    pub fn resolve(&mut self, text: String) {
        self.slot = SummarySlot::Resolved(text);
    }

    /// Explicit dismissal. Resets the held text.
    pub fn close(&mut self) {
        self.slot = SummarySlot::Idle;
    }
}

/// Run one summary request to completion and return the text to display.
///
/// Failures are logged and mapped to the fixed locale-specific failure
/// string, so the caller can always settle its modal; a settled request
/// never leaves the modal in the requesting state.
pub async fn request_summary<S: SummaryApi + ?Sized>(
    api: &S,
    kind: SummaryKind,
    url: &str,
    locale: Locale,
) -> String {
    match api.summarize(kind, url).await {
        Ok(response) => response.summary,
        Err(e) => {
            tracing::warn!("summary request for {} failed: {}", url, e);
            summary_failure_message(locale).to_string()
        }
    }
}
