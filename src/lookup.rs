//! Lookup Engine: drives one query through the classification page.
//!
//! Per-query protocol: navigate, locate the search controls, clear and
//! submit, poll for a completion signal, check for a rejection dialog,
//! extract the category lists, classify. Every failure mode collapses into a
//! terminal outcome; one broken query never aborts the run.

use std::time::Instant;
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::config::{LookupConfig, TimingConfig};
use crate::record::LookupOutcome;
use crate::session::BrowserSession;

/// Per-query failure classes. Every variant is downgraded to `NotFound` by
/// [`CategoryLookup::lookup`]; the variant only controls what gets logged,
/// so operators can tell a broken page from a legitimately absent entry.
#[derive(Debug, Error)]
pub enum LookupError {
    #[error("page load for {url} did not finish: {reason}")]
    NavigationTimeout { url: String, reason: anyhow::Error },

    #[error("element {selector:?} not available: {reason}")]
    ElementNotFound {
        selector: String,
        reason: anyhow::Error,
    },

    #[error("browser interaction failed: {0}")]
    Interaction(anyhow::Error),
}

/// Seam between the pipeline and the browser, so the loop is testable
/// without a Chrome process.
pub trait CategoryLookup {
    fn lookup(&mut self, query: &str) -> LookupOutcome;
}

pub struct LookupEngine<'a> {
    session: &'a BrowserSession,
    lookup: &'a LookupConfig,
    timing: &'a TimingConfig,
}

impl<'a> LookupEngine<'a> {
    pub fn new(
        session: &'a BrowserSession,
        lookup: &'a LookupConfig,
        timing: &'a TimingConfig,
    ) -> Self {
        LookupEngine {
            session,
            lookup,
            timing,
        }
    }

    fn run_query(&self, query: &str) -> Result<LookupOutcome, LookupError> {
        let tab = self.session.tab();
        self.session.reset_dialog();

        // Navigate; the previous query's page is fully replaced here.
        tab.navigate_to(&self.lookup.page_url)
            .map_err(LookupError::Interaction)?;
        tab.wait_until_navigated()
            .map_err(|reason| LookupError::NavigationTimeout {
                url: self.lookup.page_url.clone(),
                reason,
            })?;

        // Readiness signal: the root content element exists.
        self.wait_for(tab, "body")?;

        let search_input = self.wait_for(tab, &self.lookup.search_input)?;
        let search_button = self.wait_for(tab, &self.lookup.search_button)?;

        // Clear residue from the previous query and let the page's own reset
        // handlers settle before typing.
        search_input
            .call_js_fn("function() { this.value = ''; }", vec![], false)
            .map_err(LookupError::Interaction)?;
        std::thread::sleep(self.timing.settle_delay());

        search_input.click().map_err(LookupError::Interaction)?;
        tab.type_str(query).map_err(LookupError::Interaction)?;
        search_button.click().map_err(LookupError::Interaction)?;

        self.wait_for_results(tab);

        if let Some(message) = self.session.take_dialog_message() {
            self.session.dismiss_dialog();
            if is_invalid_input_dialog(&message, &self.lookup.invalid_input_marker) {
                info!("Query {:?} rejected as invalid input", query);
                return Ok(LookupOutcome::InvalidInput);
            }
            warn!("Unexpected dialog during lookup for {:?}: {}", query, message);
        }

        let categories = self.collect_texts(&self.lookup.category_list);
        let subcategories = self.collect_texts(&self.lookup.subcategory_list);
        debug!(
            "Extracted {} categories / {} sub-categories for {:?}",
            categories.len(),
            subcategories.len(),
            query
        );

        Ok(LookupOutcome::classify(categories, subcategories))
    }

    fn wait_for<'t>(
        &self,
        tab: &'t headless_chrome::Tab,
        selector: &str,
    ) -> Result<headless_chrome::Element<'t>, LookupError> {
        tab.wait_for_element_with_custom_timeout(selector, self.timing.page_timeout())
            .map_err(|reason| LookupError::ElementNotFound {
                selector: selector.to_string(),
                reason,
            })
    }

    /// Poll for an observable completion signal - populated category rows or
    /// a rejection dialog - instead of a single blind sleep. Falls through
    /// after the results timeout; the page exposes no event the client could
    /// await, so queries with no match wait out the full bound.
    fn wait_for_results(&self, tab: &headless_chrome::Tab) {
        let deadline = Instant::now() + self.timing.results_timeout();
        loop {
            if self.session.has_dialog() {
                return;
            }
            if let Ok(elements) = tab.find_elements(&self.lookup.category_list) {
                if !elements.is_empty() {
                    return;
                }
            }
            if Instant::now() >= deadline {
                debug!(
                    "No results signal within {:?}, proceeding to extraction",
                    self.timing.results_timeout()
                );
                return;
            }
            std::thread::sleep(self.timing.poll_interval());
        }
    }

    /// Non-blank trimmed text of every element matching `selector`, in page
    /// order. Extraction errors read as an empty list; classification turns
    /// that into the not-found sentinel.
    fn collect_texts(&self, selector: &str) -> Vec<String> {
        let elements = match self.session.tab().find_elements(selector) {
            Ok(elements) => elements,
            Err(e) => {
                debug!("No elements for {:?}: {}", selector, e);
                return Vec::new();
            }
        };

        elements
            .iter()
            .filter_map(|element| element.get_inner_text().ok())
            .map(|text| text.trim().to_string())
            .filter(|text| !text.is_empty())
            .collect()
    }
}

impl CategoryLookup for LookupEngine<'_> {
    fn lookup(&mut self, query: &str) -> LookupOutcome {
        match self.run_query(query) {
            Ok(outcome) => outcome,
            Err(e) => {
                // "page broke" and "legitimately absent" share a sentinel;
                // this log line is the only place the difference survives.
                warn!("Lookup failed for {:?}, recording as not found: {}", query, e);
                LookupOutcome::NotFound
            }
        }
    }
}

/// A dialog classifies the query as invalid input when its text carries the
/// configured marker, compared case-insensitively.
pub fn is_invalid_input_dialog(message: &str, marker: &str) -> bool {
    message.to_lowercase().contains(&marker.to_lowercase())
}
