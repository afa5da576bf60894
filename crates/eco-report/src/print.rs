//! Print collaborator.

use std::future::Future;
use std::io::Write;
use std::time::Duration;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use tracing::{debug, info};

use eco_model::{FormDefinition, InspectionRecord};

use crate::document::PrintDocument;
use crate::html::write_html;

/// Delay between showing the print view and triggering the print.
pub const DEFAULT_PRINT_DELAY: Duration = Duration::from_millis(500);

/// Something that can put a document on paper (or a file).
pub trait PrintProvider {
    fn print(&mut self, document: &PrintDocument) -> impl Future<Output = Result<()>>;
}

/// Prints by writing the XHTML document to a writer.
#[derive(Debug)]
pub struct HtmlPrinter<W: Write> {
    out: W,
}

impl<W: Write> HtmlPrinter<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> PrintProvider for HtmlPrinter<W> {
    async fn print(&mut self, document: &PrintDocument) -> Result<()> {
        write_html(&mut self.out, document)
            .with_context(|| format!("failed to print record {}", document.record_id))?;
        self.out.flush().context("failed to flush print output")?;
        Ok(())
    }
}

/// Holds the document currently being printed.
#[derive(Debug)]
pub struct PrintSession<P: PrintProvider> {
    provider: P,
    delay: Duration,
    active: Option<PrintDocument>,
}

impl<P: PrintProvider> PrintSession<P> {
    pub fn new(provider: P) -> Self {
        Self::with_delay(provider, DEFAULT_PRINT_DELAY)
    }

    pub fn with_delay(provider: P, delay: Duration) -> Self {
        Self {
            provider,
            delay,
            active: None,
        }
    }

    /// Document in the print view, if a print is under way.
    pub fn active(&self) -> Option<&PrintDocument> {
        self.active.as_ref()
    }

    pub fn provider(&self) -> &P {
        &self.provider
    }

    pub fn into_provider(self) -> P {
        self.provider
    }

    /// Show `record` in the print view, wait for the delay, print it, then
    /// clear the view. The view is cleared even when printing fails.
    pub async fn print_record(
        &mut self,
        record: &InspectionRecord,
        form: Option<&FormDefinition>,
        printed_on: NaiveDate,
    ) -> Result<()> {
        let document = PrintDocument::project(record, form, printed_on);
        debug!(id = %record.id, "print view ready");
        let document = self.active.insert(document);
        tokio::time::sleep(self.delay).await;
        let result = self.provider.print(document).await;
        self.active = None;
        if result.is_ok() {
            info!(id = %record.id, "printed inspection record");
        }
        result
    }
}
