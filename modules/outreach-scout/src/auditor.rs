use std::path::Path;
use std::sync::Arc;

use anyhow::Result;
use tracing::{info, warn};

use outreach_common::{AuditSummary, RowOutcome, NOT_AVAILABLE, SCORE_COLUMNS, WEBSITE_COLUMN};

use crate::pacing::Pacer;
use crate::table::OutreachTable;
use crate::traits::SiteAuditor;

/// Attaches Lighthouse scores to every row of an outreach table.
///
/// Failures are row-scoped: a failed audit marks that row `"Error"` and the
/// pass moves on.
pub struct Auditor {
    auditor: Arc<dyn SiteAuditor>,
    pacer: Arc<dyn Pacer>,
}

impl Auditor {
    pub fn new(auditor: Arc<dyn SiteAuditor>, pacer: Arc<dyn Pacer>) -> Self {
        Self { auditor, pacer }
    }

    /// Score every auditable row in place. Score columns are appended when the
    /// table does not have them yet.
    pub async fn audit_table(&self, table: &mut OutreachTable) -> AuditSummary {
        let columns = SCORE_COLUMNS.map(|name| table.ensure_column(name));
        let mut summary = AuditSummary::default();

        for row in 0..table.len() {
            let website = table.cell(row, WEBSITE_COLUMN).unwrap_or("").trim().to_string();
            let outcome = self.audit_website(&website).await;

            if let Some(cells) = outcome.cells() {
                for (column, value) in columns.iter().zip(cells) {
                    table.set_cell(row, *column, value);
                }
            }
            summary.record(&outcome);
        }

        summary
    }

    /// Audit one website. Skipped sites are not requested and not paced;
    /// every request is followed by a pause whatever its result.
    pub async fn audit_website(&self, website: &str) -> RowOutcome {
        if !is_auditable(website) {
            return RowOutcome::Skipped;
        }

        info!(website, "Auditing");
        let outcome = match self.auditor.audit(website).await {
            Ok(scores) => {
                info!(
                    website,
                    performance = scores.performance,
                    seo = scores.seo,
                    best_practices = scores.best_practices,
                    "Audit complete"
                );
                RowOutcome::Scored(scores)
            }
            Err(e) => {
                warn!(website, error = %format!("{e:#}"), "Audit failed");
                RowOutcome::Errored(format!("{e:#}"))
            }
        };

        self.pacer.pause().await;
        outcome
    }

    /// Read the table at `path`, audit it, and write it back to the same path.
    pub async fn audit_file(&self, path: &Path) -> Result<AuditSummary> {
        let mut table = OutreachTable::read(path)?;
        info!(path = %path.display(), rows = table.len(), "Loaded outreach table");

        let summary = self.audit_table(&mut table).await;
        table.write(path)?;

        info!(path = %path.display(), %summary, "Audit results written");
        Ok(summary)
    }
}

/// Whether a website cell names something worth auditing.
pub fn is_auditable(website: &str) -> bool {
    let website = website.trim();
    !website.is_empty() && !website.eq_ignore_ascii_case(NOT_AVAILABLE)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn placeholder_and_blank_sites_are_skipped() {
        assert!(!is_auditable(""));
        assert!(!is_auditable("   "));
        assert!(!is_auditable("N/A"));
        assert!(!is_auditable("n/a"));
        assert!(!is_auditable(" N/a "));
        assert!(is_auditable("https://acme.example"));
    }
}
