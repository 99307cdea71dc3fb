use std::fmt;

/// Placeholder for any listing field the search API did not return.
pub const NOT_AVAILABLE: &str = "N/A";

/// Cell value written into every score column when a row's audit fails.
pub const ERROR_CELL: &str = "Error";

pub const PERFORMANCE_COLUMN: &str = "Performance Score";
pub const SEO_COLUMN: &str = "SEO Score";
pub const BEST_PRACTICES_COLUMN: &str = "Best Practices Score";

/// Score columns in the order the Auditor appends them.
pub const SCORE_COLUMNS: [&str; 3] = [PERFORMANCE_COLUMN, SEO_COLUMN, BEST_PRACTICES_COLUMN];

pub const WEBSITE_COLUMN: &str = "website";

// --- Collector output ---

/// One normalized business listing, tagged with the search that found it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BusinessRecord {
    pub name: String,
    pub address: String,
    pub phone: String,
    pub website: String,
    pub is_claimed: bool,
    pub industry: String,
    pub city: String,
}

impl BusinessRecord {
    /// CSV header, in column order.
    pub const COLUMNS: [&'static str; 7] = [
        "name",
        "address",
        "phone",
        WEBSITE_COLUMN,
        "is_claimed",
        "industry",
        "city",
    ];

    pub fn claimed_label(&self) -> &'static str {
        if self.is_claimed {
            "Yes"
        } else {
            "No"
        }
    }

    /// Cells in [`Self::COLUMNS`] order.
    pub fn to_row(&self) -> Vec<String> {
        vec![
            self.name.clone(),
            self.address.clone(),
            self.phone.clone(),
            self.website.clone(),
            self.claimed_label().to_string(),
            self.industry.clone(),
            self.city.clone(),
        ]
    }
}

// --- Auditor output ---

/// Lighthouse scores scaled to `[0,100]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AuditScores {
    pub performance: f64,
    pub seo: f64,
    pub best_practices: f64,
}

impl AuditScores {
    /// Scale `[0,1]` API fractions to percentages, rounded to two decimals and
    /// clamped into range.
    pub fn from_fractions(performance: f64, seo: f64, best_practices: f64) -> Self {
        Self {
            performance: to_percent(performance),
            seo: to_percent(seo),
            best_practices: to_percent(best_practices),
        }
    }

    /// Cells in [`SCORE_COLUMNS`] order.
    pub fn cells(&self) -> [String; 3] {
        [
            self.performance.to_string(),
            self.seo.to_string(),
            self.best_practices.to_string(),
        ]
    }
}

fn to_percent(fraction: f64) -> f64 {
    ((fraction * 100.0).clamp(0.0, 100.0) * 100.0).round() / 100.0
}

/// Terminal state of one table row after an audit pass.
#[derive(Debug, Clone, PartialEq)]
pub enum RowOutcome {
    /// No usable website; the row keeps whatever score cells it had.
    Skipped,
    Scored(AuditScores),
    /// The audit call or response parsing failed for this row only.
    Errored(String),
}

impl RowOutcome {
    /// Values to write into the score columns, or `None` to leave them alone.
    pub fn cells(&self) -> Option<[String; 3]> {
        match self {
            RowOutcome::Skipped => None,
            RowOutcome::Scored(scores) => Some(scores.cells()),
            RowOutcome::Errored(_) => Some([
                ERROR_CELL.to_string(),
                ERROR_CELL.to_string(),
                ERROR_CELL.to_string(),
            ]),
        }
    }
}

/// Counts of row outcomes for one Auditor run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AuditSummary {
    pub scored: usize,
    pub skipped: usize,
    pub errored: usize,
}

impl AuditSummary {
    pub fn record(&mut self, outcome: &RowOutcome) {
        match outcome {
            RowOutcome::Skipped => self.skipped += 1,
            RowOutcome::Scored(_) => self.scored += 1,
            RowOutcome::Errored(_) => self.errored += 1,
        }
    }

    pub fn total(&self) -> usize {
        self.scored + self.skipped + self.errored
    }
}

impl fmt::Display for AuditSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} scored, {} skipped, {} errored",
            self.scored, self.skipped, self.errored
        )
    }
}
