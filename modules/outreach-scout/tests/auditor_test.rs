//! Auditor row handling: skip rule, error isolation, pacing, idempotence.

use std::fs;
use std::sync::Arc;

use outreach_common::{ERROR_CELL, SCORE_COLUMNS};
use outreach_scout::testing::{scores, table_with_websites, MockAuditor, RecordingPacer};
use outreach_scout::{Auditor, OutreachTable};

fn score_cells(table: &OutreachTable, row: usize) -> Vec<String> {
    SCORE_COLUMNS
        .iter()
        .map(|c| table.cell(row, c).unwrap_or_default().to_string())
        .collect()
}

#[tokio::test]
async fn skipped_rows_get_no_scores_and_no_request() {
    let mock = Arc::new(MockAuditor::new().on_url("https://acme.example", scores(91.0, 88.0, 100.0)));
    let pacer = Arc::new(RecordingPacer::new());
    let auditor = Auditor::new(mock.clone(), pacer.clone());

    let mut table = table_with_websites(&["", "N/A", "n/a", "https://acme.example"]);
    let summary = auditor.audit_table(&mut table).await;

    assert_eq!(summary.skipped, 3);
    assert_eq!(summary.scored, 1);
    for row in 0..3 {
        assert!(score_cells(&table, row).iter().all(|c| c.is_empty()));
    }
    assert_eq!(score_cells(&table, 3), vec!["91", "88", "100"]);
    assert_eq!(mock.calls(), vec!["https://acme.example"]);
    assert_eq!(pacer.pauses(), 1, "only audited rows are paced");
}

#[tokio::test]
async fn scores_are_within_percent_range() {
    let mock = Arc::new(MockAuditor::new().on_url("https://a.example", scores(0.0, 57.5, 100.0)));
    let auditor = Auditor::new(mock, Arc::new(RecordingPacer::new()));

    let mut table = table_with_websites(&["https://a.example"]);
    auditor.audit_table(&mut table).await;

    for cell in score_cells(&table, 0) {
        let value: f64 = cell.parse().unwrap();
        assert!((0.0..=100.0).contains(&value));
    }
}

#[tokio::test]
async fn failing_row_is_isolated() {
    let sites = [
        "https://one.example",
        "https://two.example",
        "https://three.example",
        "https://four.example",
        "https://five.example",
    ];
    let mut mock = MockAuditor::new();
    for (i, site) in sites.iter().enumerate() {
        mock = mock.on_url(site, scores(10.0 * i as f64, 50.0, 75.0));
    }
    let mock = Arc::new(mock.failing_on("https://three.example"));
    let pacer = Arc::new(RecordingPacer::new());
    let auditor = Auditor::new(mock.clone(), pacer.clone());

    let mut table = table_with_websites(&sites);
    let summary = auditor.audit_table(&mut table).await;

    assert_eq!(summary.scored, 4);
    assert_eq!(summary.errored, 1);
    assert_eq!(score_cells(&table, 0), vec!["0", "50", "75"]);
    assert_eq!(score_cells(&table, 1), vec!["10", "50", "75"]);
    assert!(score_cells(&table, 2).iter().all(|c| c == ERROR_CELL));
    assert_eq!(score_cells(&table, 3), vec!["30", "50", "75"]);
    assert_eq!(score_cells(&table, 4), vec!["40", "50", "75"]);
    assert_eq!(mock.calls().len(), 5);
    assert_eq!(pacer.pauses(), 5, "paused after the failed call too");
}

#[tokio::test]
async fn original_columns_and_order_are_preserved() {
    let mock = Arc::new(MockAuditor::new().on_url("https://b.example", scores(1.0, 2.0, 3.0)));
    let auditor = Auditor::new(mock, Arc::new(RecordingPacer::new()));

    let mut table = OutreachTable::new(
        vec!["notes".into(), "website".into(), "name".into()],
        vec![
            vec!["call back".into(), "https://b.example".into(), "B".into()],
            vec!["".into(), "".into(), "C".into()],
        ],
    );
    auditor.audit_table(&mut table).await;

    assert_eq!(
        table.headers(),
        ["notes", "website", "name", "Performance Score", "SEO Score", "Best Practices Score"]
    );
    assert_eq!(table.rows()[0][..3], ["call back", "https://b.example", "B"]);
    assert_eq!(table.rows()[1][2], "C");
}

#[tokio::test]
async fn existing_score_columns_are_overwritten_in_place() {
    let mock = Arc::new(MockAuditor::new().on_url("https://c.example", scores(64.0, 92.0, 81.0)));
    let auditor = Auditor::new(mock, Arc::new(RecordingPacer::new()));

    let mut table = OutreachTable::new(
        vec![
            "website".into(),
            "SEO Score".into(),
            "city".into(),
            "Performance Score".into(),
            "Best Practices Score".into(),
        ],
        vec![vec![
            "https://c.example".into(),
            "Error".into(),
            "Austin".into(),
            "Error".into(),
            "Error".into(),
        ]],
    );
    auditor.audit_table(&mut table).await;

    assert_eq!(table.headers().len(), 5);
    assert_eq!(table.rows()[0], ["https://c.example", "92", "Austin", "64", "81"]);
}

#[tokio::test]
async fn auditing_twice_gives_identical_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("outreach_2024-03-10.csv");
    table_with_websites(&["https://a.example", "N/A", "https://broken.example"])
        .write(&path)
        .unwrap();

    let mock = Arc::new(MockAuditor::new().on_url("https://a.example", scores(77.0, 66.0, 55.0)));
    let auditor = Auditor::new(mock, Arc::new(RecordingPacer::new()));

    auditor.audit_file(&path).await.unwrap();
    let first = fs::read_to_string(&path).unwrap();
    auditor.audit_file(&path).await.unwrap();
    let second = fs::read_to_string(&path).unwrap();

    assert_eq!(first, second);
    assert!(first.starts_with(
        "name,address,phone,website,is_claimed,industry,city,Performance Score,SEO Score,Best Practices Score"
    ));
    assert!(first.contains("https://broken.example,Yes,lawyer,Austin,Error,Error,Error"));
}

#[tokio::test]
async fn audit_file_writes_back_to_same_path() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("outreach_2024-01-05.csv");
    table_with_websites(&["https://a.example"]).write(&path).unwrap();

    let mock = Arc::new(MockAuditor::new().on_url("https://a.example", scores(12.5, 40.0, 99.0)));
    let auditor = Auditor::new(mock, Arc::new(RecordingPacer::new()));
    let summary = auditor.audit_file(&path).await.unwrap();

    assert_eq!(summary.total(), 1);
    let reread = OutreachTable::read(&path).unwrap();
    assert_eq!(reread.cell(0, "Performance Score"), Some("12.5"));
    assert_eq!(reread.cell(0, "name"), Some("Business 0"));
    assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 1);
}
