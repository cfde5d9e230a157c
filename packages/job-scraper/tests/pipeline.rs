//! End-to-end runs against mock pages.

use job_scraper::testing::fixtures::{listing_page, DetailPage};
use job_scraper::sinks::spreadsheet::COLUMNS;
use job_scraper::{
    FilterConfig, ListingConfig, MemorySink, MockFetcher, Pipeline, PipelineConfig,
    PolitenessConfig, RunReport, SheetMode, SpreadsheetSink,
};
use std::path::Path;

const BASE: &str = "https://jobs.test";
const TODAY: &str = "https://jobs.test/jobs-by-date/today";

fn portal_job(heading: &str, location: &str, apply_href: &str) -> String {
    DetailPage::new()
        .heading(heading)
        .key_info("Job Type", "Full Time")
        .key_info("Location", location)
        .key_info("Job Field", "Engineering")
        .description("<p>Build services in Python and SQL.</p>")
        .application(
            "Method of Application",
            &format!("<p>Apply on our <a href=\"{apply_href}\">portal</a></p>"),
        )
        .render()
}

fn email_job(heading: &str) -> String {
    DetailPage::new()
        .heading(heading)
        .description("<p>Answer customer calls.</p>")
        .application(
            "Method of Application",
            "<p>Send your CV to <strong>careers@acme.test</strong></p>",
        )
        .render()
}

fn config() -> PipelineConfig {
    PipelineConfig::new()
        .with_listing(ListingConfig::for_site(BASE))
        .with_politeness(PolitenessConfig::none())
}

/// Three listed jobs: two apply through a portal, one by email.
fn three_jobs() -> MockFetcher {
    MockFetcher::new()
        .with_page(
            TODAY,
            listing_page(&[
                ("Backend Engineer at Acme", "/job/1", Some("Lagos")),
                ("Call Agent at Acme", "/job/2", None),
                ("Data Analyst at Beta", "/job/3", Some("Abuja")),
            ]),
        )
        .with_page(format!("{TODAY}/2"), listing_page(&[]))
        .with_page(
            "https://jobs.test/job/1",
            portal_job("Backend Engineer at Acme", "Lagos", "https://careers.acme.test/apply/1"),
        )
        .with_page("https://jobs.test/job/2", email_job("Call Agent at Acme"))
        .with_page(
            "https://jobs.test/job/3",
            portal_job("Data Analyst at Beta", "Abuja", "/apply-now/3"),
        )
}

#[tokio::test]
async fn test_full_run_counts_every_stage() {
    let sink = MemorySink::new();
    let delivered = sink.handle();

    let report = Pipeline::new(three_jobs(), config())
        .with_sink(sink)
        .run()
        .await;

    assert_eq!(report.listed, 3);
    assert_eq!(report.fetch_failed, 0);
    assert_eq!(report.extracted, 3);
    assert_eq!(report.qualified, 2);
    assert_eq!(report.rejected, 1);
    assert_eq!(report.rejected_by_rule.get("email_application"), Some(&1));
    assert_eq!(report.sampled, 2);
    assert_eq!(report.sink_succeeded, 2);
    assert_eq!(report.sink_failed, 0);

    let records = delivered.read().unwrap().clone();
    let urls: Vec<_> = records.iter().map(|r| r.url.clone().unwrap_or_default()).collect();
    assert_eq!(
        urls,
        vec![
            "https://careers.acme.test/apply/1".to_string(),
            "https://jobs.test/apply-now/3".to_string(),
        ]
    );
    assert_eq!(records[0].title.as_deref(), Some("Backend Engineer"));
    assert_eq!(records[0].company.as_deref(), Some("Acme"));
    assert_eq!(records[0].location, "Lagos");
    assert_eq!(records[0].source_url, "https://jobs.test/job/1");
}

#[tokio::test]
async fn test_detail_fetch_failure_is_counted_and_skipped() {
    let fetcher = three_jobs().fail_url("https://jobs.test/job/1");
    let sink = MemorySink::new();
    let delivered = sink.handle();

    let report = Pipeline::new(fetcher, config()).with_sink(sink).run().await;

    assert_eq!(report.listed, 3);
    assert_eq!(report.fetch_failed, 1);
    assert_eq!(report.extracted, 2);
    assert_eq!(report.qualified, 1);
    assert_eq!(delivered.read().unwrap().len(), 1);
}

#[tokio::test]
async fn test_empty_listing_ends_run_early() {
    let fetcher = MockFetcher::new().with_page(TODAY, listing_page(&[]));
    let sink = MemorySink::new();
    let delivered = sink.handle();

    let report = Pipeline::new(fetcher, config()).with_sink(sink).run().await;

    assert_eq!(report, RunReport::default());
    assert!(delivered.read().unwrap().is_empty());
}

#[tokio::test]
async fn test_rejections_are_tallied_per_rule() {
    let filtered = config().with_filter(FilterConfig::new().with_locations(["abuja"]));
    let report = Pipeline::new(three_jobs(), filtered).run().await;

    assert_eq!(report.qualified, 1);
    assert_eq!(report.rejected, 2);
    assert_eq!(report.rejected_by_rule.get("allowed_locations"), Some(&1));
    assert_eq!(report.rejected_by_rule.get("email_application"), Some(&1));
}

#[tokio::test]
async fn test_sampling_is_reproducible_with_seed() {
    let sampled = config().with_sample_size(1);

    let first = MemorySink::new();
    let first_records = first.handle();
    let report = Pipeline::new(three_jobs(), sampled.clone())
        .with_seed(7)
        .with_sink(first)
        .run()
        .await;
    assert_eq!(report.qualified, 2);
    assert_eq!(report.sampled, 1);

    let second = MemorySink::new();
    let second_records = second.handle();
    Pipeline::new(three_jobs(), sampled)
        .with_seed(7)
        .with_sink(second)
        .run()
        .await;

    assert_eq!(*first_records.read().unwrap(), *second_records.read().unwrap());
}

#[tokio::test]
async fn test_concurrent_processing_keeps_listing_order() {
    let mut items = Vec::new();
    let mut fetcher = MockFetcher::new();
    let hrefs: Vec<String> = (1..=6).map(|i| format!("/job/{i}")).collect();
    let titles: Vec<String> = (1..=6).map(|i| format!("Engineer {i} at Acme")).collect();
    for (title, href) in titles.iter().zip(&hrefs) {
        items.push((title.as_str(), href.as_str(), None));
        fetcher = fetcher.with_page(
            format!("{BASE}{href}"),
            portal_job(title, "Lagos", &format!("https://careers.acme.test{href}")),
        );
    }
    let fetcher = fetcher
        .with_page(TODAY, listing_page(&items))
        .with_page(format!("{TODAY}/2"), listing_page(&[]));

    let concurrent = config().with_politeness(PolitenessConfig::none().with_concurrency(4));
    let sink = MemorySink::new();
    let delivered = sink.handle();
    let report = Pipeline::new(fetcher, concurrent).with_sink(sink).run().await;

    assert_eq!(report.qualified, 6);
    let order: Vec<_> = delivered
        .read()
        .unwrap()
        .iter()
        .map(|r| r.title.clone().unwrap_or_default())
        .collect();
    assert_eq!(
        order,
        (1..=6).map(|i| format!("Engineer {i}")).collect::<Vec<_>>()
    );
}

fn worksheet_rows(path: &Path) -> Vec<Vec<String>> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .from_path(path)
        .unwrap();
    reader
        .records()
        .map(|r| r.unwrap().iter().map(str::to_string).collect())
        .collect()
}

#[tokio::test]
async fn test_replace_worksheet_is_cleared_when_nothing_qualifies() {
    let path = std::env::temp_dir().join(format!("job-scraper-cleared-{}.csv", std::process::id()));

    let report = Pipeline::new(three_jobs(), config())
        .with_sink(SpreadsheetSink::new(&path, SheetMode::Replace))
        .run()
        .await;
    assert_eq!(report.sink_succeeded, 2);
    assert_eq!(worksheet_rows(&path).len(), 3);

    let nothing = config().with_filter(FilterConfig::new().with_locations(["nowhere"]));
    let report = Pipeline::new(three_jobs(), nothing)
        .with_sink(SpreadsheetSink::new(&path, SheetMode::Replace))
        .run()
        .await;
    let rows = worksheet_rows(&path);
    std::fs::remove_file(&path).ok();

    assert_eq!(report.qualified, 0);
    assert_eq!(report.sink_succeeded, 0);
    assert_eq!(report.sink_failed, 0);
    assert_eq!(rows, vec![COLUMNS.map(str::to_string).to_vec()]);
}

#[tokio::test]
async fn test_sink_failures_are_counted() {
    let sink = MemorySink::new().rejecting("Data Analyst");
    let report = Pipeline::new(three_jobs(), config()).with_sink(sink).run().await;

    assert_eq!(report.sink_succeeded, 1);
    assert_eq!(report.sink_failed, 1);
}

#[test]
fn test_max_jobs_limits_detail_fetches() {
    let limited = config().with_listing(ListingConfig::for_site(BASE).with_max_jobs(1));
    let fetcher = three_jobs();

    let report = tokio_test::block_on(async { Pipeline::new(fetcher, limited).run().await });

    assert_eq!(report.listed, 1);
    assert_eq!(report.qualified, 1);
}
