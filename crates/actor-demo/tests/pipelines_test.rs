use actor_demo::pipelines::{self, PipelineReport};
use actor_demo::{run_all, DemoConfig};

fn small_config() -> DemoConfig {
    DemoConfig {
        queue_size: 16,
        total_elements: 1_000,
        report_every: 0,
        ..DemoConfig::default()
    }
}

/// Sum of `i + 2` for `i` in `0..n`.
fn offset_sum(n: i64) -> i64 {
    n * (n - 1) / 2 + 2 * n
}

#[test]
fn test_single_consumer_pipelines_lose_nothing() {
    let config = small_config();
    let expected = offset_sum(config.total_elements);

    for (name, report) in [
        ("long", pipelines::long(&config)),
        ("boxed", pipelines::boxed(&config)),
        ("shared", pipelines::shared(&config)),
    ] {
        let report = report.expect("Pipeline failed");
        assert_eq!(
            report,
            PipelineReport {
                name,
                received: 1_000,
                checksum: expected,
            }
        );
    }
}

#[test]
fn test_stateful_pipeline_folds_every_message() {
    let config = DemoConfig {
        report_every: 100,
        ..small_config()
    };
    let report = pipelines::stateful(&config).expect("Pipeline failed");
    assert_eq!(report.received, 1_000);
    assert_eq!(report.checksum, 999 * 1_000 / 2);
}

#[test]
fn test_group_pipeline_stops_after_last_producer() {
    let config = DemoConfig {
        group_consumers: 3,
        group_producers: 5,
        group_messages: 7,
        group_queue_size: 1,
        ..small_config()
    };
    let report = pipelines::group(&config).expect("Pipeline failed");
    assert_eq!(report.received, 35);
    assert_eq!(report.checksum, 5 * (0..7).sum::<i64>());
}

#[test]
fn test_group_pipeline_rejects_empty_groups() {
    let config = DemoConfig {
        group_producers: 0,
        ..small_config()
    };
    assert!(pipelines::group(&config).is_err());
}

#[test]
fn test_run_all_reports_every_pipeline_in_order() {
    let reports = run_all(&small_config()).expect("Demo failed");
    let names: Vec<&str> = reports.iter().map(|report| report.name).collect();
    assert_eq!(names, vec!["long", "boxed", "shared", "stateful", "group"]);
}
