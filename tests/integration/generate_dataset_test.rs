// tests/integration/generate_dataset_test.rs

use std::collections::HashSet;
use std::sync::{Arc, Mutex};

use chrono::Duration;

use alert_data_generator::service::attribute_resolver::{impact_for, severity_range};
use alert_data_generator::{
    CategoricalWeights, Category, DatasetAssembler, DatasetSummary, GeneratorError, Priority, ProgressObserver,
    Status,
};

fn assembler(seed: u64) -> DatasetAssembler {
    DatasetAssembler::new(CategoricalWeights::builtin()).unwrap().with_seed(seed)
}

#[test]
fn records_satisfy_field_invariants() {
    let dataset = assembler(1).generate(3_000, None).unwrap();
    assert_eq!(dataset.len(), 3_000);

    let reference = dataset.run().reference_instant;
    let earliest = reference - Duration::days(30) - Duration::hours(23) - Duration::minutes(59) - Duration::seconds(59);
    let systems: HashSet<&str> = CategoricalWeights::builtin().systems.into_iter().collect();

    for r in dataset.iter() {
        assert_eq!(r.resolution_time_minutes.is_some(), r.status == Status::Resolved, "{}", r.id);

        let (lo, hi) = severity_range(r.priority);
        assert!(r.severity_score >= lo && r.severity_score <= hi, "{}: {}", r.id, r.severity_score);
        assert_eq!(r.impact, impact_for(r.priority));

        assert!(r.timestamp <= reference && r.timestamp >= earliest, "{}: {}", r.id, r.timestamp);
        assert!(systems.contains(r.system_source.as_str()));
        assert!(!r.message.is_empty());
        assert!(!r.assigned_team.is_empty());
    }
}

#[test]
fn ids_are_dense_and_unique() {
    let n = 1_234;
    let dataset = assembler(2).generate(n, None).unwrap();

    let mut ids: Vec<&str> = dataset.iter().map(|r| r.id.as_str()).collect();
    ids.sort_unstable();
    let expected: Vec<String> = (1..=n).map(|i| format!("ALT-{i:08}")).collect();
    assert_eq!(ids, expected.iter().map(String::as_str).collect::<Vec<_>>());
}

#[test]
fn output_is_sorted_newest_first() {
    let dataset = assembler(3).generate(2_000, None).unwrap();
    assert!(dataset.windows(2).all(|w| w[0].timestamp >= w[1].timestamp));
}

#[test]
fn large_dataset_matches_configured_shares() {
    let weights = CategoricalWeights::builtin();
    let dataset = assembler(42).generate(50_000, None).unwrap();
    let summary = DatasetSummary::from_records(&dataset);

    for category in Category::ALL {
        let observed = summary.category_percentage(category);
        let expected = weights.category_share(category) * 100.0;
        assert!((observed - expected).abs() <= 2.0, "{category}: {observed:.2}% vs {expected:.2}%");
    }
    for priority in Priority::ALL {
        let observed = summary.priority_percentage(priority);
        let expected = weights.priority_share(priority) * 100.0;
        assert!((observed - expected).abs() <= 2.0, "{priority}: {observed:.2}% vs {expected:.2}%");
    }
}

#[test]
fn non_positive_counts_are_invalid_arguments() {
    let asm = assembler(4);
    for n in [0, -5] {
        match asm.generate(n, None) {
            Err(GeneratorError::InvalidArgument { .. }) => {}
            other => panic!("expected InvalidArgument for {n}, got {other:?}"),
        }
    }
}

#[test]
fn single_record_dataset() {
    let dataset = assembler(5).generate(1, None).unwrap();
    assert_eq!(dataset.len(), 1);
    assert_eq!(dataset[0].id, "ALT-00000001");
}

#[test]
fn same_seed_reproduces_dataset() {
    let a = assembler(77).generate(500, None).unwrap();
    let b = assembler(77).generate(500, None).unwrap();

    // El instante de referencia puede diferir entre ejecuciones: se compara la
    // antigüedad de cada registro en lugar del timestamp absoluto.
    let ra = a.run().reference_instant;
    let rb = b.run().reference_instant;
    for (x, y) in a.iter().zip(b.iter()) {
        assert_eq!(x.id, y.id);
        assert_eq!(ra - x.timestamp, rb - y.timestamp);
        assert_eq!(x.category, y.category);
        assert_eq!(x.priority, y.priority);
        assert_eq!(x.status, y.status);
        assert_eq!(x.severity_score, y.severity_score);
        assert_eq!(x.message, y.message);
        assert_eq!(x.assigned_team, y.assigned_team);
        assert_eq!(x.resolution_time_minutes, y.resolution_time_minutes);
    }
}

#[test]
fn summary_counts_add_up() {
    let dataset = assembler(6).generate(777, None).unwrap();
    let summary = DatasetSummary::from_records(&dataset);

    assert_eq!(summary.total_records, 777);
    assert_eq!(summary.columns, 11);
    assert_eq!(summary.by_category.iter().map(|e| e.count).sum::<u64>(), 777);
    assert_eq!(summary.by_priority.iter().map(|e| e.count).sum::<u64>(), 777);
    assert_eq!(summary.by_status.iter().map(|e| e.count).sum::<u64>(), 777);

    let unresolved = dataset.iter().filter(|r| !r.is_resolved()).count() as u64;
    assert_eq!(summary.null_counts.get("resolution_time_minutes").copied(), Some(unresolved));
}

#[tokio::test]
async fn parallel_generation_is_complete_and_reports_once() {
    let seen: Arc<Mutex<Vec<(u64, u64)>>> = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&seen);
    let observer: Arc<dyn ProgressObserver> = Arc::new(move |generated: u64, total: u64| {
        sink.lock().unwrap().push((generated, total));
    });

    let n = 10_000;
    let dataset = assembler(8)
        .with_workers(4)
        .generate_parallel(n, Some(observer))
        .await
        .unwrap();

    assert_eq!(dataset.len(), n as usize);
    assert_eq!(dataset.run().workers, 4);

    let ids: HashSet<&str> = dataset.iter().map(|r| r.id.as_str()).collect();
    assert_eq!(ids.len(), n as usize);
    assert!(ids.contains("ALT-00000001"));
    assert!(ids.contains("ALT-00010000"));
    assert!(dataset.windows(2).all(|w| w[0].timestamp >= w[1].timestamp));

    let seen = seen.lock().unwrap();
    let completions = seen.iter().filter(|(g, t)| g == t).count();
    assert_eq!(completions, 1);
    assert_eq!(seen.last(), Some(&(n as u64, n as u64)));
    assert!(seen.windows(2).all(|w| w[0].0 < w[1].0), "progress must be monotonic: {seen:?}");
    assert!(seen.iter().all(|(g, _)| g % 100 == 0 || *g == n as u64));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn parallel_generation_reports_every_checkpoint_with_slow_observer() {
    let seen: Arc<Mutex<Vec<u64>>> = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&seen);
    let observer: Arc<dyn ProgressObserver> = Arc::new(move |generated: u64, _total: u64| {
        std::thread::sleep(std::time::Duration::from_micros(200));
        sink.lock().unwrap().push(generated);
    });

    let n: u64 = 20_000;
    let dataset = assembler(12)
        .with_workers(8)
        .generate_parallel(n as i64, Some(observer))
        .await
        .unwrap();
    assert_eq!(dataset.len(), n as usize);

    let seen = seen.lock().unwrap();
    let intermediate: Vec<u64> = seen.iter().copied().filter(|g| *g < n).collect();
    assert_eq!(intermediate.len() as u64, n / 100 - 1);
    let expected: Vec<u64> = (1..n / 100).map(|k| k * 100).collect();
    assert_eq!(intermediate, expected);
    assert_eq!(seen.last(), Some(&n));
}

#[tokio::test]
async fn huge_request_is_an_invalid_argument() {
    let err = assembler(13).with_workers(2).generate_parallel(i64::MAX, None).await.unwrap_err();
    assert!(matches!(err, GeneratorError::InvalidArgument { .. }));
}

#[tokio::test]
async fn parallel_generation_is_reproducible_with_seed() {
    let a = assembler(21).with_workers(3).generate_parallel(900, None).await.unwrap();
    let b = assembler(21).with_workers(3).generate_parallel(900, None).await.unwrap();

    let key = |d: &alert_data_generator::Dataset| {
        let reference = d.run().reference_instant;
        let mut v: Vec<(String, i64, Category, Priority)> = d
            .iter()
            .map(|r| (r.id.clone(), (reference - r.timestamp).num_seconds(), r.category, r.priority))
            .collect();
        v.sort_by(|x, y| x.0.cmp(&y.0));
        v
    };
    assert_eq!(key(&a), key(&b));
}

#[tokio::test]
async fn more_workers_than_records() {
    let dataset = assembler(9).with_workers(16).generate_parallel(10, None).await.unwrap();
    assert_eq!(dataset.len(), 10);
    assert_eq!(dataset.run().workers, 10);
}

#[tokio::test]
async fn parallel_rejects_non_positive_counts() {
    let err = assembler(10).with_workers(2).generate_parallel(0, None).await.unwrap_err();
    assert!(matches!(err, GeneratorError::InvalidArgument { .. }));
}
