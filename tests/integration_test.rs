use dining_table::config::TableConfig;
use dining_table::framework::mock::TableAudit;
use dining_table::framework::TableError;
use dining_table::lifecycle::DiningSystem;
use dining_table::model::{EventSink, TableEvent};
use dining_table::philosopher_actor::{RandomDuration, SecondAcquire, TableContext, Timing};
use std::time::{Duration, Instant};
use tokio::sync::mpsc::UnboundedReceiver;

/// Short random think/eat times so philosophers collide often.
fn busy_timing() -> Timing {
    let short = |name| {
        RandomDuration::new(name, Duration::ZERO, Duration::from_millis(2)).unwrap()
    };
    Timing::new(short("think"), short("eat"))
}

async fn wait_until_everyone_ate(system: &DiningSystem, deadline: Duration) -> bool {
    let until = Instant::now() + deadline;
    while Instant::now() < until {
        if system.stats().everyone_ate(1) {
            return true;
        }
        tokio::time::sleep(Duration::from_millis(5)).await;
    }
    system.stats().everyone_ate(1)
}

async fn drain(mut receiver: UnboundedReceiver<TableEvent>) -> Vec<TableEvent> {
    let mut events = Vec::new();
    while let Some(event) = receiver.recv().await {
        events.push(event);
    }
    events
}

/// Every ring size makes progress: nobody deadlocks, everyone eats.
#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_every_philosopher_eats() {
    for seats in [2, 3, 5, 8] {
        let ctx = TableContext::new(seats, busy_timing()).unwrap();
        let system = DiningSystem::start(ctx).unwrap();

        assert!(
            wait_until_everyone_ate(&system, Duration::from_secs(10)).await,
            "seats={seats}: someone never ate"
        );

        let summary = system.shutdown().await.expect("clean shutdown");
        assert_eq!(summary.reports.len(), seats);
        assert!(summary.reports.iter().all(|r| r.meals >= 1));
    }
}

/// Replays the full event stream the way an external log checker would.
#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_event_stream_shows_mutual_exclusion() {
    let (events, receiver) = EventSink::channel();
    let ctx = TableContext::new(5, busy_timing())
        .unwrap()
        .with_events(events);
    let system = DiningSystem::start(ctx).unwrap();

    assert!(wait_until_everyone_ate(&system, Duration::from_secs(10)).await);
    tokio::time::sleep(Duration::from_millis(100)).await;
    let summary = system.shutdown().await.unwrap();

    let audit = TableAudit::replay(5, drain(receiver).await).expect("no exclusion violation");
    assert_eq!(audit.finished, 5);
    assert!(audit.still_held.is_empty());
    for report in &summary.reports {
        // The audit also counts a meal cut short by shutdown
        assert!(audit.meals[report.index] >= report.meals);
    }
}

/// Point-in-time samples only ever show a utensil in the hands of a neighbour.
#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_sampled_holders_are_neighbours() {
    let ctx = TableContext::new(5, busy_timing()).unwrap();
    let system = DiningSystem::start(ctx).unwrap();

    for _ in 0..500 {
        for (utensil, holder) in system.pool().holders().into_iter().enumerate() {
            if let Some(p) = holder {
                let pair = system.pool().pair_for(p).unwrap();
                assert!(pair.contains(utensil), "philosopher {p} holds utensil {utensil}");
            }
        }
        tokio::task::yield_now().await;
    }

    system.shutdown().await.unwrap();
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_immediate_shutdown_of_five() {
    let ctx = TableContext::new(5, busy_timing()).unwrap();
    let system = DiningSystem::start(ctx).unwrap();

    let summary = system.shutdown().await.unwrap();
    let seats: Vec<_> = summary.reports.iter().map(|r| r.index).collect();
    assert_eq!(seats, vec![0, 1, 2, 3, 4]);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_minimal_ring_with_both_policies() {
    for policy in [
        SecondAcquire::Probe,
        SecondAcquire::Bounded(Duration::from_millis(1)),
    ] {
        let ctx = TableContext::new(2, busy_timing())
            .unwrap()
            .with_second_acquire(policy);
        let system = DiningSystem::start(ctx).unwrap();

        assert!(
            wait_until_everyone_ate(&system, Duration::from_secs(10)).await,
            "{policy:?}: minimal ring stalled"
        );
        system.shutdown().await.unwrap();
    }
}

/// Shutdown during a long think or meal does not wait the duration out.
#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_shutdown_latency_is_bounded() {
    let long = Duration::from_secs(60);
    let ctx = TableContext::new(5, Timing::fixed(Duration::from_millis(10), long)).unwrap();
    let system = DiningSystem::start(ctx).unwrap();

    // Let some of them sit down to a one-minute meal
    tokio::time::sleep(Duration::from_millis(100)).await;
    assert!(!system.pool().all_free(), "someone should be eating by now");

    let started = Instant::now();
    let summary = tokio::time::timeout(Duration::from_secs(5), system.shutdown())
        .await
        .expect("shutdown must not wait for meals to finish")
        .unwrap();

    assert!(started.elapsed() < Duration::from_secs(5));
    assert_eq!(summary.total_meals(), 0);
}

#[tokio::test]
async fn test_invalid_config_starts_nobody() {
    let config = TableConfig {
        seats: 1,
        ..TableConfig::default()
    };
    let result = DiningSystem::from_config(&config, EventSink::disabled());
    assert!(matches!(result, Err(TableError::InvalidSeatCount(1))));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_system_from_config() {
    let config = TableConfig::from_toml_str(
        r#"
        seats = 3
        second_wait_ms = 2

        [timing]
        think_min_ms = 0
        think_max_ms = 2
        eat_min_ms = 0
        eat_max_ms = 2
        "#,
    )
    .unwrap();

    let system = DiningSystem::from_config(&config, EventSink::disabled()).unwrap();
    assert_eq!(system.pool().len(), 3);
    assert!(wait_until_everyone_ate(&system, Duration::from_secs(10)).await);

    let summary = system.shutdown().await.unwrap();
    assert!(summary.total_meals() >= 3);
}
