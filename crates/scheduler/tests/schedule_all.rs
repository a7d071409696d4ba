//! End-to-end orchestration runs against the in-memory host.

use std::sync::Arc;

use rand::rngs::StdRng;
use rand::SeedableRng;

use nudge_core::{Config, DeliveryStyle, ReminderJob, Trigger};
use nudge_scheduler::hosts::MemoryHost;
use nudge_scheduler::{send_now, NotificationHost, ReminderScheduler};

fn scheduler(host: Arc<MemoryHost>, config: &Config) -> ReminderScheduler {
    ReminderScheduler::new(host, config)
}

fn rng(seed: u64) -> StdRng {
    StdRng::seed_from_u64(seed)
}

const CATALOG: [&str; 9] = [
    "daily_afternoon",
    "daily_evening",
    "daily_late_night",
    "daily_morning",
    "daily_night",
    "random_random1",
    "random_random2",
    "random_random3",
    "random_random4",
];

#[tokio::test]
async fn a_run_registers_exactly_the_catalog() {
    let host = Arc::new(MemoryHost::new());
    let report = scheduler(host.clone(), &Config::default())
        .schedule_all(&mut rng(1))
        .await;

    assert!(report.ran);
    assert_eq!(host.scheduled_identifiers(), CATALOG);

    for identifier in CATALOG {
        let job = host.job(identifier).unwrap();
        assert!(job.trigger.repeats);
        assert!(job.trigger.hour <= 23);
        assert!(job.trigger.minute <= 59);
        assert!(!job.body.is_empty());
    }
}

#[tokio::test]
async fn back_to_back_runs_replace_instead_of_accumulating() {
    let host = Arc::new(MemoryHost::new());
    let s = scheduler(host.clone(), &Config::default());

    s.schedule_all(&mut rng(1)).await;
    s.schedule_all(&mut rng(2)).await;

    assert_eq!(host.job_count(), 9);
    assert_eq!(host.cancel_calls(), 2);
}

#[tokio::test]
async fn stale_identifiers_do_not_survive_a_run() {
    let host = Arc::new(MemoryHost::new());
    host.schedule(&ReminderJob {
        identifier: "legacy_slot".to_string(),
        title: "old".to_string(),
        body: "left over from a previous catalog".to_string(),
        trigger: Trigger::daily(6, 0),
        delivery: DeliveryStyle::standard("reminders"),
    })
    .await
    .unwrap();

    scheduler(host.clone(), &Config::default())
        .schedule_all(&mut rng(3))
        .await;

    assert!(host.job("legacy_slot").is_none());
    assert_eq!(host.scheduled_identifiers(), CATALOG);
}

#[tokio::test]
async fn simulated_environment_schedules_nothing() {
    let host = Arc::new(MemoryHost::new());
    let config = Config {
        simulated: true,
        ..Config::default()
    };

    let report = scheduler(host.clone(), &config).schedule_all(&mut rng(4)).await;

    assert!(!report.ran);
    assert_eq!(host.job_count(), 0);
    assert_eq!(host.cancel_calls(), 0);
}

#[tokio::test]
async fn jittered_slots_stay_within_their_window() {
    // random4 is anchored at 23:00; ±30 plus the hour clamp keeps every
    // draw inside [22:30, 23:30].
    for seed in 0..50 {
        let host = Arc::new(MemoryHost::new());
        scheduler(host.clone(), &Config::default())
            .schedule_all(&mut rng(seed))
            .await;

        let job = host.job("random_random4").unwrap();
        let total = job.trigger.hour * 60 + job.trigger.minute;
        assert!(
            (22 * 60 + 30..=23 * 60 + 30).contains(&total),
            "seed {seed}: random4 landed at {:02}:{:02}",
            job.trigger.hour,
            job.trigger.minute
        );
    }
}

#[tokio::test]
async fn immediate_send_bypasses_the_schedule() {
    let host = Arc::new(MemoryHost::new());
    send_now(host.as_ref(), "Test reminder", "ping").await;

    assert_eq!(host.job_count(), 0);
    assert_eq!(
        host.immediate_sent(),
        vec![("Test reminder".to_string(), "ping".to_string())]
    );
}
