//! nudge-worker — resident worker that (re)declares the daily reminder
//! schedule and, without a device gateway, fires the reminders itself.
//!
//! Host selection:
//! - `NUDGE_WEBHOOK_URL` / `--webhook-url` set → webhook host (a device
//!   gateway owns delivery; the worker schedules and exits)
//! - otherwise → in-process local host (stays resident and fires)
//! - `--dry-run` → in-memory host; prints the planned schedule and exits

use std::sync::Arc;

use clap::Parser;
use rand::rngs::StdRng;
use rand::SeedableRng;
use tokio::sync::Notify;
use tracing::{info, warn};

use nudge_core::{config::load_dotenv, Config};
use nudge_scheduler::hosts::{LocalHost, MemoryHost, WebhookHost};
use nudge_scheduler::{send_now, NotificationHost, ReminderScheduler, ScheduleReport};

// ── CLI ─────────────────────────────────────────────────────────────

/// Declarative daily reminder scheduler.
#[derive(Parser, Debug)]
#[command(name = "nudge-worker", version, about)]
struct Cli {
    /// Device gateway base URL; overrides NUDGE_WEBHOOK_URL from config.
    #[arg(long, env = "NUDGE_WEBHOOK_URL")]
    webhook_url: Option<String>,

    /// Schedule once and exit instead of staying resident.
    #[arg(long)]
    once: bool,

    /// Build the schedule against an in-memory host and print it.
    #[arg(long)]
    dry_run: bool,

    /// Send a one-shot test reminder with this body after scheduling.
    #[arg(long, value_name = "BODY")]
    send_test: Option<String>,
}

// ── main ────────────────────────────────────────────────────────────

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    load_dotenv();
    let cli = Cli::parse();

    let mut config = Config::from_env();
    if cli.webhook_url.is_some() {
        config.webhook_url = cli.webhook_url.clone();
    }

    if cli.dry_run {
        let host = Arc::new(MemoryHost::new());
        let report = run_schedule(host.clone(), &config, &cli).await;
        for identifier in host.scheduled_identifiers() {
            if let Some(job) = host.job(&identifier) {
                info!(
                    identifier = %identifier,
                    hour = job.trigger.hour,
                    minute = job.trigger.minute,
                    body = %job.body,
                    "planned reminder"
                );
            }
        }
        anyhow::ensure!(report.ran, "dry run did not pass the permission gate");
        return Ok(());
    }

    match config.webhook_url.clone() {
        Some(url) => {
            info!(gateway = %url, "using webhook host");
            let host: Arc<dyn NotificationHost> = Arc::new(WebhookHost::new(url)?);
            run_schedule(host, &config, &cli).await;
        }
        None => {
            info!("no gateway configured, using in-process local host");
            let local = Arc::new(LocalHost::new());
            run_schedule(local.clone(), &config, &cli).await;

            if !cli.once {
                let shutdown = Arc::new(Notify::new());
                let signal_target = shutdown.clone();
                tokio::spawn(async move {
                    if tokio::signal::ctrl_c().await.is_ok() {
                        info!("shutdown requested");
                        signal_target.notify_waiters();
                    }
                });
                local.run(&shutdown).await;
            }
        }
    }

    info!("nudge-worker exited cleanly");
    Ok(())
}

/// One orchestration run plus the optional test send, with report logging.
async fn run_schedule(
    host: Arc<dyn NotificationHost>,
    config: &Config,
    cli: &Cli,
) -> ScheduleReport {
    let scheduler = ReminderScheduler::new(host.clone(), config);
    let mut rng = StdRng::from_entropy();
    let report = scheduler.schedule_all(&mut rng).await;

    if report.ran {
        info!(
            scheduled = report.succeeded(),
            failed = report.failed(),
            "schedule run complete"
        );
        for result in report.results.iter().filter(|r| !r.success) {
            warn!(
                identifier = %result.identifier,
                error = result.error.as_deref().unwrap_or("unknown"),
                "slot not scheduled"
            );
        }
    } else {
        warn!("notifications unavailable, nothing scheduled");
    }

    if let Some(body) = &cli.send_test {
        send_now(host.as_ref(), "Test reminder", body).await;
    }

    report
}
