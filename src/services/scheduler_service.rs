use crate::error::AppError;
use crate::models::SchedulerJob;
use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use sqlx::PgPool;
use std::sync::Arc;
use tokio::task::JoinHandle;
use tracing::{error, info, warn};

/// A unit of scheduled work. Implementations must be idempotent: the
/// scheduler may fire a job again with the same inputs after a restart.
#[async_trait]
pub trait Job: Send + Sync {
    fn id(&self) -> &str;

    async fn run(&self) -> Result<(), AppError>;
}

struct JobEntry {
    job: Arc<dyn Job>,
    interval: Duration,
    anchor_offset_secs: i64,
}

/// Drives registered jobs on fixed intervals, persisting each job's due
/// time so the cadence survives restarts. Every job runs on its own
/// sequential loop: a firing never overlaps the previous one.
pub struct Scheduler {
    db_pool: PgPool,
    jobs: Vec<JobEntry>,
}

impl Scheduler {
    pub fn new(db_pool: PgPool) -> Self {
        Self {
            db_pool,
            jobs: Vec::new(),
        }
    }

    /// Register a job. The first firing is anchored to the next round
    /// minute plus `anchor_offset_secs`, unless a persisted due time in
    /// the future is restored.
    pub fn add_job(&mut self, job: Arc<dyn Job>, interval_seconds: u64, anchor_offset_secs: i64) {
        self.jobs.push(JobEntry {
            job,
            interval: Duration::seconds(interval_seconds as i64),
            anchor_offset_secs,
        });
    }

    /// Spawn one background loop per registered job.
    pub fn spawn(self) -> Vec<JoinHandle<()>> {
        self.jobs
            .into_iter()
            .map(|entry| {
                let pool = self.db_pool.clone();
                tokio::spawn(async move {
                    run_job_loop(pool, entry).await;
                })
            })
            .collect()
    }
}

async fn run_job_loop(pool: PgPool, entry: JobEntry) {
    let mut next_run = match restore_or_anchor(&pool, &entry).await {
        Ok(next_run) => next_run,
        Err(e) => {
            warn!(job = entry.job.id(), "Could not restore job state: {}", e);
            anchor_after(Utc::now(), entry.anchor_offset_secs)
        }
    };

    info!(
        job = entry.job.id(),
        "Scheduled every {}s, first run at {}",
        entry.interval.num_seconds(),
        next_run
    );

    loop {
        let now = Utc::now();
        if next_run > now {
            let wait = (next_run - now).to_std().unwrap_or_default();
            tokio::time::sleep(wait).await;
        }

        if let Err(e) = entry.job.run().await {
            error!(job = entry.job.id(), "Job run failed: {}", e);
        }

        let fired_at = next_run;
        next_run = advance(next_run, entry.interval, Utc::now());

        if let Err(e) = persist_run(&pool, entry.job.id(), fired_at, next_run).await {
            warn!(job = entry.job.id(), "Could not persist job state: {}", e);
        }
    }
}

/// Resume a persisted due time when it is still in the future and the
/// interval is unchanged; otherwise re-anchor, mirroring
/// replace-existing registration.
async fn restore_or_anchor(pool: &PgPool, entry: &JobEntry) -> Result<DateTime<Utc>, AppError> {
    let existing = sqlx::query_as::<_, SchedulerJob>(
        "SELECT id, interval_seconds, next_run, last_run FROM scheduler_jobs WHERE id = $1",
    )
    .bind(entry.job.id())
    .fetch_optional(pool)
    .await?;

    let now = Utc::now();
    let next_run = match existing {
        Some(job) if job.interval_seconds == entry.interval.num_seconds() && job.next_run > now => {
            info!(job = %job.id, "Restored persisted schedule, next run at {}", job.next_run);
            job.next_run
        }
        _ => anchor_after(now, entry.anchor_offset_secs),
    };

    sqlx::query(
        r#"
        INSERT INTO scheduler_jobs (id, interval_seconds, next_run, updated_at)
        VALUES ($1, $2, $3, now())
        ON CONFLICT (id) DO UPDATE SET
            interval_seconds = EXCLUDED.interval_seconds,
            next_run = EXCLUDED.next_run,
            updated_at = now()
        "#,
    )
    .bind(entry.job.id())
    .bind(entry.interval.num_seconds())
    .bind(next_run)
    .execute(pool)
    .await?;

    Ok(next_run)
}

async fn persist_run(
    pool: &PgPool,
    job_id: &str,
    fired_at: DateTime<Utc>,
    next_run: DateTime<Utc>,
) -> Result<(), AppError> {
    sqlx::query(
        "UPDATE scheduler_jobs SET last_run = $2, next_run = $3, updated_at = now() WHERE id = $1",
    )
    .bind(job_id)
    .bind(fired_at)
    .bind(next_run)
    .execute(pool)
    .await?;

    Ok(())
}

/// The next round wall-clock minute after `now`, shifted by the job's
/// offset so jobs sharing an interval fire staggered.
pub fn anchor_after(now: DateTime<Utc>, offset_secs: i64) -> DateTime<Utc> {
    let secs = now.timestamp();
    let minute_start = secs - secs.rem_euclid(60);
    DateTime::from_timestamp(minute_start + 60 + offset_secs, 0).unwrap_or(now)
}

/// Next due time strictly after `now`, stepping from the last due time
/// so the cadence stays aligned even when runs overshoot the interval.
pub fn advance(after: DateTime<Utc>, interval: Duration, now: DateTime<Utc>) -> DateTime<Utc> {
    let mut next = after + interval;
    while next <= now {
        next = next + interval;
    }
    next
}
