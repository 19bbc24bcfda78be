use super::service;
use crate::types::{Context, JobFn, JobFuture, SchedulableJob};
use std::str::FromStr;
use std::sync::Arc;

pub const SWEEP_SCHEDULE: &str = "0 */15 * * * *";

async fn sweep_job(ctx: Arc<Context>) -> Result<(), apalis::prelude::Error> {
    tracing::debug!("Sweeping lapsed subscriptions and stale payments...");

    match service::sweep(ctx).await {
        Ok(report) => tracing::info!(
            "Expired {} subscriptions, cleared {} vendor plans, expired {} transactions, pruned {} virtual accounts",
            report.expired_subscriptions,
            report.cleared_vendor_plans,
            report.expired_transactions,
            report.pruned_virtual_accounts
        ),
        Err(err) => tracing::error!("Subscription sweep failed: {:?}", err),
    }

    Ok(())
}

fn setup_sweep_job(ctx: Arc<Context>) -> JobFn {
    Arc::new(move || {
        let ctx = ctx.clone();
        let job: JobFuture = Box::pin(async move { sweep_job(ctx).await });
        job
    })
}

pub fn list(ctx: Arc<Context>) -> Vec<SchedulableJob> {
    vec![SchedulableJob {
        name: "subscription-sweep",
        schedule: apalis::cron::Schedule::from_str(SWEEP_SCHEDULE)
            .expect("Couldn't create schedule"),
        job: setup_sweep_job(ctx),
    }]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sweep_runs_every_quarter_hour() {
        let schedule = apalis::cron::Schedule::from_str(SWEEP_SCHEDULE).unwrap();
        let mut upcoming = schedule.upcoming(chrono::Utc).take(2);
        let first = upcoming.next().unwrap();
        let second = upcoming.next().unwrap();

        assert_eq!(second - first, chrono::Duration::minutes(15));
    }
}
