//! Watch a resource load through a fetch subscription.

use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context as _, Result};
use chrono::Local;
use console::style;
use dashboard_core::FetchConfig;
use dashboard_data::{FetchState, SafeFetch, SubscribeOptions, SubscriptionId};
use dashboard_domain::prelude::MockStore;
use dashboard_observability::FetchMetrics;
use serde::Serialize;
use tokio::time::Instant;

use super::{FetchArgs, Resource};
use crate::context::Context;
use crate::listing::Listing;
use crate::output::status_badge;
use crate::scenario::scenario_producer;

/// One observed state of the subscription.
#[derive(Debug, Clone, PartialEq, Serialize)]
struct Transition {
    /// Wall-clock time the state was observed.
    time: String,
    /// Milliseconds since subscribing.
    elapsed_ms: u64,
    phase: &'static str,
    retry_count: u8,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    items: Option<usize>,
}

impl Transition {
    fn observe<T: Listing>(elapsed: Duration, state: &FetchState<T>) -> Self {
        Self {
            time: Local::now().format("%H:%M:%S%.3f").to_string(),
            elapsed_ms: elapsed.as_millis() as u64,
            phase: phase_of(state),
            retry_count: state.retry_count,
            error: state.error.clone(),
            items: state.data.as_ref().map(Listing::count),
        }
    }

    fn describe(&self) -> String {
        let mut line = status_badge(self.phase);
        if self.phase == "loading" || self.phase == "retrying" {
            line.push_str(&format!(" (attempt {})", self.retry_count + 1));
        }
        if let Some(ref error) = self.error {
            line.push_str(&format!(": {}", error));
        }
        if let Some(items) = self.items {
            line.push_str(&format!(" [{} item(s)]", items));
        }
        line
    }
}

fn phase_of<T>(state: &FetchState<T>) -> &'static str {
    if state.loading {
        if state.retry_count > 0 {
            "retrying"
        } else {
            "loading"
        }
    } else if state.retry_pending {
        "retry scheduled"
    } else if state.error.is_some() {
        "error"
    } else if state.data.is_some() {
        "ok"
    } else {
        "idle"
    }
}

#[derive(Serialize)]
struct FetchReport<T> {
    resource: &'static str,
    transitions: Vec<Transition>,
    data: T,
    error: Option<String>,
    metrics: Vec<dashboard_observability::SubscriptionMetrics>,
}

/// Run the fetch command.
pub async fn run(args: FetchArgs, ctx: &Context) -> Result<()> {
    let config = ctx.config.fetch.clone();
    config.validate().context("Invalid [fetch] configuration")?;

    let store = Arc::new(MockStore::seeded()?);

    match args.resource {
        Resource::Products => watch_resource(&args, ctx, config, move || store.products()).await,
        Resource::Orders => watch_resource(&args, ctx, config, move || store.orders()).await,
        Resource::Clients => watch_resource(&args, ctx, config, move || store.clients()).await,
        Resource::Notifications => {
            watch_resource(&args, ctx, config, move || store.notifications()).await
        }
    }
}

async fn watch_resource<T, F>(
    args: &FetchArgs,
    ctx: &Context,
    config: FetchConfig,
    load: F,
) -> Result<()>
where
    T: Listing,
    F: Fn() -> T + Send + Sync + 'static,
{
    let label = args.resource.as_str();
    let metrics = Arc::new(FetchMetrics::new());

    ctx.output.header(&format!("Fetching {}", label));
    ctx.output.kv("scenario", args.scenario.describe());
    ctx.output.kv("timeout", &format!("{}ms", config.timeout_ms));
    ctx.output.kv(
        "retry",
        &format!("{} after {}ms", config.max_auto_retries, config.retry_delay_ms),
    );

    let options = SubscribeOptions::new(config)
        .with_id(SubscriptionId::from_string(label))
        .with_observer(metrics.clone());
    let fetch = SafeFetch::subscribe_with(scenario_producer(args.scenario, load), (), options);
    let mut rx = fetch.watch();

    let spinner = ctx.output.spinner(&format!("Loading {}...", label));
    let started = Instant::now();
    let mut refetch_at = args.refetch_after.map(|secs| started + Duration::from_secs(secs));
    let mut transitions: Vec<Transition> = Vec::new();

    loop {
        let state = rx.borrow_and_update().clone();
        let transition = Transition::observe(started.elapsed(), &state);
        if !ctx.output.is_json() {
            let line = format!(
                "{} {} {}",
                style(&transition.time).dim(),
                style(format!("+{:.3}s", transition.elapsed_ms as f64 / 1000.0)).dim(),
                transition.describe()
            );
            spinner.suspend(|| println!("  {}", line));
        }
        transitions.push(transition);

        if state.is_settled() && refetch_at.is_none() {
            break;
        }

        tokio::select! {
            changed = rx.changed() => {
                if changed.is_err() {
                    break;
                }
            }
            _ = wait_until(refetch_at) => {
                refetch_at = None;
                ctx.output.debug("manual refetch");
                fetch.refetch();
            }
        }
    }

    spinner.finish_and_clear();
    let state = fetch.state();
    fetch.unsubscribe();

    let data = state.data_or_default();
    if ctx.output.is_json() {
        ctx.output.json(&FetchReport {
            resource: label,
            transitions,
            data,
            error: state.error,
            metrics: metrics.all(),
        });
        return Ok(());
    }

    match state.error {
        Some(ref error) => ctx.output.warn(&format!("Gave up loading {}: {}", label, error)),
        None => {
            ctx.output.success(&format!("Loaded {} {}", data.count(), label));
            ctx.output.table(T::headers(), &data.rows());
        }
    }

    ctx.output.header("Metrics");
    for line in metrics.to_summary().lines() {
        println!("  {}", line);
    }

    Ok(())
}

async fn wait_until(deadline: Option<Instant>) {
    match deadline {
        Some(deadline) => tokio::time::sleep_until(deadline).await,
        None => std::future::pending().await,
    }
}
