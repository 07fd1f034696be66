use crate::errors::Error;
use queryctl_api as api;

use async_trait::async_trait;
use k8s_openapi::api::core::v1::Event;
use std::collections::HashSet;
use std::io::Write;
use std::time::Duration;
use tokio::time::Instant;
use tokio::time::MissedTickBehavior;

pub const POLL_INTERVAL: Duration = Duration::from_millis(200);
pub const WAIT_TIMEOUT: Duration = Duration::from_secs(300);

/* ANSI SGR color codes for the reason column */
const COLOR_NORMAL: u8 = 32;
const COLOR_WARNING: u8 = 33;
const COLOR_ERROR: u8 = 31;

/*
 * The two cluster operations the watcher needs. Kubectl implements this
 * against a live cluster; tests swap in a scripted source.
 */
#[async_trait]
pub trait EventSource {
    async fn events_for(&self, target: &str) -> Result<Vec<Event>, Error>;
    async fn wait_completed(&self, target: &str, timeout: Duration) -> Result<(), Error>;
}

/*
 * EventWatcher streams a query's events while the query runs. Each event
 * uid is shown at most once per invocation, and only when the event
 * carries a payload annotation.
 */
pub struct EventWatcher<S> {
    source: S,
}

impl<S: EventSource> EventWatcher<S> {
    pub fn new(source: S) -> Self {
        Self { source }
    }

    /*
     * Sample the target's events every 200ms until its Completed
     * condition settles, then sample twice more to catch anything
     * recorded around completion. A failed wait is reported on the sink;
     * nothing is propagated to the caller.
     */
    pub async fn watch<W: Write>(&self, target: &str, mut sink: W) {
        let mut seen: HashSet<String> = HashSet::new();

        let mut ticker = tokio::time::interval_at(Instant::now() + POLL_INTERVAL, POLL_INTERVAL);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        let mut wait = self.source.wait_completed(target, WAIT_TIMEOUT);

        let outcome = loop {
            tokio::select! {
                biased;

                outcome = &mut wait => break outcome,
                _ = ticker.tick() => {
                    self.poll_once(target, &mut seen, &mut sink).await;
                }
            }
        };
        drop(ticker);

        /* events recorded in the completion window may not have been
         * sampled yet; one pass now and one a tick later */
        self.poll_once(target, &mut seen, &mut sink).await;
        tokio::time::sleep(POLL_INTERVAL).await;
        self.poll_once(target, &mut seen, &mut sink).await;

        if let Err(err) = outcome {
            let _ = writeln!(sink, "\x1b[{}mquery wait failed: {}\x1b[0m", COLOR_ERROR, err);
        }
    }

    /*
     * One fetch-and-emit pass. A failed fetch skips the pass entirely,
     * leaving the seen set untouched. A uid is marked seen even when the
     * payload annotation is missing, so a payload that only shows up on
     * a later sample is never emitted.
     */
    async fn poll_once<W: Write>(&self, target: &str, seen: &mut HashSet<String>, sink: &mut W) {
        let events = match self.source.events_for(target).await {
            Ok(events) => events,
            Err(_) => return,
        };

        for event in &events {
            let uid = match &event.metadata.uid {
                Some(uid) => uid,
                None => continue,
            };
            if seen.contains(uid) {
                continue;
            }
            seen.insert(uid.clone());

            if let Some(payload) = api::event_data(event) {
                let _ = writeln!(sink, "{}", render_event(event, payload, &wall_clock()));
            }
        }
    }
}

fn wall_clock() -> String {
    chrono::Local::now().format("%H:%M:%S%.3f").to_string()
}

fn event_color(event_type: &str) -> u8 {
    match event_type {
        "Normal" => COLOR_NORMAL,
        "Warning" => COLOR_WARNING,
        _ => COLOR_ERROR,
    }
}

fn render_event(event: &Event, payload: &str, timestamp: &str) -> String {
    let reason = event.reason.as_deref().unwrap_or("Unknown");
    let event_type = event.type_.as_deref().unwrap_or("Normal");

    format!(
        "{} \x1b[{}m{}\x1b[0m {}",
        timestamp,
        event_color(event_type),
        reason,
        payload
    )
}
