// src/scheduler.rs
//! Check Scheduler - one independent timer per service

use std::sync::Arc;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

use crate::{
    check::{http, ScheduledCheck},
    config::{Config, ServiceDescriptor},
    error::Result,
    util::io::publisher::StatusPublisher,
};
use crate::{log_info, log_warn};

pub struct Scheduler {
    checks: Vec<ScheduledCheck>,
    publisher: StatusPublisher,
    http_client: reqwest::Client,
    topic_root: String,
}

impl Scheduler {
    pub fn new(config: &Config, publisher: StatusPublisher) -> Result<Self> {
        Ok(Self {
            checks: Self::resolve_services(&config.services),
            publisher,
            http_client: http::build_client()?,
            topic_root: config.mqtt_connect.topic_root.clone(),
        })
    }

    /// Resolve every descriptor, skipping (with a warning) the ones that
    /// can't be checked
    pub fn resolve_services(services: &[ServiceDescriptor]) -> Vec<ScheduledCheck> {
        services
            .iter()
            .filter_map(|descriptor| match ScheduledCheck::resolve(descriptor) {
                Ok(check) => Some(check),
                Err(e) => {
                    log_warn!("Skipping {}", e);
                    None
                }
            })
            .collect()
    }

    pub fn checks(&self) -> &[ScheduledCheck] {
        &self.checks
    }

    /// Spawn a task per check. Each probes immediately, then once per interval.
    pub fn start(self) -> SchedulerHandle {
        let mut tasks = Vec::with_capacity(self.checks.len());

        for check in self.checks {
            log_info!(
                "Scheduling {} check for {} every {} seconds as MQTT topic {}/{}.",
                check.protocol,
                check.target,
                check.interval.as_secs(),
                self.topic_root,
                check.name
            );

            let check = Arc::new(check);
            let client = self.http_client.clone();
            let publisher = self.publisher.clone();

            tasks.push(tokio::spawn(async move {
                let mut ticker = tokio::time::interval(check.interval);
                // A probe that overruns its interval doesn't cause a burst
                ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

                loop {
                    // First tick completes immediately
                    ticker.tick().await;
                    check.run(&client, &publisher).await;
                }
            }));
        }

        SchedulerHandle { tasks }
    }
}

/// Running check tasks
pub struct SchedulerHandle {
    tasks: Vec<JoinHandle<()>>,
}

impl SchedulerHandle {
    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    pub fn shutdown(self) {
        for task in self.tasks {
            task.abort();
        }
    }
}
