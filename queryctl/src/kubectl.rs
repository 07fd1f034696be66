use crate::errors::Error;
use crate::watch::EventSource;
use queryctl_api as api;

use async_trait::async_trait;
use k8s_openapi::api::core::v1::Event;
use std::time::Duration;
use tokio::process::Command;

/* Sentinel name selecting the most recently created resource of a kind */
pub const LATEST: &str = "@latest";

/*
 * Kubectl shells out to the cluster CLI for every operation: queries and
 * their events are ordinary cluster resources, so getting, listing,
 * deleting and waiting each map onto a single binary invocation.
 */
#[derive(Clone, Default)]
pub struct Kubectl;

impl Kubectl {
    pub fn new() -> Self {
        Self
    }

    async fn run(&self, args: &[&str]) -> Result<Vec<u8>, Error> {
        log::debug!("kubectl {}", args.join(" "));

        let output = Command::new("kubectl")
            .args(args)
            .kill_on_drop(true)
            .output()
            .await?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
            return Err(Error::Kubectl(stderr));
        }
        Ok(output.stdout)
    }

    pub async fn get(&self, kind: &str, name: &str) -> Result<api::Object, Error> {
        if name == LATEST {
            /* kubectl sorts for us; the newest resource is the last item */
            let mut items = self.list(kind, Some(".metadata.creationTimestamp")).await?;
            return match items.pop() {
                Some(obj) => Ok(obj),
                None => Err(Error::NotFound(kind.to_string())),
            };
        }

        let stdout = self.run(&["get", kind, name, "-o", "json"]).await?;
        Ok(serde_json::from_slice(&stdout)?)
    }

    pub async fn list(&self, kind: &str, sort_by: Option<&str>) -> Result<Vec<api::Object>, Error> {
        let sort_arg;
        let mut args = vec!["get", kind];
        if let Some(field) = sort_by {
            sort_arg = format!("--sort-by={}", field);
            args.push(&sort_arg);
        }
        args.push("-o");
        args.push("json");

        let stdout = self.run(&args).await?;
        let list: api::ObjectList<api::Object> = serde_json::from_slice(&stdout)?;
        Ok(list.items)
    }

    pub async fn delete(&self, kind: &str, name: Option<&str>, all: bool) -> Result<(), Error> {
        let mut args = vec!["delete", kind];
        if all {
            args.push("--all");
        } else if let Some(name) = name {
            args.push(name);
        }

        self.run(&args).await?;
        Ok(())
    }
}

#[async_trait]
impl EventSource for Kubectl {
    async fn events_for(&self, target: &str) -> Result<Vec<Event>, Error> {
        let selector = format!("involvedObject.name={}", target);
        let stdout = self
            .run(&["get", "events", "--field-selector", &selector, "-o", "json"])
            .await?;

        let list: api::ObjectList<Event> = serde_json::from_slice(&stdout)?;
        Ok(list.items)
    }

    /*
     * kubectl enforces the timeout server-side through --timeout; the
     * outer tokio timeout additionally bounds a kubectl that hangs
     * before reaching the cluster, killing the child on expiry.
     */
    async fn wait_completed(&self, target: &str, timeout: Duration) -> Result<(), Error> {
        let resource = format!("query/{}", target);
        let timeout_arg = format!("--timeout={}s", timeout.as_secs());
        let args = ["wait", "--for=condition=Completed", &resource, &timeout_arg];
        let wait = self.run(&args);

        match tokio::time::timeout(timeout, wait).await {
            Ok(outcome) => outcome.map(|_| ()),
            Err(_) => Err(Error::WaitTimeout(timeout.as_secs())),
        }
    }
}
