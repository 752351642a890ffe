//! [`ScheduleStore`] over the controller's `Schedule.*` RPC methods.
//!
//! Each created entry makes the controller issue `HTTP.GET` against
//! `{callback_base_url}/api/lights/{light}/schedule/{TAG}` when it fires.

use lumina_app::ports::{DeleteOutcome, ScheduleStore};
use lumina_domain::error::LuminaError;
use lumina_domain::schedule::{ScheduleEntry, ScheduleTrigger};
use serde::Deserialize;
use serde_json::{Value, json};

use crate::client::RpcClient;
use crate::error::RpcError;

#[derive(Debug, Deserialize)]
struct Created {
    id: u32,
}

/// URL the controller calls when `trigger` fires for light `light`.
#[must_use]
pub fn callback_url(base_url: &str, light: &str, trigger: ScheduleTrigger) -> String {
    format!(
        "{}/api/lights/{light}/schedule/{}",
        base_url.trim_end_matches('/'),
        trigger.tag()
    )
}

/// Parameters of `Schedule.Create` for `entry`.
#[must_use]
pub fn create_params(base_url: &str, light: &str, entry: &ScheduleEntry) -> Value {
    json!({
        "id": entry.slot,
        "enable": true,
        "timespec": entry.timespec.to_string(),
        "calls": [{
            "method": "HTTP.GET",
            "params": { "url": callback_url(base_url, light, entry.trigger) },
        }],
    })
}

/// The scheduler of one controller.
#[derive(Debug, Clone)]
pub struct RpcScheduleStore {
    client: RpcClient,
    host: String,
    callback_base_url: String,
}

impl RpcScheduleStore {
    pub fn new(
        client: RpcClient,
        host: impl Into<String>,
        callback_base_url: impl Into<String>,
    ) -> Self {
        Self {
            client,
            host: host.into(),
            callback_base_url: callback_base_url.into(),
        }
    }
}

impl ScheduleStore for RpcScheduleStore {
    async fn delete(&self, slot: u32) -> Result<DeleteOutcome, LuminaError> {
        match self
            .client
            .call(&self.host, "Schedule.Delete", json!({ "id": slot }))
            .await
        {
            Ok(_) => Ok(DeleteOutcome::Deleted),
            Err(err) if err.is_not_found() => Ok(DeleteOutcome::NotFound),
            Err(err) => Err(err.into_schedule()),
        }
    }

    async fn create(&self, light: &str, entry: &ScheduleEntry) -> Result<u32, LuminaError> {
        let params = create_params(&self.callback_base_url, light, entry);
        let result = self
            .client
            .call(&self.host, "Schedule.Create", params)
            .await
            .map_err(RpcError::into_schedule)?;
        let created: Created = serde_json::from_value(result)
            .map_err(|err| RpcError::MalformedResponse(err).into_schedule())?;
        Ok(created.id)
    }
}

#[cfg(test)]
mod tests {
    use lumina_domain::schedule::SchedulePlan;

    use super::*;

    #[test]
    fn should_build_callback_url_without_double_slash() {
        assert_eq!(
            callback_url("http://hub.local:8080/", "porch", ScheduleTrigger::MorningOn),
            "http://hub.local:8080/api/lights/porch/schedule/MORNING_ON"
        );
    }

    #[test]
    fn should_build_create_params_for_sunset_entry() {
        let entries = SchedulePlan::default().entries();
        let evening_on = &entries[3];
        let params = create_params("http://hub.local:8080", "porch", evening_on);
        assert_eq!(
            params,
            json!({
                "id": 4,
                "enable": true,
                "timespec": "@sunset-30m",
                "calls": [{
                    "method": "HTTP.GET",
                    "params": {
                        "url": "http://hub.local:8080/api/lights/porch/schedule/EVENING_ON"
                    },
                }],
            })
        );
    }

    #[test]
    fn should_build_create_params_for_daily_entry() {
        let entries = SchedulePlan::default().entries();
        let params = create_params("http://hub.local", "porch", &entries[0]);
        assert_eq!(params["timespec"], "0 0 6 * * *");
        assert_eq!(params["id"], 1);
    }
}
