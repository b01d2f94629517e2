//! Fire-and-forget operator notification over a transactional email
//! provider's HTTP API. Delivery is at-most-once: a failed send is logged
//! and dropped, never retried, and never surfaced to the submitter.

use std::time::Duration;

use anyhow::{Context, Result, anyhow};
use reqwest::Client;
use serde_json::json;
use tracing::{debug, info, warn};

use crate::config::NotifyConfig;
use crate::entities::inspection_request::Model;

#[derive(Clone)]
pub struct Notifier {
    transport: Option<Transport>,
}

#[derive(Clone)]
struct Transport {
    client: Client,
    config: NotifyConfig,
}

impl Notifier {
    pub fn new(config: Option<NotifyConfig>) -> Result<Self> {
        let Some(config) = config else {
            warn!("Notification credentials not configured; new requests will not be emailed");
            return Ok(Self { transport: None });
        };

        let timeout = Duration::from_millis(config.request_timeout_millis());
        assert!(
            timeout >= Duration::from_millis(100),
            "Timeout below 100ms is unsafe"
        );
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .context("Failed to build notification HTTP client")?;

        Ok(Self {
            transport: Some(Transport { client, config }),
        })
    }

    /// Schedules delivery on a detached task and returns immediately. The
    /// originating request's response never waits on, or observes, the
    /// outcome; failures exist only in the logs.
    pub fn notify(&self, record: &Model) {
        let Some(transport) = self.transport.clone() else {
            debug!("Notification skipped for request {} (disabled)", record.id);
            return;
        };

        let id = record.id;
        let subject = subject_line(record);
        let body = summary_body(record);
        tokio::spawn(async move {
            match transport.send(&subject, &body).await {
                Ok(()) => info!("Notification sent for request {id}"),
                Err(err) => warn!("Notification for request {id} failed: {err}"),
            }
        });
    }
}

impl Transport {
    async fn send(&self, subject: &str, text: &str) -> Result<()> {
        let payload = json!({
            "from": self.config.sender,
            "to": self.config.recipient,
            "subject": subject,
            "text": text,
        });
        let response = self
            .client
            .post(&self.config.api_url)
            .bearer_auth(&self.config.api_key)
            .json(&payload)
            .send()
            .await
            .context("Email provider request failed")?;

        let status = response.status();
        if !status.is_success() {
            let detail = response.text().await.unwrap_or_default();
            return Err(anyhow!("Email provider returned {status}: {detail}"));
        }
        Ok(())
    }
}

fn subject_line(record: &Model) -> String {
    format!("New inspection request #{} from {}", record.id, record.name)
}

fn summary_body(record: &Model) -> String {
    let optional = |value: &Option<String>| match value {
        Some(text) if !text.is_empty() => text.clone(),
        _ => "(not provided)".to_string(),
    };
    let escrow = record
        .escrow_date
        .map(|d| d.format("%Y-%m-%d").to_string())
        .unwrap_or_else(|| "(not provided)".to_string());

    format!(
        "A new home inspection request was submitted.\n\n\
         Request #:       {id}\n\
         Received:        {created}\n\
         Name:            {name}\n\
         Phone:           {phone}\n\
         Address:         {address}\n\
         Occupancy:       {occupancy}\n\
         Escrow date:     {escrow}\n\
         Lockbox:         {lockbox}\n\
         Meeting someone: {meeting}\n\
         OK to text:      {consent}\n",
        id = record.id,
        created = record.created_at.format("%Y-%m-%d %H:%M %Z"),
        name = record.name,
        phone = record.phone,
        address = record.address,
        occupancy = optional(&record.occupancy),
        escrow = escrow,
        lockbox = optional(&record.lockbox),
        meeting = optional(&record.meeting_someone),
        consent = record.text_consent,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn record() -> Model {
        Model {
            id: 42,
            created_at: Utc.with_ymd_and_hms(2026, 8, 1, 9, 0, 0).unwrap().into(),
            name: "Jane Doe".to_string(),
            phone: "555-1234".to_string(),
            address: "1 Main St".to_string(),
            occupancy: Some("Vacant".to_string()),
            escrow_date: None,
            lockbox: None,
            meeting_someone: None,
            text_consent: "Yes".to_string(),
            status: "New".to_string(),
            admin_notes: None,
        }
    }

    #[test]
    fn subject_names_request_and_submitter() {
        assert_eq!(
            subject_line(&record()),
            "New inspection request #42 from Jane Doe"
        );
    }

    #[test]
    fn summary_includes_required_and_marks_absent_fields() {
        let body = summary_body(&record());
        assert!(body.contains("Request #:       42"));
        assert!(body.contains("Phone:           555-1234"));
        assert!(body.contains("Occupancy:       Vacant"));
        assert!(body.contains("Escrow date:     (not provided)"));
        assert!(body.contains("OK to text:      Yes"));
    }

    #[test]
    fn disabled_notifier_builds_without_credentials() {
        let notifier = Notifier::new(None).unwrap();
        assert!(notifier.transport.is_none());
    }
}
