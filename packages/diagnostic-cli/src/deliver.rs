//! Where a finished payload goes: a file, the intake endpoint, or stdout.

use std::path::Path;

use anyhow::{Context, Result};
use diagnostic::{SubmissionPayload, Submitter};
use diagnostic_client::DiagnosticClient;
use tracing::info;

use crate::context::{AppContext, Tone};

/// Holds the payload emitted by the wizard until the caller delivers it.
#[derive(Debug, Default)]
pub struct PendingSubmission {
    payload: Option<SubmissionPayload>,
}

impl PendingSubmission {
    pub fn take(&mut self) -> Option<SubmissionPayload> {
        self.payload.take()
    }
}

impl Submitter for PendingSubmission {
    fn submit(&mut self, payload: SubmissionPayload) {
        self.payload = Some(payload);
    }
}

pub async fn deliver(
    ctx: &AppContext,
    payload: &SubmissionPayload,
    output: Option<&Path>,
) -> Result<()> {
    if let Some(path) = output {
        let json = serde_json::to_string_pretty(payload).context("Failed to encode payload")?;
        std::fs::write(path, json)
            .with_context(|| format!("Failed to write payload to {}", path.display()))?;
        info!(path = %path.display(), "payload written");
        ctx.status(Tone::Success, &format!("✓ Diagnostic saved to {}", path.display()));
        return Ok(());
    }

    if let Some(url) = &ctx.config.submit_url {
        let mut client = DiagnosticClient::new(url.as_str())
            .with_timeout(ctx.config.submit_timeout)
            .context("Failed to build HTTP client")?;
        if let Some(token) = &ctx.config.api_token {
            client = client.with_token(token.as_str());
        }

        let receipt = client
            .submit(payload)
            .await
            .with_context(|| format!("Failed to submit diagnostic to {}", url))?;
        ctx.status(Tone::Success, &format!(
            "✓ Diagnostic submitted ({})",
            receipt.submission_id
        ));
        return Ok(());
    }

    let json = serde_json::to_string_pretty(payload).context("Failed to encode payload")?;
    println!("{}", json);
    Ok(())
}
