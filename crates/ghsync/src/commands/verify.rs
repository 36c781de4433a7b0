use std::io::Write;

use async_trait::async_trait;
use clap::Parser;
use ghsync_core::{constants::GITHUB_SIGNATURE_HEADER, is_request_secure};

use super::{read_payload, Command, CommandContext};
use crate::Result;

/// Check a stored delivery against the configured webhook secret
#[derive(Parser)]
pub(crate) struct VerifyCommand {
    /// Path to a stored payload
    payload: std::path::PathBuf,

    /// Signature header value, like "sha1=..."
    #[arg(long)]
    signature: String,
}

#[async_trait]
impl Command for VerifyCommand {
    async fn execute(self, ctx: CommandContext) -> Result<()> {
        let secret = &ctx.config.server.webhook_secret;
        if secret.is_empty() {
            anyhow::bail!("Missing env. var.: GHSYNC_SERVER_WEBHOOK_SECRET");
        }

        let request =
            read_payload(&self.payload)?.with_header(GITHUB_SIGNATURE_HEADER, self.signature);
        let mut writer = ctx.writer.write().await;
        if is_request_secure(&request, secret) {
            writeln!(writer, "Signature is valid.")?;
        } else {
            writeln!(writer, "Signature is NOT valid.")?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use ghsync_crypto::Signature;
    use pretty_assertions::assert_eq;

    use crate::{
        commands::fixtures::{write_payload, PUSH_PAYLOAD},
        testutils::{test_command, CommandContextTest},
    };

    #[tokio::test]
    async fn test_verify() {
        let dir = tempfile::tempdir().unwrap();
        let payload = write_payload(dir.path());
        let header = Signature::compute_header(PUSH_PAYLOAD.as_bytes(), "s3cr3t").unwrap();

        let mut ctx = CommandContextTest::new();
        ctx.config.server.webhook_secret = "s3cr3t".into();
        assert_eq!(
            test_command(ctx, &["verify", &payload, "--signature", &header]).await,
            "Signature is valid.\n"
        );

        let mut ctx = CommandContextTest::new();
        ctx.config.server.webhook_secret = "other".into();
        assert_eq!(
            test_command(ctx, &["verify", &payload, "--signature", &header]).await,
            "Signature is NOT valid.\n"
        );
    }
}
