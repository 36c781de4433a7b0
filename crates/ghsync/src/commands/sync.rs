use async_trait::async_trait;
use clap::Parser;

use super::{Command, CommandContext, DeliveryArgs};
use crate::Result;

/// Replay a stored push delivery into a local folder
#[derive(Parser)]
pub(crate) struct SyncCommand {
    #[command(flatten)]
    delivery: DeliveryArgs,

    /// Target folder, defaults to the configured one
    #[arg(long)]
    target: Option<String>,
}

#[async_trait]
impl Command for SyncCommand {
    async fn execute(self, ctx: CommandContext) -> Result<()> {
        let target = self.target.as_deref().unwrap_or(&ctx.config.sync.target_dir);
        if target.is_empty() {
            anyhow::bail!("No target folder given, use --target or GHSYNC_SYNC_TARGET_DIR");
        }

        let request = self.delivery.read_request()?;
        let handler = self.delivery.build_handler(&ctx.config, &request)?;

        let mut writer = ctx.writer.write().await;
        handler
            .push_changes_to_folder(target, ctx.transfer_service.as_ref(), &mut *writer)
            .await?;

        Ok(())
    }
}
