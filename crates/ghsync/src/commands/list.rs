use async_trait::async_trait;
use clap::Parser;

use super::{Command, CommandContext, DeliveryArgs};
use crate::Result;

/// List changes of a stored push delivery
#[derive(Parser)]
pub(crate) struct ListCommand {
    #[command(flatten)]
    delivery: DeliveryArgs,
}

#[async_trait]
impl Command for ListCommand {
    async fn execute(self, ctx: CommandContext) -> Result<()> {
        let request = self.delivery.read_request()?;
        let handler = self.delivery.build_handler(&ctx.config, &request)?;

        let mut writer = ctx.writer.write().await;
        handler.list_changes(&mut *writer)?;

        Ok(())
    }
}
