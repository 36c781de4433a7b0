use async_trait::async_trait;
use clap::Parser;
use ghsync_server::server::{run_sync_server, AppContext};

use super::{Command, CommandContext};
use crate::Result;

/// Start server
#[derive(Parser)]
pub(crate) struct ServerCommand;

#[async_trait]
impl Command for ServerCommand {
    async fn execute(self, ctx: CommandContext) -> Result<()> {
        if ctx.config.sync.target_dir.is_empty() {
            anyhow::bail!("Missing env. var.: GHSYNC_SYNC_TARGET_DIR");
        }

        tokio::task::spawn_local(async move {
            let context = AppContext::new_with_adapters(ctx.config, ctx.transfer_service);
            run_sync_server(context).await
        })
        .await??;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use clap::Parser;
    use tokio::sync::RwLock;

    use crate::{
        args::{Args, CommandExecutor},
        testutils::CommandContextTest,
    };

    async fn run_server(ctx: CommandContextTest) -> crate::Result<()> {
        let args = Args::try_parse_from(["ghsync", "server"]).unwrap();
        CommandExecutor::parse_args_async(args, ctx.into_context(Arc::new(RwLock::new(Vec::new()))))
            .await
    }

    #[tokio::test]
    async fn test_server_needs_target_dir() {
        let err = run_server(CommandContextTest::new()).await.unwrap_err();
        assert!(err.to_string().contains("GHSYNC_SYNC_TARGET_DIR"));
    }

    #[actix_rt::test]
    async fn test_server_bind_error() {
        let taken = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let port = taken.local_addr().unwrap().port();

        let mut ctx = CommandContextTest::new();
        ctx.config.sync.target_dir = "/tmp".into();
        ctx.config.server.bind_port = port;

        assert!(run_server(ctx).await.is_err());
    }
}
