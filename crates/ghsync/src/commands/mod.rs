//! Commands.

use std::{io::Write, path::Path, sync::Arc};

use async_trait::async_trait;
use clap::{Args as ClapArgs, Subcommand};
use ghsync_config::Config;
use ghsync_core::{constants::GITHUB_EVENT_HEADER, on_push_to_branch, PushHandler, RequestContext};
use ghsync_transfer_interface::TransferService;
use tokio::sync::RwLock;

use self::{list::ListCommand, server::ServerCommand, sync::SyncCommand, verify::VerifyCommand};
use crate::Result;

mod list;
mod server;
mod sync;
mod verify;

pub(crate) struct CommandContext {
    pub config: Config,
    pub transfer_service: Box<dyn TransferService>,
    pub writer: Arc<RwLock<dyn Write + Send + Sync>>,
}

#[async_trait]
pub(crate) trait Command {
    async fn execute(self, ctx: CommandContext) -> Result<()>;
}

/// Command
#[derive(Subcommand)]
pub(crate) enum SubCommand {
    Server(ServerCommand),
    List(ListCommand),
    Sync(SyncCommand),
    Verify(VerifyCommand),
}

#[async_trait]
impl Command for SubCommand {
    async fn execute(self, ctx: CommandContext) -> Result<()> {
        match self {
            Self::Server(sub) => sub.execute(ctx).await,
            Self::List(sub) => sub.execute(ctx).await,
            Self::Sync(sub) => sub.execute(ctx).await,
            Self::Verify(sub) => sub.execute(ctx).await,
        }
    }
}

/// Stored delivery options, shared by replay commands.
#[derive(ClapArgs)]
pub(crate) struct DeliveryArgs {
    /// Path to a stored push payload
    payload: std::path::PathBuf,

    /// Event name of the delivery
    #[arg(long, default_value = "push")]
    event: String,

    /// Watched branch, defaults to the configured one
    #[arg(long)]
    branch: Option<String>,

    /// Repository folder, defaults to the configured one
    #[arg(long)]
    folder: Option<String>,
}

impl DeliveryArgs {
    fn read_request(&self) -> Result<RequestContext> {
        Ok(read_payload(&self.payload)?.with_header(GITHUB_EVENT_HEADER, &self.event))
    }

    fn build_handler(&self, config: &Config, request: &RequestContext) -> Result<PushHandler> {
        let branch = self.branch.as_deref().unwrap_or(&config.sync.branch);
        let handler = on_push_to_branch(request, branch)?;

        // Scope once, a rescope would drop the configured comment.
        Ok(match &self.folder {
            Some(folder) => {
                let mut config = config.clone();
                config.sync.folder = folder.clone();
                handler.apply_config(&config)
            }
            None => handler.apply_config(config),
        })
    }
}

fn read_payload(path: &Path) -> Result<RequestContext> {
    let body = std::fs::read(path)
        .map_err(|e| anyhow::anyhow!("Could not read payload '{}': {}", path.display(), e))?;

    Ok(RequestContext::new(body))
}
