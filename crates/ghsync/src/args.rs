use std::sync::Arc;

use clap::Parser;
use ghsync_config::{Config, TransferDriver};
use ghsync_server::transfer::MetricsTransferService;
use ghsync_transfer_interface::TransferService;
use ghsync_transfer_null::NullTransferService;
use tokio::sync::RwLock;
use tracing::info;

use crate::{
    commands::{Command, CommandContext, SubCommand},
    Result,
};

#[derive(Parser)]
#[command(about = None, long_about = None)]
pub struct Args {
    #[command(subcommand)]
    cmd: SubCommand,
}

pub struct CommandExecutor;

impl CommandExecutor {
    pub fn parse_args(config: Config, args: Args) -> Result<()> {
        let sync = |config: Config, args: Args| async move {
            let transfer_service: Box<dyn TransferService> = {
                if config.transfer.driver == TransferDriver::Http {
                    info!("Using MetricsTransferService transfer driver");
                    Box::new(MetricsTransferService::new(&config)?)
                } else {
                    info!("Using NullTransferService transfer driver");
                    Box::new(NullTransferService::new())
                }
            };

            let ctx = CommandContext {
                config,
                transfer_service,
                writer: Arc::new(RwLock::new(std::io::stdout())),
            };

            Self::parse_args_async(args, ctx).await
        };

        actix_rt::System::with_tokio_rt(|| {
            tokio::runtime::Builder::new_multi_thread()
                .enable_all()
                .build()
                .expect("could not build tokio runtime")
        })
        .block_on(sync(config, args))?;

        Ok(())
    }

    pub(crate) async fn parse_args_async(args: Args, ctx: CommandContext) -> Result<()> {
        args.cmd.execute(ctx).await
    }
}
