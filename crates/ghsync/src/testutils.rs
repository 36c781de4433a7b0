use std::{io::Write, sync::Arc};

use clap::Parser;
use ghsync_config::{Config, TransferDriver};
use ghsync_core::constants::RAW_CONTENT_ROOT_URL;
use ghsync_transfer_interface::MockTransferService;
use tokio::sync::RwLock;

use crate::{
    args::{Args, CommandExecutor},
    commands::CommandContext,
};

/// Environment-independent configuration.
pub(crate) fn sample_config() -> Config {
    let mut config = Config::from_env_no_version().unwrap();
    config.name = "ghsync".into();
    config.server.bind_ip = "127.0.0.1".into();
    config.server.bind_port = 8008;
    config.server.webhook_secret = String::new();
    config.sync.branch = "main".into();
    config.sync.folder = String::new();
    config.sync.target_dir = String::new();
    config.sync.comment = String::new();
    config.sync.github_username = String::new();
    config.sync.github_password = String::new();
    config.transfer.driver = TransferDriver::Http;
    config.transfer.raw_root_url = RAW_CONTENT_ROOT_URL.into();
    config
}

pub(crate) struct CommandContextTest {
    pub config: Config,
    pub transfer_service: MockTransferService,
}

impl CommandContextTest {
    pub fn new() -> Self {
        Self {
            config: sample_config(),
            transfer_service: MockTransferService::new(),
        }
    }

    pub fn into_context(self, writer: Arc<RwLock<dyn Write + Send + Sync>>) -> CommandContext {
        CommandContext {
            config: self.config,
            transfer_service: Box::new(self.transfer_service),
            writer,
        }
    }
}

pub(crate) async fn test_command(ctx: CommandContextTest, command_args: &[&str]) -> String {
    let buf = Arc::new(RwLock::new(Vec::new()));

    {
        let command_args = {
            let mut tmp_args = vec!["ghsync"];
            tmp_args.extend(command_args);
            tmp_args
        };

        let args = Args::try_parse_from(command_args);
        match args {
            Ok(args) => CommandExecutor::parse_args_async(args, ctx.into_context(buf.clone()))
                .await
                .unwrap(),
            Err(e) => {
                eprintln!("{}", e);
                panic!("Parse error.")
            }
        }
    }

    let vec = buf.read().await.to_vec();
    std::str::from_utf8(&vec).unwrap().to_string()
}
