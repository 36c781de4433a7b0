//! Server module.

use actix_web::{
    body::MessageBody,
    dev::{ServiceFactory, ServiceRequest, ServiceResponse},
    middleware::Logger,
    web::{self, Data},
    App, HttpResponse, HttpServer,
};
use actix_web_prom::PrometheusMetrics;
use ghsync_config::Config;
use ghsync_transfer_interface::TransferService;
use tracing::{info, warn};

use crate::{
    health::health_check_route, metrics::build_metrics_handler, transfer::MetricsTransferService,
    webhook::configure_webhook_handlers, Result, ServerError,
};

/// App context.
pub struct AppContext {
    /// Config.
    pub config: Config,
    /// Transfer adapter.
    pub transfer_service: Box<dyn TransferService>,
}

impl AppContext {
    /// Create new app context.
    pub fn new(config: Config) -> Result<Self> {
        let transfer_service = Box::new(MetricsTransferService::new(&config)?);
        Ok(Self {
            config,
            transfer_service,
        })
    }

    /// Create new app context using adapters.
    pub fn new_with_adapters(config: Config, transfer_service: Box<dyn TransferService>) -> Self {
        Self {
            config,
            transfer_service,
        }
    }

    /// Secret used to check webhook signatures, if enabled.
    pub fn webhook_secret(&self) -> Option<&str> {
        let server = &self.config.server;
        if server.disable_webhook_signature || server.webhook_secret.is_empty() {
            None
        } else {
            Some(&server.webhook_secret)
        }
    }
}

/// Build Actix app.
pub fn build_actix_app(
    context: Data<AppContext>,
    metrics: PrometheusMetrics,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse<impl MessageBody>,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    App::new()
        .app_data(context)
        .wrap(metrics)
        .wrap(Logger::default())
        .service(web::scope("/webhook").configure(configure_webhook_handlers))
        .route("/health", web::get().to(health_check_route))
        .route(
            "/",
            web::get().to(|| async {
                HttpResponse::Ok().json(serde_json::json!({"message": "Welcome on ghsync!" }))
            }),
        )
}

/// Run sync server.
pub async fn run_sync_server(context: AppContext) -> Result<()> {
    let address = get_bind_address(&context.config);

    if context.config.server.disable_webhook_signature {
        warn!("Signature verification is disabled. This can be a security concern.");
    } else if context.webhook_secret().is_none() {
        warn!("Environment variable 'GHSYNC_SERVER_WEBHOOK_SECRET' is not set. Disabling signature verification.");
    }

    info!(
        version = %context.config.version,
        address = %address,
        branch = %context.config.sync.branch,
        target = %context.config.sync.target_dir,
        message = "Starting sync server",
    );

    run_sync_server_internal(address, context).await
}

fn get_bind_address(config: &Config) -> String {
    format!("{}:{}", config.server.bind_ip, config.server.bind_port)
}

async fn run_sync_server_internal(ip_with_port: String, context: AppContext) -> Result<()> {
    let workers_count = context.config.server.workers_count;
    let context = Data::new(context);
    let metrics = build_metrics_handler()?;

    let mut server = HttpServer::new(move || build_actix_app(context.clone(), metrics.clone()));

    if let Some(workers) = workers_count {
        server = server.workers(workers as usize);
    }

    server
        .bind(ip_with_port)
        .map_err(|e| ServerError::IoError { source: e })?
        .run()
        .await
        .map_err(|e| ServerError::IoError { source: e })
}
