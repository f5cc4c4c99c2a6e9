use abi::config::Config;
use abi::errors::Error;
use relation::RelationService;

mod api_utils;
pub(crate) mod handlers;
pub(crate) mod routes;

#[derive(Clone, Debug)]
pub struct AppState {
    pub relation: RelationService,
}

impl AppState {
    pub async fn new(config: &Config) -> Result<Self, Error> {
        let relation = RelationService::from_config(config).await?;
        Ok(Self { relation })
    }
}

pub async fn start(config: Config) -> Result<(), Error> {
    let state = AppState::new(&config).await?;
    let app = routes::app_routes(state);
    let listener = tokio::net::TcpListener::bind(&config.server.server_url()).await?;
    tracing::info!("listening on {}", listener.local_addr()?);
    axum::serve(listener, app).await?;
    Ok(())
}
