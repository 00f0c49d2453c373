pub mod api;
pub mod config;
pub mod db;

pub use db::DbPool;

use api::token::TokenService;
use config::Config;

pub struct AppState {
    pub config: Config,
    pub db: DbPool,
    pub tokens: TokenService,
}

impl AppState {
    pub fn new(config: Config, db: DbPool) -> Self {
        let tokens = TokenService::new(&config.auth.jwt_secret, config.auth.token_ttl_secs);
        Self { config, db, tokens }
    }
}
