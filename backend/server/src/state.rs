use std::sync::Arc;

use menu::{DiningClient, DiningError};

use super::config::Config;

pub struct State {
    pub config: Config,
    pub dining: DiningClient,
}

impl State {
    pub fn new(config: Config) -> Result<Arc<Self>, DiningError> {
        let dining = DiningClient::new(&config.api_base, &config.location_id, config.timeout)?;

        Ok(Arc::new(Self { config, dining }))
    }
}
