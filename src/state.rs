use crate::fetcher::StatsFetcher;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub fetcher: Arc<StatsFetcher>,
}

impl AppState {
    pub fn new(fetcher: StatsFetcher) -> Self {
        Self {
            fetcher: Arc::new(fetcher),
        }
    }
}
