use self::ranking::{store::RankingStore, RankingService};
use crate::config::Config;

pub mod ranking;

/// Services shared with the HTTP routes
pub struct Services {
    pub ranking: RankingService,
}

impl Services {
    pub fn init(config: &Config) -> Self {
        let store = RankingStore::new(&config.ranking_file);
        let ranking = RankingService::new(store);

        Self { ranking }
    }
}
