//! Module for ranking related logic

use self::{
    models::{sort_ranking, RankingEntry, RANKING_CAPACITY},
    store::RankingStore,
};
use log::debug;
use thiserror::Error;
use tokio::sync::Mutex;

pub mod models;
pub mod store;

pub type RankingResult<T> = Result<T, RankingError>;

#[derive(Debug, Error)]
pub enum RankingError {
    /// Reading or writing the ranking file failed
    #[error("Ranking file IO failed: {0}")]
    Io(#[from] std::io::Error),
    /// Stored ranking file contents are not a valid ranking
    #[error("Ranking file is corrupt: {0}")]
    Corrupt(#[source] serde_json::Error),
    /// Ranking could not be serialized for storage
    #[error("Failed to serialize ranking: {0}")]
    Serialize(#[source] serde_json::Error),
    /// Submission body could not be read
    #[error("Failed to read submission body: {0}")]
    Body(#[source] axum::extract::rejection::BytesRejection),
    /// Submission body was not valid JSON
    #[error("Malformed submission: {0}")]
    MalformedJson(#[source] serde_json::Error),
    /// Submission was missing or had invalid ranking fields
    #[error("Invalid ranking entry: {0}")]
    InvalidEntry(#[source] serde_json::Error),
}

/// Result of submitting a score
#[derive(Debug)]
pub struct Submission {
    /// The ranking after the submission was applied
    pub ranking: Vec<RankingEntry>,
    /// Position of the submitted entry within the ranking, [None]
    /// when it didn't make the cutoff
    pub placement: Option<usize>,
}

/// Service enforcing the ranking order and cap on top of the
/// ranking store
pub struct RankingService {
    store: RankingStore,
    /// Lock held across the entire load-modify-store of a submission,
    /// holds the last timestamp handed out
    submit_lock: Mutex<i64>,
}

impl RankingService {
    pub fn new(store: RankingStore) -> Self {
        Self {
            store,
            submit_lock: Mutex::new(0),
        }
    }

    pub fn store(&self) -> &RankingStore {
        &self.store
    }

    /// Obtains the current ranking as stored
    pub async fn get_ranking(&self) -> RankingResult<Vec<RankingEntry>> {
        self.store.load().await
    }

    /// Submits a new entry to the ranking, the entry is inserted into
    /// the current ranking which is then sorted, capped and stored
    pub async fn submit_score(&self, mut entry: RankingEntry) -> RankingResult<Submission> {
        let mut last_timestamp = self.submit_lock.lock().await;

        // Server assigned timestamps never go backwards
        if entry.timestamp.is_none() {
            let now = chrono::Utc::now().timestamp_millis().max(*last_timestamp);
            *last_timestamp = now;
            entry.timestamp = Some(now);
        }

        let mut ranking = self.store.load().await?;
        let existing = count_matching(&ranking, &entry);

        ranking.push(entry.clone());
        sort_ranking(&mut ranking);
        ranking.truncate(RANKING_CAPACITY);

        // The stable sort keeps the new entry after any identical entries so
        // it survived the cutoff only if the identical count went up
        let placement = if count_matching(&ranking, &entry) > existing {
            ranking.iter().rposition(|value| value == &entry)
        } else {
            None
        };

        self.store.save(&ranking).await?;

        match placement {
            Some(placement) => debug!(
                "Ranking entry accepted (Timestamp: {:?}, Place: {})",
                entry.timestamp,
                placement + 1
            ),
            None => debug!(
                "Ranking entry below cutoff (Timestamp: {:?}, Cutoff: {})",
                entry.timestamp, RANKING_CAPACITY
            ),
        }

        Ok(Submission { ranking, placement })
    }
}

fn count_matching(ranking: &[RankingEntry], entry: &RankingEntry) -> usize {
    ranking.iter().filter(|value| *value == entry).count()
}
