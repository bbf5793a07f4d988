//! Synthetic notifications injected on each poll.

use crate::model::notification::{NotificationDraft, NotificationKind};
use rand::seq::SliceRandom;
use rand::Rng;

const TASK_AVATAR: &str = "https://images.pexels.com/photos/3763188/pexels-photo-3763188.jpeg?auto=compress&cs=tinysrgb&w=64&h=64&dpr=2";
const FILE_AVATAR: &str = "https://images.pexels.com/photos/2379004/pexels-photo-2379004.jpeg?auto=compress&cs=tinysrgb&w=64&h=64&dpr=2";

#[derive(Debug, Clone)]
pub struct SyntheticFeed {
    pool: Vec<NotificationDraft>,
    probability: f64,
}

impl SyntheticFeed {
    /// Feed over the built-in pool; `probability` is clamped to `[0, 1]`.
    pub fn new(probability: f64) -> Self {
        Self::with_pool(default_pool(), probability)
    }

    pub fn with_pool(pool: Vec<NotificationDraft>, probability: f64) -> Self {
        let probability = if probability.is_nan() {
            0.0
        } else {
            probability.clamp(0.0, 1.0)
        };
        Self { pool, probability }
    }

    pub fn probability(&self) -> f64 {
        self.probability
    }

    pub fn pool(&self) -> &[NotificationDraft] {
        &self.pool
    }

    /// Rolls once; on a hit returns a draft chosen uniformly from the pool.
    pub fn poll<R: Rng>(&self, rng: &mut R) -> Option<NotificationDraft> {
        if rng.gen::<f64>() >= self.probability {
            return None;
        }
        self.pool.choose(rng).cloned()
    }
}

fn default_pool() -> Vec<NotificationDraft> {
    vec![
        NotificationDraft::new(
            NotificationKind::Task,
            "New Task Assignment",
            "You have been assigned a new task: \"Update user documentation\"",
        )
        .with_avatar(TASK_AVATAR),
        NotificationDraft::new(
            NotificationKind::File,
            "File Shared",
            "A new file has been shared with you: \"Q4_Report.xlsx\"",
        )
        .with_avatar(FILE_AVATAR),
        NotificationDraft::new(
            NotificationKind::Meeting,
            "Meeting Scheduled",
            "A new meeting has been scheduled for tomorrow at 2:00 PM",
        ),
    ]
}
