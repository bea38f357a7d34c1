//! Bounded per-user conversation memory.

use std::collections::{HashMap, VecDeque};

use async_trait::async_trait;
use log::debug;
use poise::serenity_prelude::UserId;
use tokio::sync::RwLock;

use crate::types::Turn;

/// Maximum number of turns kept for a single user.
pub const MAX_HISTORY: usize = 10;

/// Ordered turns for one user, never longer than [`MAX_HISTORY`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct History {
    turns: VecDeque<Turn>,
}

impl History {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a turn, dropping the oldest ones once the cap is exceeded.
    pub fn push(&mut self, turn: Turn) {
        self.turns.push_back(turn);
        while self.turns.len() > MAX_HISTORY {
            self.turns.pop_front();
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.turns.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Turn> {
        self.turns.iter()
    }
}

/// Storage for per-user histories.
#[async_trait]
pub trait HistoryStore: Send + Sync {
    /// Returns a snapshot of the user's history, registering an empty one on first use.
    async fn get_or_create(&self, user_id: UserId) -> History;

    /// Appends a turn to the user's history, applying the cap.
    async fn append(&self, user_id: UserId, turn: Turn);
}

/// Process-lifetime history store. Entries are never evicted.
#[derive(Debug, Default)]
pub struct InMemoryHistoryStore {
    histories: RwLock<HashMap<UserId, History>>,
}

impl InMemoryHistoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of users with a history entry.
    pub async fn len(&self) -> usize {
        self.histories.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.histories.read().await.is_empty()
    }
}

#[async_trait]
impl HistoryStore for InMemoryHistoryStore {
    async fn get_or_create(&self, user_id: UserId) -> History {
        if let Some(history) = self.histories.read().await.get(&user_id) {
            return history.clone();
        }

        debug!("Creating conversation history for user {user_id}");
        self.histories
            .write()
            .await
            .entry(user_id)
            .or_default()
            .clone()
    }

    async fn append(&self, user_id: UserId, turn: Turn) {
        let mut histories = self.histories.write().await;
        let history = histories.entry(user_id).or_default();
        history.push(turn);
        debug!(
            "History for user {user_id} now has {} turns",
            history.len()
        );
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn contents(history: &History) -> Vec<String> {
        history.iter().map(|turn| turn.content.clone()).collect()
    }

    #[test]
    fn push_keeps_most_recent_turns_in_order() {
        let mut history = History::new();
        for i in 0..25_usize {
            history.push(Turn::user(i.to_string()));
            assert!(history.len() <= MAX_HISTORY);

            let first_kept = (i + 1).saturating_sub(MAX_HISTORY);
            let expected: Vec<String> = (first_kept..=i).map(|n| n.to_string()).collect();
            assert_eq!(contents(&history), expected);
        }
    }

    #[test]
    fn push_below_cap_keeps_everything() {
        let mut history = History::new();
        history.push(Turn::user("hello"));
        history.push(Turn::assistant("hi there"));
        assert_eq!(history.len(), 2);
        assert_eq!(contents(&history), vec!["hello", "hi there"]);
    }

    #[tokio::test]
    async fn get_or_create_registers_empty_history() {
        let store = InMemoryHistoryStore::new();
        assert!(store.is_empty().await);

        let history = store.get_or_create(UserId::new(1)).await;
        assert!(history.is_empty());
        assert_eq!(store.len().await, 1);

        store.get_or_create(UserId::new(1)).await;
        assert_eq!(store.len().await, 1);
    }

    #[tokio::test]
    async fn append_applies_cap() {
        let store = InMemoryHistoryStore::new();
        let user = UserId::new(7);
        for i in 0..(MAX_HISTORY + 3) {
            store.append(user, Turn::user(format!("m{i}"))).await;
        }

        let history = store.get_or_create(user).await;
        assert_eq!(history.len(), MAX_HISTORY);
        assert_eq!(history.iter().next().map(|t| t.content.as_str()), Some("m3"));
    }

    #[tokio::test]
    async fn users_are_independent() {
        let store = InMemoryHistoryStore::new();
        let alice = UserId::new(1);
        let bob = UserId::new(2);

        store.append(alice, Turn::user("from alice")).await;
        let bob_before = store.get_or_create(bob).await;

        for i in 0..20 {
            store.append(alice, Turn::assistant(format!("reply {i}"))).await;
        }

        assert_eq!(store.get_or_create(bob).await, bob_before);
        assert!(bob_before.is_empty());
        assert_eq!(store.get_or_create(alice).await.len(), MAX_HISTORY);
    }
}
