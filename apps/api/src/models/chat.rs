use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    pub id: Uuid,
    pub sender_id: Uuid,
    pub content: String,
    pub sent_at: DateTime<Utc>,
}

/// A two-party thread. `unread` is keyed by participant id.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Conversation {
    pub id: Uuid,
    pub participants: [Uuid; 2],
    pub messages: Vec<Message>,
    pub unread: HashMap<Uuid, u32>,
    pub created_at: DateTime<Utc>,
}

impl Conversation {
    pub fn new(a: Uuid, b: Uuid, created_at: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4(),
            participants: [a, b],
            messages: Vec::new(),
            unread: HashMap::from([(a, 0), (b, 0)]),
            created_at,
        }
    }

    pub fn includes(&self, user_id: Uuid) -> bool {
        self.participants.contains(&user_id)
    }

    pub fn is_between(&self, a: Uuid, b: Uuid) -> bool {
        self.includes(a) && self.includes(b)
    }

    /// The other participant, from `viewer`'s point of view.
    pub fn counterpart(&self, viewer: Uuid) -> Uuid {
        if self.participants[0] == viewer {
            self.participants[1]
        } else {
            self.participants[0]
        }
    }

    pub fn last_activity(&self) -> DateTime<Utc> {
        self.messages
            .last()
            .map(|m| m.sent_at)
            .unwrap_or(self.created_at)
    }

    pub fn unread_for(&self, user_id: Uuid) -> u32 {
        self.unread.get(&user_id).copied().unwrap_or(0)
    }

    /// Appends a message and bumps the recipient's unread counter.
    pub fn push(&mut self, sender_id: Uuid, content: String, sent_at: DateTime<Utc>) -> &Message {
        let recipient = self.counterpart(sender_id);
        *self.unread.entry(recipient).or_insert(0) += 1;
        self.messages.push(Message {
            id: Uuid::new_v4(),
            sender_id,
            content,
            sent_at,
        });
        // just pushed, never empty
        &self.messages[self.messages.len() - 1]
    }

    pub fn mark_read(&mut self, user_id: Uuid) {
        self.unread.insert(user_id, 0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_increments_recipient_unread_only() {
        let (a, b) = (Uuid::new_v4(), Uuid::new_v4());
        let mut conv = Conversation::new(a, b, Utc::now());
        conv.push(a, "hello".to_string(), Utc::now());
        conv.push(a, "still there?".to_string(), Utc::now());
        assert_eq!(conv.unread_for(b), 2);
        assert_eq!(conv.unread_for(a), 0);
    }

    #[test]
    fn test_mark_read_resets_counter() {
        let (a, b) = (Uuid::new_v4(), Uuid::new_v4());
        let mut conv = Conversation::new(a, b, Utc::now());
        conv.push(b, "hi".to_string(), Utc::now());
        conv.mark_read(a);
        assert_eq!(conv.unread_for(a), 0);
    }

    #[test]
    fn test_counterpart_is_symmetric() {
        let (a, b) = (Uuid::new_v4(), Uuid::new_v4());
        let conv = Conversation::new(a, b, Utc::now());
        assert_eq!(conv.counterpart(a), b);
        assert_eq!(conv.counterpart(b), a);
        assert!(conv.is_between(b, a));
    }

    #[test]
    fn test_last_activity_falls_back_to_creation() {
        let created = Utc::now();
        let conv = Conversation::new(Uuid::new_v4(), Uuid::new_v4(), created);
        assert_eq!(conv.last_activity(), created);
    }
}
