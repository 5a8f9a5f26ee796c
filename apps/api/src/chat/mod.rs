//! Two-party conversations with per-participant unread counts.

pub mod handlers;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::chat::{Conversation, Message};
use crate::models::user::Role;
use crate::store::MarketplaceStore;

pub const MAX_MESSAGE_CHARS: usize = 2000;
const PREVIEW_CHARS: usize = 80;

#[derive(Debug, Clone, Serialize)]
pub struct ConversationSummary {
    pub id: Uuid,
    pub counterpart_id: Uuid,
    pub counterpart_name: String,
    pub counterpart_role: Role,
    pub last_message: Option<String>,
    pub last_activity: DateTime<Utc>,
    pub unread_count: u32,
}

#[derive(Debug, Clone, Serialize)]
pub struct MessageView {
    pub id: Uuid,
    pub sender_id: Uuid,
    pub content: String,
    pub sent_at: DateTime<Utc>,
    pub is_own: bool,
}

impl MessageView {
    fn render(message: &Message, viewer: Uuid) -> Self {
        Self {
            id: message.id,
            sender_id: message.sender_id,
            content: message.content.clone(),
            sent_at: message.sent_at,
            is_own: message.sender_id == viewer,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct OpenConversationForm {
    pub participant_id: Uuid,
}

#[derive(Debug, Deserialize)]
pub struct SendMessageForm {
    pub content: String,
}

fn preview(content: &str) -> String {
    if content.chars().count() <= PREVIEW_CHARS {
        return content.to_string();
    }
    let mut cut: String = content.chars().take(PREVIEW_CHARS).collect();
    cut.push('…');
    cut
}

fn summarize(store: &MarketplaceStore, conversation: &Conversation, viewer: Uuid) -> Option<ConversationSummary> {
    let counterpart_id = conversation.counterpart(viewer);
    let (counterpart_name, counterpart_role) = store.identity(counterpart_id)?;
    Some(ConversationSummary {
        id: conversation.id,
        counterpart_id,
        counterpart_name,
        counterpart_role,
        last_message: conversation.messages.last().map(|m| preview(&m.content)),
        last_activity: conversation.last_activity(),
        unread_count: conversation.unread_for(viewer),
    })
}

/// The viewer's conversations, most recently active first. `search` matches
/// the counterpart's display name, ignoring case.
pub fn summaries(store: &MarketplaceStore, viewer: Uuid, search: Option<&str>) -> Vec<ConversationSummary> {
    let needle = search
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_lowercase);

    let mut found: Vec<ConversationSummary> = store
        .conversations
        .iter()
        .filter(|c| c.includes(viewer))
        .filter_map(|c| summarize(store, c, viewer))
        .filter(|s| {
            needle
                .as_deref()
                .map_or(true, |n| s.counterpart_name.to_lowercase().contains(n))
        })
        .collect();
    found.sort_by(|a, b| b.last_activity.cmp(&a.last_activity));
    found
}

/// Returns the existing conversation between the pair, or starts one.
pub fn open_conversation(
    store: &mut MarketplaceStore,
    viewer: Uuid,
    other: Uuid,
    now: DateTime<Utc>,
) -> Result<ConversationSummary, AppError> {
    if viewer == other {
        return Err(AppError::Validation(
            "You cannot start a conversation with yourself".to_string(),
        ));
    }
    if store.identity(other).is_none() {
        return Err(AppError::NotFound(format!("User {other} not found")));
    }

    let index = match store.conversations.iter().position(|c| c.is_between(viewer, other)) {
        Some(index) => index,
        None => {
            let conversation = Conversation::new(viewer, other, now);
            info!("Conversation {} opened between {viewer} and {other}", conversation.id);
            store.conversations.push(conversation);
            store.conversations.len() - 1
        }
    };

    summarize(store, &store.conversations[index], viewer)
        .ok_or_else(|| AppError::NotFound(format!("User {other} not found")))
}

fn participant_conversation(
    store: &mut MarketplaceStore,
    conversation_id: Uuid,
    viewer: Uuid,
) -> Result<&mut Conversation, AppError> {
    let conversation = store
        .conversations
        .iter_mut()
        .find(|c| c.id == conversation_id)
        .ok_or_else(|| AppError::NotFound(format!("Conversation {conversation_id} not found")))?;
    if !conversation.includes(viewer) {
        return Err(AppError::Forbidden(
            "You are not part of this conversation".to_string(),
        ));
    }
    Ok(conversation)
}

/// Messages oldest first. Zeroes the viewer's unread count.
pub fn read_thread(
    store: &mut MarketplaceStore,
    conversation_id: Uuid,
    viewer: Uuid,
) -> Result<Vec<MessageView>, AppError> {
    let conversation = participant_conversation(store, conversation_id, viewer)?;
    conversation.mark_read(viewer);
    Ok(conversation
        .messages
        .iter()
        .map(|m| MessageView::render(m, viewer))
        .collect())
}

pub fn send_message(
    store: &mut MarketplaceStore,
    conversation_id: Uuid,
    sender: Uuid,
    content: &str,
    now: DateTime<Utc>,
) -> Result<MessageView, AppError> {
    let content = content.trim();
    if content.is_empty() {
        return Err(AppError::Validation("Message cannot be empty".to_string()));
    }
    if content.chars().count() > MAX_MESSAGE_CHARS {
        return Err(AppError::Validation(format!(
            "Message must be at most {MAX_MESSAGE_CHARS} characters"
        )));
    }

    let conversation = participant_conversation(store, conversation_id, sender)?;
    let message = conversation.push(sender, content.to_string(), now);
    Ok(MessageView::render(message, sender))
}
