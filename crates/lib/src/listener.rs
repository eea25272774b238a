//! Message listener: filter inbound message events, convert, post back.

use std::sync::Arc;

use async_trait::async_trait;

use crate::convert::convert_path;
use crate::slack::MessageEvent;

/// Outbound port for posting a text message into a channel. Errors are
/// stringified; the listener only logs them.
#[async_trait]
pub trait OutboundSender: Send + Sync {
    async fn post_message(&self, channel: &str, text: &str) -> Result<(), String>;
}

/// A user message that passed the inbound filter.
#[derive(Debug, Clone)]
pub struct InboundMessage {
    pub channel: String,
    pub user: String,
    pub text: String,
}

impl InboundMessage {
    /// Extract a convertible user message from a raw event. `None` for
    /// bot-authored events (anything carrying a `bot_id`, which also covers
    /// this bot's own posts) and for events missing user, text, or channel.
    pub fn from_event(event: &MessageEvent) -> Option<Self> {
        if event.bot_id.is_some() {
            return None;
        }
        let user = event.user.as_deref().filter(|s| !s.is_empty())?;
        let text = event.text.as_deref().filter(|s| !s.is_empty())?;
        let channel = event.channel.as_deref().filter(|s| !s.is_empty())?;
        Some(Self {
            channel: channel.to_string(),
            user: user.to_string(),
            text: text.to_string(),
        })
    }
}

/// Applies the path conversion to each inbound message and posts the result
/// back to the originating channel when it changed the text.
pub struct MessageListener {
    sender: Arc<dyn OutboundSender>,
}

impl MessageListener {
    pub fn new(sender: Arc<dyn OutboundSender>) -> Self {
        Self { sender }
    }

    /// Handle one message event end to end. Filtered events and unchanged
    /// texts produce nothing; a failed send is logged and dropped, never
    /// retried.
    pub async fn handle_event(&self, event: &MessageEvent) {
        let Some(msg) = InboundMessage::from_event(event) else {
            return;
        };
        log::debug!("inbound message from {} in {}", msg.user, msg.channel);
        let Some(converted) = convert_path(msg.text.trim()) else {
            return;
        };
        match self.sender.post_message(&msg.channel, &converted).await {
            Ok(()) => log::info!("posted converted text to {}", msg.channel),
            Err(e) => log::warn!("chat.postMessage failed: {}", e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    #[derive(Default)]
    struct RecordingSender {
        posts: Mutex<Vec<(String, String)>>,
        fail: bool,
    }

    #[async_trait]
    impl OutboundSender for RecordingSender {
        async fn post_message(&self, channel: &str, text: &str) -> Result<(), String> {
            if self.fail {
                return Err("boom".to_string());
            }
            self.posts
                .lock()
                .unwrap()
                .push((channel.to_string(), text.to_string()));
            Ok(())
        }
    }

    fn user_event(text: &str) -> MessageEvent {
        MessageEvent {
            channel: Some("C123".to_string()),
            user: Some("U1".to_string()),
            text: Some(text.to_string()),
            bot_id: None,
        }
    }

    #[tokio::test]
    async fn converted_text_is_posted_back_to_the_channel() {
        let sender = Arc::new(RecordingSender::default());
        let listener = MessageListener::new(sender.clone());
        listener
            .handle_event(&user_event("/Volumes/Projects/design/doc.txt"))
            .await;
        let posts = sender.posts.lock().unwrap();
        assert_eq!(posts.len(), 1);
        assert_eq!(posts[0].0, "C123");
        assert_eq!(posts[0].1, "Z:\\design\\doc.txt");
    }

    #[tokio::test]
    async fn unchanged_text_posts_nothing() {
        let sender = Arc::new(RecordingSender::default());
        let listener = MessageListener::new(sender.clone());
        listener.handle_event(&user_event("nothing to convert")).await;
        listener.handle_event(&user_event("   ")).await;
        assert!(sender.posts.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn surrounding_whitespace_is_trimmed_before_converting() {
        let sender = Arc::new(RecordingSender::default());
        let listener = MessageListener::new(sender.clone());
        listener.handle_event(&user_event("  Z:\\design\\doc.txt  ")).await;
        let posts = sender.posts.lock().unwrap();
        assert_eq!(posts.len(), 1);
        assert_eq!(posts[0].1, "/Volumes/Projects/design/doc.txt");
    }

    #[tokio::test]
    async fn bot_authored_events_are_ignored() {
        let sender = Arc::new(RecordingSender::default());
        let listener = MessageListener::new(sender.clone());
        let mut event = user_event("/Volumes/Projects/design/doc.txt");
        event.bot_id = Some("B999".to_string());
        listener.handle_event(&event).await;
        assert!(sender.posts.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn incomplete_events_are_ignored() {
        let sender = Arc::new(RecordingSender::default());
        let listener = MessageListener::new(sender.clone());

        let mut no_user = user_event("Z:\\a");
        no_user.user = None;
        listener.handle_event(&no_user).await;

        let mut no_text = user_event("Z:\\a");
        no_text.text = None;
        listener.handle_event(&no_text).await;

        let mut no_channel = user_event("Z:\\a");
        no_channel.channel = None;
        listener.handle_event(&no_channel).await;

        let mut empty_user = user_event("Z:\\a");
        empty_user.user = Some(String::new());
        listener.handle_event(&empty_user).await;

        assert!(sender.posts.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn send_failure_is_swallowed() {
        let sender = Arc::new(RecordingSender {
            fail: true,
            ..Default::default()
        });
        let listener = MessageListener::new(sender.clone());
        listener
            .handle_event(&user_event("/Volumes/Projects/design/doc.txt"))
            .await;
        assert!(sender.posts.lock().unwrap().is_empty());
    }
}
