//! Conversation domain model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::message::Exchange;
use crate::document::DocumentPayload;

/// One consultation thread as last fetched from the server.
///
/// The server owns conversations; the client only ever holds snapshots and
/// appends to its local copy of `exchanges`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Conversation {
    /// Server-assigned id
    pub id: String,
    /// Short summary shown on history cards
    pub title: String,
    /// Exchanges in the order they happened
    pub exchanges: Vec<Exchange>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Conversation {
    /// The first document embedded in any exchange.
    pub fn document(&self) -> Option<&DocumentPayload> {
        self.exchanges.iter().find_map(|e| e.document.as_ref())
    }

    pub fn has_document(&self) -> bool {
        self.document().is_some()
    }

    /// The exchange that concludes the conversation, usually the latest reply.
    pub fn concluding_exchange(&self) -> Option<&Exchange> {
        self.exchanges.last()
    }
}

/// Orders conversations by creation time, newest first.
///
/// The sort is stable, so records created at the same instant keep the order
/// the server sent them in.
pub fn sort_newest_first(conversations: &mut [Conversation]) {
    conversations.sort_by(|a, b| b.created_at.cmp(&a.created_at));
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn conversation(id: &str, created_secs: i64) -> Conversation {
        let created_at = Utc.timestamp_opt(created_secs, 0).unwrap();
        Conversation {
            id: id.to_string(),
            title: format!("Conversation {id}"),
            exchanges: vec![],
            created_at,
            updated_at: created_at,
        }
    }

    #[test]
    fn test_sort_newest_first() {
        let mut list = vec![
            conversation("a", 100),
            conversation("b", 300),
            conversation("c", 200),
            conversation("d", 300),
        ];
        sort_newest_first(&mut list);

        let ids: Vec<&str> = list.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, vec!["b", "d", "c", "a"]);
        assert!(list.windows(2).all(|w| w[0].created_at >= w[1].created_at));
    }

    #[test]
    fn test_document_lookup() {
        let mut conv = conversation("x", 0);
        conv.exchanges.push(Exchange::user("I have a cough"));
        assert!(!conv.has_document());

        let mut reply = Exchange::assistant("Here is your prescription");
        reply.document = Some(DocumentPayload::from_bytes(b"pdf"));
        conv.exchanges.push(reply);

        assert!(conv.has_document());
        assert_eq!(conv.document().unwrap().decode().unwrap(), b"pdf");
        assert_eq!(
            conv.concluding_exchange().unwrap().body,
            "Here is your prescription"
        );
    }
}
