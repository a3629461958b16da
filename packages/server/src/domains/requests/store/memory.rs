use anyhow::Result;
use async_trait::async_trait;
use chrono::Utc;
use std::collections::HashMap;
use tokio::sync::RwLock;

use super::{ParticipantScope, RequestStore};
use crate::common::RequestId;
use crate::domains::requests::models::{NewRequest, Request, RequestChanges, RequestStatus};

/// In-memory request store.
///
/// Data is lost on restart. Each method holds the map lock for its whole
/// read-modify-write, which gives the same per-request atomicity as the
/// Postgres store.
#[derive(Default)]
pub struct MemoryRequestStore {
    requests: RwLock<HashMap<RequestId, Request>>,
}

impl MemoryRequestStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl RequestStore for MemoryRequestStore {
    async fn create(&self, new: NewRequest) -> Result<Request> {
        let now = Utc::now();
        let request = Request {
            id: RequestId::new(),
            buyer: new.buyer,
            artisan: new.artisan,
            product: new.product,
            kind: new.kind,
            title: new.title,
            description: new.description,
            budget: new.budget,
            deadline: new.deadline,
            status: RequestStatus::Pending,
            attachments: new.attachments,
            messages: Vec::new(),
            quotation: None,
            created_at: now,
            updated_at: now,
        };
        self.requests
            .write()
            .await
            .insert(request.id, request.clone());
        Ok(request)
    }

    async fn find_by_id(&self, id: RequestId) -> Result<Option<Request>> {
        Ok(self.requests.read().await.get(&id).cloned())
    }

    async fn find_by_participant(&self, scope: ParticipantScope) -> Result<Vec<Request>> {
        let mut found: Vec<Request> = self
            .requests
            .read()
            .await
            .values()
            .filter(|r| scope.matches(r))
            .cloned()
            .collect();
        // V7 ids break ties between requests created in the same instant
        found.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
        Ok(found)
    }

    async fn update(&self, id: RequestId, changes: RequestChanges) -> Result<Option<Request>> {
        let mut requests = self.requests.write().await;
        let Some(request) = requests.get_mut(&id) else {
            return Ok(None);
        };
        if !changes.expectation_holds(request) {
            return Ok(None);
        }
        changes.apply_to(request, Utc::now());
        Ok(Some(request.clone()))
    }

    async fn delete(&self, id: RequestId) -> Result<bool> {
        Ok(self.requests.write().await.remove(&id).is_some())
    }

    async fn health_check(&self) -> Result<()> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::UserId;
    use crate::domains::requests::models::Message;

    fn new_request(buyer: UserId, artisan: UserId, title: &str) -> NewRequest {
        NewRequest::builder()
            .buyer(buyer)
            .artisan(artisan)
            .title(title)
            .description("details")
            .build()
    }

    #[tokio::test]
    async fn test_create_defaults() {
        let store = MemoryRequestStore::new();
        let created = store
            .create(new_request(UserId::new(), UserId::new(), "Mug"))
            .await
            .unwrap();

        assert_eq!(created.status, RequestStatus::Pending);
        assert!(created.messages.is_empty());
        assert!(created.quotation.is_none());
        assert_eq!(store.find_by_id(created.id).await.unwrap(), Some(created));
    }

    #[tokio::test]
    async fn test_find_by_participant_is_scoped_and_newest_first() {
        let store = MemoryRequestStore::new();
        let buyer = UserId::new();
        let artisan = UserId::new();
        let first = store.create(new_request(buyer, artisan, "first")).await.unwrap();
        let second = store.create(new_request(buyer, artisan, "second")).await.unwrap();
        store
            .create(new_request(UserId::new(), UserId::new(), "unrelated"))
            .await
            .unwrap();

        let mine = store
            .find_by_participant(ParticipantScope::Buyer(buyer))
            .await
            .unwrap();
        let ids: Vec<_> = mine.iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![second.id, first.id]);

        let all = store
            .find_by_participant(ParticipantScope::Everyone)
            .await
            .unwrap();
        assert_eq!(all.len(), 3);
    }

    #[tokio::test]
    async fn test_update_missing_request_is_none() {
        let store = MemoryRequestStore::new();
        let result = store
            .update(RequestId::new(), RequestChanges::default())
            .await
            .unwrap();
        assert!(result.is_none());
    }

    #[tokio::test]
    async fn test_update_appends_message() {
        let store = MemoryRequestStore::new();
        let buyer = UserId::new();
        let created = store.create(new_request(buyer, UserId::new(), "Rug")).await.unwrap();

        let updated = store
            .update(
                created.id,
                RequestChanges {
                    status: Some(RequestStatus::Cancelled),
                    append_message: Some(Message {
                        sender: buyer,
                        message: "never mind".to_string(),
                        timestamp: Utc::now(),
                    }),
                    ..Default::default()
                },
            )
            .await
            .unwrap()
            .unwrap();

        assert_eq!(updated.status, RequestStatus::Cancelled);
        assert_eq!(updated.messages.len(), 1);
        assert!(updated.updated_at >= created.updated_at);
    }

    #[tokio::test]
    async fn test_update_skipped_when_status_moved_on() {
        let store = MemoryRequestStore::new();
        let buyer = UserId::new();
        let created = store.create(new_request(buyer, UserId::new(), "Cup")).await.unwrap();

        let cancelled = store
            .update(
                created.id,
                RequestChanges {
                    status: Some(RequestStatus::Cancelled),
                    expected_status: Some(RequestStatus::Pending),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert!(cancelled.is_some());

        // A writer that still believes the request is pending loses
        let accepted = store
            .update(
                created.id,
                RequestChanges {
                    status: Some(RequestStatus::Accepted),
                    expected_status: Some(RequestStatus::Pending),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert!(accepted.is_none());

        let stored = store.find_by_id(created.id).await.unwrap().unwrap();
        assert_eq!(stored.status, RequestStatus::Cancelled);
    }

    #[tokio::test]
    async fn test_delete_reports_whether_removed() {
        let store = MemoryRequestStore::new();
        let created = store
            .create(new_request(UserId::new(), UserId::new(), "Bowl"))
            .await
            .unwrap();

        assert!(store.delete(created.id).await.unwrap());
        assert!(!store.delete(created.id).await.unwrap());
        assert!(store.find_by_id(created.id).await.unwrap().is_none());
    }
}
