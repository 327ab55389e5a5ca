//! Customer feedback
//!
//! Submitted from the storefront, reviewed in the admin panel. The only
//! mutation after creation is the read flag.

use menu_client::{Query, RemoteStore, Table, insert_as, select_as, update_as};
use serde::Serialize;
use shared::error::{AppError, AppResult, ErrorCode};
use shared::models::{Feedback, FeedbackCreate, FeedbackRatings};
use std::sync::Arc;
use validator::Validate;

#[derive(Serialize)]
struct NewFeedback<'a> {
    business_id: &'a str,
    author_name: &'a str,
    phone: Option<&'a str>,
    ratings: FeedbackRatings,
    comment: &'a str,
    is_read: bool,
    created_at: i64,
}

#[derive(Serialize)]
struct ReadPatch {
    is_read: bool,
}

#[derive(Clone)]
pub struct FeedbackService {
    store: Arc<dyn RemoteStore>,
}

impl FeedbackService {
    pub fn new(store: Arc<dyn RemoteStore>) -> Self {
        Self { store }
    }

    fn missing(err: AppError, id: &str) -> AppError {
        if err.code == ErrorCode::NotFound {
            AppError::new(ErrorCode::FeedbackNotFound).with_detail("id", id)
        } else {
            err
        }
    }

    /// Validate and store a new, unread feedback entry
    pub async fn submit(&self, business_id: &str, data: &FeedbackCreate) -> AppResult<Feedback> {
        data.validate()?;
        if !data.ratings.any_rated() {
            return Err(AppError::new(ErrorCode::FeedbackInvalidRating)
                .with_detail("reason", "no category rated"));
        }

        let body = NewFeedback {
            business_id,
            author_name: data.author_name.trim(),
            phone: data.phone.as_deref().filter(|p| !p.trim().is_empty()),
            ratings: data.ratings,
            comment: data.comment.trim(),
            is_read: false,
            created_at: shared::util::now_millis(),
        };
        let feedback: Feedback = insert_as(self.store.as_ref(), Table::Feedbacks, &body).await?;
        tracing::info!(
            id = %feedback.id,
            business_id = %business_id,
            rating = feedback.overall_rating(),
            "Feedback submitted"
        );
        Ok(feedback)
    }

    /// Newest first
    pub async fn list_for_business(&self, business_id: &str) -> AppResult<Vec<Feedback>> {
        let query = Query::new()
            .eq("business_id", business_id)
            .order_by_desc("created_at");
        Ok(select_as(self.store.as_ref(), Table::Feedbacks, &query).await?)
    }

    pub async fn unread_count(&self, business_id: &str) -> AppResult<usize> {
        let query = Query::new()
            .eq("business_id", business_id)
            .eq("is_read", false);
        Ok(self.store.select(Table::Feedbacks, &query).await?.len())
    }

    pub async fn set_read(&self, id: &str, is_read: bool) -> AppResult<Feedback> {
        update_as(self.store.as_ref(), Table::Feedbacks, id, &ReadPatch { is_read })
            .await
            .map_err(|e| Self::missing(e.into(), id))
    }

    /// Flip the read flag of a loaded entry
    pub async fn toggle_read(&self, feedback: &Feedback) -> AppResult<Feedback> {
        self.set_read(&feedback.id, !feedback.is_read).await
    }

    pub async fn delete(&self, id: &str) -> AppResult<()> {
        self.store
            .delete(Table::Feedbacks, id)
            .await
            .map_err(|e| Self::missing(e.into(), id))?;
        tracing::info!(id = %id, "Feedback deleted");
        Ok(())
    }

    /// Delete one by one; returns how many were removed
    pub async fn delete_many(&self, ids: &[String]) -> usize {
        let mut deleted = 0;
        for id in ids {
            match self.delete(id).await {
                Ok(()) => deleted += 1,
                Err(e) => tracing::error!(id = %id, error = %e, "Failed to delete feedback"),
            }
        }
        tracing::info!(deleted, total = ids.len(), "Bulk feedback delete finished");
        deleted
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use menu_client::MemoryTableClient;

    fn create(name: &str, ratings: FeedbackRatings) -> FeedbackCreate {
        FeedbackCreate {
            author_name: name.into(),
            phone: None,
            ratings,
            comment: "Çok lezzetliydi".into(),
        }
    }

    #[tokio::test]
    async fn test_submit_sets_defaults_and_derives_rating() {
        let client = MemoryTableClient::new();
        let service = FeedbackService::new(Arc::new(client.clone()));

        let feedback = service
            .submit("b1", &create("Ayşe", FeedbackRatings::new(4, 0, 5)))
            .await
            .unwrap();

        assert!(!feedback.is_read);
        assert!(feedback.created_at > 0);
        assert_eq!(feedback.overall_rating(), 5);
        let stored = client.row(Table::Feedbacks, &feedback.id).unwrap();
        assert!(stored.get("overall_rating").is_none());
    }

    #[tokio::test]
    async fn test_submit_rejects_unrated_and_invalid() {
        let service = FeedbackService::new(Arc::new(MemoryTableClient::new()));

        let err = service
            .submit("b1", &create("Ali", FeedbackRatings::default()))
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::FeedbackInvalidRating);

        let err = service
            .submit("b1", &create("", FeedbackRatings::new(3, 3, 3)))
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationFailed);
    }

    #[tokio::test]
    async fn test_submit_rejects_whitespace_author() {
        let client = MemoryTableClient::new();
        let service = FeedbackService::new(Arc::new(client.clone()));

        let err = service
            .submit("b1", &create("   ", FeedbackRatings::new(5, 5, 5)))
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationFailed);
        assert!(err.details.unwrap().contains_key("author_name"));
        assert!(client.rows(Table::Feedbacks).is_empty());

        let feedback = service
            .submit("b1", &create("  Ayşe ", FeedbackRatings::new(5, 5, 5)))
            .await
            .unwrap();
        assert_eq!(feedback.author_name, "Ayşe");
    }

    #[tokio::test]
    async fn test_read_flag_and_unread_count() {
        let service = FeedbackService::new(Arc::new(MemoryTableClient::new()));
        let first = service
            .submit("b1", &create("Ayşe", FeedbackRatings::new(5, 5, 5)))
            .await
            .unwrap();
        service
            .submit("b1", &create("Can", FeedbackRatings::new(2, 0, 0)))
            .await
            .unwrap();
        assert_eq!(service.unread_count("b1").await.unwrap(), 2);

        let read = service.toggle_read(&first).await.unwrap();
        assert!(read.is_read);
        assert_eq!(service.unread_count("b1").await.unwrap(), 1);

        let unread = service.toggle_read(&read).await.unwrap();
        assert!(!unread.is_read);
    }

    #[tokio::test]
    async fn test_delete_many_counts_successes() {
        let service = FeedbackService::new(Arc::new(MemoryTableClient::new()));
        let a = service
            .submit("b1", &create("A", FeedbackRatings::new(1, 1, 1)))
            .await
            .unwrap();
        let b = service
            .submit("b1", &create("B", FeedbackRatings::new(2, 2, 2)))
            .await
            .unwrap();

        let deleted = service
            .delete_many(&[a.id.clone(), "missing".into(), b.id.clone()])
            .await;
        assert_eq!(deleted, 2);
        assert!(service.list_for_business("b1").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_delete_missing_is_feedback_not_found() {
        let service = FeedbackService::new(Arc::new(MemoryTableClient::new()));
        let err = service.delete("nope").await.unwrap_err();
        assert_eq!(err.code, ErrorCode::FeedbackNotFound);
    }
}
