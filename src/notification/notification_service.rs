use crate::error::{AppError, Result};
use super::{
    notification_dto::CreateNotificationRequest,
    notification_models::{NewNotification, Notification},
    notification_repository::NotificationRepository,
};
use uuid::Uuid;

#[derive(Clone)]
pub struct NotificationService {
    repo: NotificationRepository,
}

impl NotificationService {
    pub fn new(repo: NotificationRepository) -> Self {
        Self { repo }
    }

    pub async fn list(&self, user_id: Uuid) -> Result<Vec<Notification>> {
        self.repo.find_all_by_user(user_id).await
    }

    pub async fn create(
        &self,
        user_id: Uuid,
        payload: CreateNotificationRequest,
    ) -> Result<Notification> {
        let notification = NewNotification {
            user_id,
            kind: payload.kind,
            title: payload.title,
            body: payload.body,
            icon: payload.icon,
            target_route: payload.target_route,
        };

        self.repo.create(&notification).await
    }

    pub async fn mark_read(&self, user_id: Uuid, notification_id: Uuid) -> Result<Notification> {
        self.owned(user_id, notification_id).await?;

        self.repo
            .mark_as_read(notification_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Notification not found".to_string()))
    }

    pub async fn delete(&self, user_id: Uuid, notification_id: Uuid) -> Result<()> {
        self.owned(user_id, notification_id).await?;

        if self.repo.delete(notification_id).await? == 0 {
            return Err(AppError::NotFound("Notification not found".to_string()));
        }

        Ok(())
    }

    pub async fn clear(&self, user_id: Uuid) -> Result<u64> {
        let deleted = self.repo.delete_all_for_user(user_id).await?;
        tracing::info!(%user_id, deleted, "cleared notifications");
        Ok(deleted)
    }

    async fn owned(&self, user_id: Uuid, notification_id: Uuid) -> Result<Notification> {
        let notification = self.repo.find_by_id(notification_id).await?;
        ensure_owner(notification, user_id)
    }
}

/// Absent notifications are 404; somebody else's are 403.
fn ensure_owner(notification: Option<Notification>, user_id: Uuid) -> Result<Notification> {
    let notification =
        notification.ok_or_else(|| AppError::NotFound("Notification not found".to_string()))?;

    if notification.user_id != user_id {
        return Err(AppError::Forbidden("Permission denied".to_string()));
    }

    Ok(notification)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn notification_for(user_id: Uuid) -> Notification {
        Notification {
            id: Uuid::new_v4(),
            user_id,
            kind: "info".to_string(),
            title: "Hello".to_string(),
            body: "World".to_string(),
            icon: None,
            target_route: None,
            is_read: false,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_missing_notification_is_not_found() {
        assert!(matches!(
            ensure_owner(None, Uuid::new_v4()),
            Err(AppError::NotFound(_))
        ));
    }

    #[test]
    fn test_foreign_notification_is_forbidden() {
        let notification = notification_for(Uuid::new_v4());
        assert!(matches!(
            ensure_owner(Some(notification), Uuid::new_v4()),
            Err(AppError::Forbidden(_))
        ));
    }

    #[test]
    fn test_own_notification_passes() {
        let owner = Uuid::new_v4();
        let notification = notification_for(owner);
        let id = notification.id;

        assert_eq!(ensure_owner(Some(notification), owner).unwrap().id, id);
    }
}
