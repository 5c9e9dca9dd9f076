use chrono::Utc;
use tracing::info;

use crate::db::collection::{self, Placement};
use crate::db::models::User;
use crate::db::store::{latency, Store};
use crate::domain::{UserRole, UserStatus};
use crate::errors::{FleetError, FleetResult};

#[derive(Debug, Clone)]
pub struct NewUser {
    pub email: String,
    pub name: String,
    pub role: UserRole,
    pub status: UserStatus,
}

pub async fn get_all(store: &Store) -> FleetResult<Vec<User>> {
    store.pause(latency::USER_READ).await;
    collection::load(store).await
}

pub async fn create(store: &Store, user: NewUser) -> FleetResult<User> {
    if user.name.trim().is_empty() {
        return Err(FleetError::validation("name", "is required"));
    }
    if !user.email.contains('@') {
        return Err(FleetError::validation("email", "must be an email address"));
    }
    store.pause(latency::USER_WRITE).await;
    collection::insert(store, Placement::Append, |id| User {
        id,
        email: user.email,
        name: user.name,
        role: user.role,
        created_at: Utc::now(),
        status: user.status,
    })
    .await
}

pub async fn update(store: &Store, id: &str, user: NewUser) -> FleetResult<Option<User>> {
    store.pause(latency::USER_WRITE).await;
    collection::modify(store, id, |current: &mut User| {
        current.email = user.email;
        current.name = user.name;
        current.role = user.role;
        current.status = user.status;
        Ok(())
    })
    .await
}

pub async fn update_status(
    store: &Store,
    id: &str,
    status: UserStatus,
) -> FleetResult<Option<User>> {
    store.pause(latency::USER_WRITE).await;
    let updated = collection::modify(store, id, |current: &mut User| {
        current.status = status;
        Ok(())
    })
    .await?;
    if updated.is_some() {
        info!(id, %status, "user status changed");
    }
    Ok(updated)
}

pub async fn delete(store: &Store, id: &str) -> FleetResult<bool> {
    store.pause(latency::USER_WRITE).await;
    collection::remove::<User>(store, id).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::queries::test_support::setup_test_store;

    #[tokio::test]
    async fn test_suspend_and_reactivate() -> Result<(), Box<dyn std::error::Error>> {
        let store = setup_test_store().await?;

        let suspended = update_status(&store, "u2", UserStatus::Suspended)
            .await?
            .ok_or("user missing")?;
        assert_eq!(suspended.status, UserStatus::Suspended);

        let active = update_status(&store, "u3", UserStatus::Active)
            .await?
            .ok_or("user missing")?;
        assert_eq!(active.status, UserStatus::Active);
        assert_eq!(active.role, UserRole::Admin);
        Ok(())
    }

    #[tokio::test]
    async fn test_create_validates_and_appends() -> Result<(), Box<dyn std::error::Error>> {
        let store = setup_test_store().await?;
        let draft = NewUser {
            email: "pilot@maritime.ir".into(),
            name: "Harbour Pilot".into(),
            role: UserRole::Client,
            status: UserStatus::Active,
        };

        let invalid = create(
            &store,
            NewUser {
                email: "nobody".into(),
                ..draft.clone()
            },
        )
        .await;
        assert!(matches!(
            invalid,
            Err(FleetError::Validation { field: "email", .. })
        ));

        let created = create(&store, draft).await?;
        let users = get_all(&store).await?;
        assert_eq!(users.len(), 4);
        assert_eq!(users[3].id, created.id);
        Ok(())
    }

    #[tokio::test]
    async fn test_update_and_delete() -> Result<(), Box<dyn std::error::Error>> {
        let store = setup_test_store().await?;

        let promoted = update(
            &store,
            "u2",
            NewUser {
                email: "client@maritime.ir".into(),
                name: "Reza Karimi".into(),
                role: UserRole::Admin,
                status: UserStatus::Active,
            },
        )
        .await?
        .ok_or("user missing")?;
        assert_eq!(promoted.role, UserRole::Admin);

        assert!(delete(&store, "u3").await?);
        assert!(!delete(&store, "u3").await?);
        Ok(())
    }
}
