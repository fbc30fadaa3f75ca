//! Flat-file adapter for the user directory port.

use async_trait::async_trait;

use crate::domain::ports::UserDirectory;
use crate::domain::{Error, User};

use super::store::Collection;

const NOT_FOUND: &str = "Користувача не знайдено";

/// User directory backed by the flat-file store.
#[derive(Clone)]
pub struct FlatFileUserDirectory {
    users: Collection<User>,
}

impl FlatFileUserDirectory {
    /// Adapter over a bound users collection.
    pub fn new(users: Collection<User>) -> Self {
        Self { users }
    }
}

#[async_trait]
impl UserDirectory for FlatFileUserDirectory {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, Error> {
        let records = self.users.snapshot().await?;
        Ok(records.into_iter().find(|user| user.matches_email(email)))
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<User>, Error> {
        let records = self.users.snapshot().await?;
        Ok(records.into_iter().find(|user| user.id == id))
    }

    async fn bind_avatar(&self, user_id: i64, asset: &str) -> Result<User, Error> {
        let asset = asset.to_owned();
        self.users
            .mutate(move |mut records| {
                let Some(user) = records.iter_mut().find(|user| user.id == user_id) else {
                    return Err(Error::not_found(NOT_FOUND));
                };
                user.avatar = Some(asset);
                let updated = user.clone();
                Ok((records, updated))
            })
            .await
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use crate::domain::{Credential, Role};
    use crate::outbound::store::{FlatFileStore, StoreError, WriteCoordinator};
    use std::sync::Arc;

    fn directory(dir: &std::path::Path) -> FlatFileUserDirectory {
        FlatFileUserDirectory::new(Collection::new(
            Arc::new(FlatFileStore::new(dir)),
            Arc::new(WriteCoordinator::new()),
        ))
    }

    fn user(id: i64, email: &str) -> User {
        User {
            id,
            name: "Олена".to_owned(),
            email: email.to_owned(),
            credential: Credential::derive("pw", "salt"),
            role: Role::User,
            avatar: None,
        }
    }

    async fn seed(directory: &FlatFileUserDirectory, records: Vec<User>) {
        directory
            .users
            .mutate::<_, StoreError, _>(move |_| Ok((records, ())))
            .await
            .expect("seed succeeds");
    }

    #[tokio::test]
    async fn email_lookup_is_case_insensitive() {
        let dir = tempfile::tempdir().expect("temp dir");
        let directory = directory(dir.path());
        seed(&directory, vec![user(1, "Olena@Courses.ua")]).await;

        let found = directory
            .find_by_email("olena@courses.ua")
            .await
            .expect("lookup succeeds");
        assert_eq!(found.map(|user| user.id), Some(1));
    }

    #[tokio::test]
    async fn bind_avatar_updates_only_the_target_user() {
        let dir = tempfile::tempdir().expect("temp dir");
        let directory = directory(dir.path());
        seed(
            &directory,
            vec![user(1, "a@courses.ua"), user(2, "b@courses.ua")],
        )
        .await;

        let updated = directory
            .bind_avatar(1, "avatar-1-abc.png")
            .await
            .expect("bind succeeds");
        assert_eq!(updated.avatar.as_deref(), Some("avatar-1-abc.png"));

        let untouched = directory
            .find_by_id(2)
            .await
            .expect("lookup succeeds")
            .expect("user present");
        assert!(untouched.avatar.is_none());
    }

    #[tokio::test]
    async fn bind_avatar_for_unknown_user_is_not_found() {
        let dir = tempfile::tempdir().expect("temp dir");
        let directory = directory(dir.path());
        let err = directory
            .bind_avatar(99, "avatar-99-abc.png")
            .await
            .expect_err("unknown user");
        assert_eq!(err.code(), crate::domain::ErrorCode::NotFound);
    }
}
