use crate::{
    database::Database,
    security::StoredCredentials,
    users::{User, UserId, UsersError},
};
use anyhow::Context;
use sqlx::{FromRow, query, query_as};
use uuid::Uuid;

#[derive(FromRow)]
struct RawUser {
    id: Uuid,
    username: String,
    security_key: String,
}

/// User together with the credentials they authenticate with.
pub struct StoredUser {
    pub user: User,
    pub credentials: StoredCredentials,
}

/// Extends the primary database with the users related methods.
impl Database {
    /// Retrieves user with the specified username.
    pub async fn get_user_by_username(&self, username: &str) -> anyhow::Result<Option<StoredUser>> {
        let raw_user = query_as::<_, RawUser>(
            r#"
SELECT id, username, security_key
FROM users
WHERE username = ?1
            "#,
        )
        .bind(username)
        .fetch_optional(&self.pool)
        .await?;

        Ok(raw_user.map(|raw_user| StoredUser {
            user: User {
                id: UserId::from(raw_user.id),
                username: raw_user.username,
            },
            credentials: StoredCredentials {
                security_key_hash: raw_user.security_key,
            },
        }))
    }

    /// Inserts user to the database, fails with `UsersError::UserExists` if the username is taken.
    pub async fn insert_user(
        &self,
        user: &User,
        credentials: &StoredCredentials,
    ) -> anyhow::Result<()> {
        let mut tx = self.pool.begin().await?;
        let result = query(
            r#"
INSERT INTO users (id, username, security_key)
VALUES (?1, ?2, ?3)
            "#,
        )
        .bind(*user.id)
        .bind(&user.username)
        .bind(&credentials.security_key_hash)
        .execute(&mut *tx)
        .await;

        match result {
            Ok(_) => {}
            Err(err)
                if err
                    .as_database_error()
                    .is_some_and(|err| err.is_unique_violation()) =>
            {
                return Err(UsersError::UserExists.into());
            }
            Err(err) => {
                return Err(err).with_context(|| format!("Failed to insert user ({}).", user.id));
            }
        }

        tx.commit().await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use crate::{
        security::StoredCredentials,
        tests::{mock_db, mock_user},
        users::UsersError,
    };

    #[tokio::test]
    async fn can_insert_and_retrieve_users() -> anyhow::Result<()> {
        let db = mock_db().await?;
        assert!(db.get_user_by_username("admin").await?.is_none());

        let user = mock_user("admin");
        let credentials = StoredCredentials {
            security_key_hash: "hash".to_string(),
        };
        db.insert_user(&user, &credentials).await?;

        let stored_user = db.get_user_by_username("admin").await?.unwrap();
        assert_eq!(stored_user.user, user);
        assert_eq!(stored_user.credentials.security_key_hash, "hash");

        assert!(db.get_user_by_username("Admin").await?.is_none());

        Ok(())
    }

    #[tokio::test]
    async fn fails_to_insert_duplicate_username() -> anyhow::Result<()> {
        let db = mock_db().await?;
        let credentials = StoredCredentials {
            security_key_hash: "hash".to_string(),
        };
        db.insert_user(&mock_user("admin"), &credentials).await?;

        let error = db
            .insert_user(&mock_user("admin"), &credentials)
            .await
            .unwrap_err();
        assert_eq!(
            error.downcast_ref::<UsersError>(),
            Some(&UsersError::UserExists)
        );

        Ok(())
    }
}
