use crate::{
    database::Database,
    users::{
        UserId,
        secrets::{Secret, SecretUpdate, SecretsError},
    },
};
use anyhow::{Context, anyhow};
use keeper_types::SecretKind;
use sqlx::{FromRow, QueryBuilder, Sqlite, query, query_as};
use uuid::Uuid;

#[derive(FromRow)]
struct RawSecret {
    id: Uuid,
    owner_id: Uuid,
    name: String,
    kind: i32,
    metadata: Vec<u8>,
    #[sqlx(default)]
    data: Option<Vec<u8>>,
}

impl TryFrom<RawSecret> for Secret {
    type Error = anyhow::Error;

    fn try_from(raw: RawSecret) -> Result<Self, Self::Error> {
        Ok(Secret {
            id: raw.id,
            owner: raw.owner_id.into(),
            name: raw.name,
            kind: SecretKind::try_from(raw.kind)
                .map_err(|kind| anyhow!("Secret ({}) has unknown kind {kind}.", raw.id))?,
            metadata: raw.metadata,
            data: raw.data,
        })
    }
}

fn is_unique_violation(err: &sqlx::Error) -> bool {
    err.as_database_error()
        .is_some_and(|err| err.is_unique_violation())
}

/// Builds the conditional update statement, columns always follow the (name, metadata, data)
/// order regardless of the mask order.
fn update_secret_query(
    owner: UserId,
    id: Uuid,
    update: &SecretUpdate,
) -> QueryBuilder<'static, Sqlite> {
    let mut builder = QueryBuilder::<Sqlite>::new("UPDATE secrets SET ");
    let mut columns = builder.separated(", ");
    if let Some(name) = &update.name {
        columns.push("name = ").push_bind_unseparated(name.clone());
    }
    if let Some(metadata) = &update.metadata {
        columns
            .push("metadata = ")
            .push_bind_unseparated(metadata.clone());
    }
    if let Some(data) = &update.data {
        columns.push("data = ").push_bind_unseparated(data.clone());
    }

    builder
        .push(" WHERE id = ")
        .push_bind(id)
        .push(" AND owner_id = ")
        .push_bind(*owner);
    builder
}

/// Extends the primary database with the user secrets CRUD methods.
impl Database {
    /// Lists all secrets of the owner, without their data.
    pub async fn get_secrets(&self, owner: UserId) -> anyhow::Result<Vec<Secret>> {
        let raw_secrets = query_as::<_, RawSecret>(
            r#"
SELECT id, owner_id, name, kind, metadata
FROM secrets
WHERE owner_id = ?1
ORDER BY name ASC
            "#,
        )
        .bind(*owner)
        .fetch_all(&self.pool)
        .await?;

        raw_secrets.into_iter().map(Secret::try_from).collect()
    }

    /// Retrieves a single secret of the owner, including its data.
    pub async fn get_secret(&self, owner: UserId, id: Uuid) -> anyhow::Result<Secret> {
        query_as::<_, RawSecret>(
            r#"
SELECT id, owner_id, name, kind, metadata, data
FROM secrets
WHERE id = ?1 AND owner_id = ?2
            "#,
        )
        .bind(id)
        .bind(*owner)
        .fetch_optional(&self.pool)
        .await?
        .ok_or(SecretsError::NotFound)?
        .try_into()
    }

    /// Inserts a new secret, fails with `SecretsError::Exists` if the owner already has a secret
    /// with the same name.
    pub async fn insert_secret(&self, secret: &Secret) -> anyhow::Result<()> {
        let mut tx = self.pool.begin().await?;
        query(
            r#"
INSERT INTO secrets (id, owner_id, name, kind, metadata, data)
VALUES (?1, ?2, ?3, ?4, ?5, ?6)
            "#,
        )
        .bind(secret.id)
        .bind(*secret.owner)
        .bind(&secret.name)
        .bind(i32::from(secret.kind))
        .bind(&secret.metadata)
        .bind(secret.data.as_deref().unwrap_or_default())
        .execute(&mut *tx)
        .await
        .map_err(|err| {
            if is_unique_violation(&err) {
                anyhow!(SecretsError::Exists)
            } else {
                anyhow!(err).context(format!("Failed to insert secret ({}).", secret.id))
            }
        })?;

        tx.commit().await?;
        Ok(())
    }

    /// Applies the partial update to the secret of the owner.
    pub async fn update_secret(
        &self,
        owner: UserId,
        id: Uuid,
        update: &SecretUpdate,
    ) -> anyhow::Result<()> {
        if update.is_empty() {
            return Err(SecretsError::NoValuesToUpdate.into());
        }

        let mut tx = self.pool.begin().await?;
        let result = update_secret_query(owner, id, update)
            .build()
            .execute(&mut *tx)
            .await
            .map_err(|err| {
                if is_unique_violation(&err) {
                    anyhow!(SecretsError::NameConflict)
                } else {
                    anyhow!(err).context(format!("Failed to update secret ({id})."))
                }
            })?;

        if result.rows_affected() == 0 {
            return Err(SecretsError::NotFound.into());
        }

        tx.commit().await?;
        Ok(())
    }

    /// Removes the secret of the owner.
    pub async fn remove_secret(&self, owner: UserId, id: Uuid) -> anyhow::Result<()> {
        let mut tx = self.pool.begin().await?;
        let result = query(
            r#"
DELETE FROM secrets
WHERE id = ?1 AND owner_id = ?2
            "#,
        )
        .bind(id)
        .bind(*owner)
        .execute(&mut *tx)
        .await
        .with_context(|| format!("Failed to remove secret ({id})."))?;

        if result.rows_affected() == 0 {
            return Err(SecretsError::NotFound.into());
        }

        tx.commit().await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::update_secret_query;
    use crate::{
        database::Database,
        tests::{mock_db, mock_secret, mock_user},
        users::{
            User,
            secrets::{SecretUpdate, SecretsError},
        },
    };
    use uuid::Uuid;

    async fn db_with_user(username: &str) -> anyhow::Result<(Database, User)> {
        let db = mock_db().await?;
        let user = mock_user(username);
        db.insert_user(&user, &crate::tests::mock_credentials())
            .await?;
        Ok((db, user))
    }

    fn secrets_error(err: anyhow::Error) -> Option<SecretsError> {
        err.downcast_ref::<SecretsError>().copied()
    }

    #[test]
    fn builds_update_query_in_stable_order() {
        let owner = mock_user("admin").id;
        let update = SecretUpdate {
            name: Some("name".to_string()),
            metadata: None,
            data: Some(vec![1]),
        };
        assert_eq!(
            update_secret_query(owner, Uuid::nil(), &update).sql(),
            "UPDATE secrets SET name = ?, data = ? WHERE id = ? AND owner_id = ?"
        );

        let update = SecretUpdate {
            name: Some("name".to_string()),
            metadata: Some(vec![]),
            data: Some(vec![1]),
        };
        assert_eq!(
            update_secret_query(owner, Uuid::nil(), &update).sql(),
            "UPDATE secrets SET name = ?, metadata = ?, data = ? WHERE id = ? AND owner_id = ?"
        );
    }

    #[tokio::test]
    async fn can_insert_and_retrieve_secrets() -> anyhow::Result<()> {
        let (db, user) = db_with_user("admin").await?;
        assert!(db.get_secrets(user.id).await?.is_empty());

        let secret_one = mock_secret(user.id, "one");
        let secret_two = mock_secret(user.id, "two");
        db.insert_secret(&secret_two).await?;
        db.insert_secret(&secret_one).await?;

        assert_eq!(db.get_secret(user.id, secret_one.id).await?, secret_one);

        let secrets = db.get_secrets(user.id).await?;
        assert_eq!(secrets.len(), 2);
        assert_eq!(secrets[0].name, "one");
        assert_eq!(secrets[1].name, "two");
        assert!(secrets.iter().all(|secret| secret.data.is_none()));
        assert_eq!(secrets[0].metadata, secret_one.metadata);

        Ok(())
    }

    #[tokio::test]
    async fn fails_to_insert_secret_with_duplicate_name() -> anyhow::Result<()> {
        let (db, user) = db_with_user("admin").await?;
        db.insert_secret(&mock_secret(user.id, "one")).await?;

        let error = db
            .insert_secret(&mock_secret(user.id, "one"))
            .await
            .unwrap_err();
        assert_eq!(secrets_error(error), Some(SecretsError::Exists));

        let other = mock_user("other");
        db.insert_user(&other, &crate::tests::mock_credentials())
            .await?;
        db.insert_secret(&mock_secret(other.id, "one")).await?;

        Ok(())
    }

    #[tokio::test]
    async fn hides_secrets_of_other_owners() -> anyhow::Result<()> {
        let (db, user) = db_with_user("admin").await?;
        let other = mock_user("other");
        db.insert_user(&other, &crate::tests::mock_credentials())
            .await?;

        let secret = mock_secret(user.id, "one");
        db.insert_secret(&secret).await?;

        assert!(db.get_secrets(other.id).await?.is_empty());
        assert_eq!(
            secrets_error(db.get_secret(other.id, secret.id).await.unwrap_err()),
            Some(SecretsError::NotFound)
        );
        assert_eq!(
            secrets_error(
                db.update_secret(
                    other.id,
                    secret.id,
                    &SecretUpdate {
                        name: Some("hijacked".to_string()),
                        ..Default::default()
                    }
                )
                .await
                .unwrap_err()
            ),
            Some(SecretsError::NotFound)
        );
        assert_eq!(
            secrets_error(db.remove_secret(other.id, secret.id).await.unwrap_err()),
            Some(SecretsError::NotFound)
        );

        assert_eq!(db.get_secret(user.id, secret.id).await?, secret);

        Ok(())
    }

    #[tokio::test]
    async fn can_update_secrets_partially() -> anyhow::Result<()> {
        let (db, user) = db_with_user("admin").await?;
        let secret = mock_secret(user.id, "one");
        db.insert_secret(&secret).await?;

        db.update_secret(
            user.id,
            secret.id,
            &SecretUpdate {
                data: Some(b"new-data".to_vec()),
                ..Default::default()
            },
        )
        .await?;
        let updated = db.get_secret(user.id, secret.id).await?;
        assert_eq!(updated.name, secret.name);
        assert_eq!(updated.metadata, secret.metadata);
        assert_eq!(updated.kind, secret.kind);
        assert_eq!(updated.data, Some(b"new-data".to_vec()));

        db.update_secret(
            user.id,
            secret.id,
            &SecretUpdate {
                name: Some("renamed".to_string()),
                metadata: Some(vec![]),
                data: None,
            },
        )
        .await?;
        let updated = db.get_secret(user.id, secret.id).await?;
        assert_eq!(updated.name, "renamed");
        assert!(updated.metadata.is_empty());
        assert_eq!(updated.data, Some(b"new-data".to_vec()));

        Ok(())
    }

    #[tokio::test]
    async fn distinguishes_update_conflicts() -> anyhow::Result<()> {
        let (db, user) = db_with_user("admin").await?;
        let secret_one = mock_secret(user.id, "one");
        db.insert_secret(&secret_one).await?;
        db.insert_secret(&mock_secret(user.id, "two")).await?;

        let rename = SecretUpdate {
            name: Some("two".to_string()),
            ..Default::default()
        };
        assert_eq!(
            secrets_error(
                db.update_secret(user.id, secret_one.id, &rename)
                    .await
                    .unwrap_err()
            ),
            Some(SecretsError::NameConflict)
        );
        assert_eq!(
            secrets_error(
                db.update_secret(user.id, Uuid::new_v4(), &rename)
                    .await
                    .unwrap_err()
            ),
            Some(SecretsError::NotFound)
        );
        assert_eq!(
            secrets_error(
                db.update_secret(user.id, secret_one.id, &SecretUpdate::default())
                    .await
                    .unwrap_err()
            ),
            Some(SecretsError::NoValuesToUpdate)
        );

        assert_eq!(db.get_secret(user.id, secret_one.id).await?.name, "one");

        Ok(())
    }

    #[tokio::test]
    async fn can_remove_secrets() -> anyhow::Result<()> {
        let (db, user) = db_with_user("admin").await?;
        let secret = mock_secret(user.id, "one");
        db.insert_secret(&secret).await?;

        db.remove_secret(user.id, secret.id).await?;
        assert_eq!(
            secrets_error(db.get_secret(user.id, secret.id).await.unwrap_err()),
            Some(SecretsError::NotFound)
        );
        assert_eq!(
            secrets_error(db.remove_secret(user.id, secret.id).await.unwrap_err()),
            Some(SecretsError::NotFound)
        );

        Ok(())
    }
}
