use sea_orm::{QueryFilter, TransactionTrait, prelude::*};
use uuid::Uuid;

use crate::{EngineError, ResultEngine, User, users};

use super::{Engine, normalize_required_text, with_tx};

impl Engine {
    /// Registers a new account. The caller supplies an already hashed
    /// credential; emails are compared case-insensitively.
    pub async fn create_user(&self, email: &str, password_hash: &str) -> ResultEngine<User> {
        let email = normalize_required_text(email, "email")?.to_lowercase();
        if !email.contains('@') {
            return Err(EngineError::InvalidInput("invalid email".to_string()));
        }
        let password_hash = password_hash.to_string();

        with_tx!(self, |db_tx| {
            let existing = users::Entity::find()
                .filter(users::Column::Email.eq(email.clone()))
                .one(&db_tx)
                .await?;
            if existing.is_some() {
                return Err(EngineError::ExistingKey(email));
            }

            let user = User {
                id: Uuid::new_v4(),
                email,
                password_hash,
            };
            users::ActiveModel::from(&user).insert(&db_tx).await?;
            tracing::info!("registered user {}", user.id);
            Ok(user)
        })
    }

    /// Looks an account up by email, for credential verification.
    pub async fn user_by_email(&self, email: &str) -> ResultEngine<Option<User>> {
        let email = email.trim().to_lowercase();
        let model = users::Entity::find()
            .filter(users::Column::Email.eq(email))
            .one(&self.database)
            .await?;
        model.map(User::try_from).transpose()
    }

    /// Resolves a token subject back to an account.
    pub async fn user_by_id(&self, user_id: Uuid) -> ResultEngine<User> {
        let model = users::Entity::find_by_id(user_id.to_string())
            .one(&self.database)
            .await?
            .ok_or_else(|| EngineError::KeyNotFound("user not exists".to_string()))?;
        User::try_from(model)
    }
}
