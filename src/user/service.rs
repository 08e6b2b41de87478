use chrono::Utc;
use mongodb::bson::{doc, oid::ObjectId};
use mongodb::{Client, Collection};

use crate::database;
use crate::user::model::User;
use crate::utils::error::CustomError;
use crate::utils::{hashing, password_validation};

pub struct UserService {
    collection: Collection<User>,
}

impl UserService {
    pub fn new(client: &Client) -> Self {
        let collection = client
            .database(&database::db_name())
            .collection::<User>("users");
        UserService { collection }
    }

    async fn email_exists(&self, email: &str) -> Result<bool, CustomError> {
        let existing = self
            .collection
            .find_one(doc! { "email": email })
            .await
            .map_err(|e| CustomError::InternalServerError(e.to_string()))?;
        Ok(existing.is_some())
    }

    async fn username_exists(&self, username: &str) -> Result<bool, CustomError> {
        let existing = self
            .collection
            .find_one(doc! { "username": username })
            .await
            .map_err(|e| CustomError::InternalServerError(e.to_string()))?;
        Ok(existing.is_some())
    }

    pub async fn create_user(
        &self,
        username: String,
        email: String,
        password: String,
    ) -> Result<User, CustomError> {
        if self.email_exists(&email).await? {
            return Err(CustomError::ConflictError(
                "Email already exists".to_string(),
            ));
        }

        if self.username_exists(&username).await? {
            return Err(CustomError::ConflictError(
                "Username already exists".to_string(),
            ));
        }

        password_validation::validate_password(&password)?;

        let hashed_password = hashing::hash_password(&password)?;

        let mut user = User {
            id: None,
            username,
            email,
            password: hashed_password,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };

        let result = self
            .collection
            .insert_one(&user)
            .await
            .map_err(|e| CustomError::BadRequestError(e.to_string()))?;

        user.id = result.inserted_id.as_object_id();
        Ok(user)
    }

    /// Look up a user by email and check the password against the stored
    /// bcrypt hash. Both failure modes collapse into the same message.
    pub async fn verify_credentials(
        &self,
        email: &str,
        password: &str,
    ) -> Result<User, CustomError> {
        let user = self
            .collection
            .find_one(doc! { "email": email })
            .await
            .map_err(|e| CustomError::InternalServerError(e.to_string()))?
            .ok_or_else(|| {
                CustomError::UnauthorizedError("Invalid email or password".to_string())
            })?;

        if !hashing::verify_password(password, &user.password)? {
            return Err(CustomError::UnauthorizedError(
                "Invalid email or password".to_string(),
            ));
        }

        Ok(user)
    }

    pub async fn find_user_by_id(&self, id: &ObjectId) -> Result<Option<User>, CustomError> {
        self.collection
            .find_one(doc! { "_id": *id })
            .await
            .map_err(|e| CustomError::InternalServerError(e.to_string()))
    }
}
