use bcrypt::{DEFAULT_COST, hash, verify};

use crate::utils::error::CustomError;

pub fn hash_password(password: &str) -> Result<String, CustomError> {
    hash(password, DEFAULT_COST)
        .map_err(|e| CustomError::InternalServerError(format!("Failed to hash password: {}", e)))
}

pub fn verify_password(password: &str, hashed: &str) -> Result<bool, CustomError> {
    verify(password, hashed)
        .map_err(|e| CustomError::InternalServerError(format!("Failed to verify password: {}", e)))
}
