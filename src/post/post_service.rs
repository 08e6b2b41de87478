use futures_util::TryStreamExt;
use mongodb::{
    Client, Collection,
    bson::{doc, oid::ObjectId},
};

use crate::database;
use crate::post::post_model::Post;
use crate::utils::error::CustomError;

pub struct PostService {
    collection: Collection<Post>,
}

impl PostService {
    pub fn new(client: &Client) -> Self {
        let collection = client
            .database(&database::db_name())
            .collection::<Post>("posts");
        PostService { collection }
    }

    pub async fn create_post(&self, post: Post) -> Result<Post, CustomError> {
        self.collection
            .insert_one(&post)
            .await
            .map_err(|e| CustomError::BadRequestError(e.to_string()))?;

        Ok(post)
    }

    /// Fetch one page of posts, optionally filtered by category.
    pub async fn list_posts(
        &self,
        category: Option<String>,
        page: u64,
        limit: i64,
    ) -> Result<Vec<Post>, CustomError> {
        let filter = match category {
            Some(category) => doc! { "category": category },
            None => doc! {},
        };

        let limit = limit.max(0);
        let skip = page.saturating_sub(1) * limit as u64;

        let cursor = self
            .collection
            .find(filter)
            .skip(skip)
            .limit(limit)
            .await
            .map_err(|e| CustomError::InternalServerError(e.to_string()))?;

        cursor
            .try_collect()
            .await
            .map_err(|e| CustomError::InternalServerError(e.to_string()))
    }

    pub async fn get_post(&self, id: &str) -> Result<Option<Post>, CustomError> {
        // An id that does not parse cannot name a stored post.
        let Ok(object_id) = ObjectId::parse_str(id) else {
            return Ok(None);
        };

        self.collection
            .find_one(doc! { "_id": object_id })
            .await
            .map_err(|e| CustomError::InternalServerError(e.to_string()))
    }

    /// Persist in-place edits to a post that was fetched with [`get_post`].
    pub async fn save_post(&self, post: Post) -> Result<Post, CustomError> {
        self.collection
            .replace_one(doc! { "_id": post.id }, &post)
            .await
            .map_err(|e| CustomError::BadRequestError(e.to_string()))?;

        Ok(post)
    }

    pub async fn delete_post(&self, id: &ObjectId) -> Result<bool, CustomError> {
        let result = self
            .collection
            .delete_one(doc! { "_id": *id })
            .await
            .map_err(|e| CustomError::InternalServerError(e.to_string()))?;

        Ok(result.deleted_count > 0)
    }
}
