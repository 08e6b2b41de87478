use actix_web::{HttpRequest, HttpResponse, web};
use mongodb::bson::oid::ObjectId;
use serde_json::json;

use crate::middleware::auth::{AuthenticatedUser, authenticated_user};
use crate::post::post_model::{CreatePostRequest, Post, PostListQuery, UpdatePostRequest};
use crate::post::post_service::PostService;
use crate::utils::error::CustomError;
use crate::utils::helpers::slugify;

/// Ownership gate for mutations: only the original author passes.
fn ensure_author(post: &Post, user: &AuthenticatedUser, action: &str) -> Result<(), CustomError> {
    if post.author != user.id {
        return Err(CustomError::ForbiddenError(format!(
            "User not authorized to {} this post",
            action
        )));
    }
    Ok(())
}

fn apply_updates(post: &mut Post, updates: UpdatePostRequest) {
    if let Some(title) = updates.title {
        post.slug = slugify(&title);
        post.title = title;
    }
    if let Some(content) = updates.content {
        post.content = content;
    }
    post.updated_at = chrono::Utc::now();
}

pub async fn create_post(
    post_service: web::Data<PostService>,
    body: web::Json<CreatePostRequest>,
    req: HttpRequest,
) -> Result<HttpResponse, CustomError> {
    let user = authenticated_user(&req)?;
    let body = body.into_inner();

    let new_post = Post {
        id: ObjectId::new(),
        slug: slugify(&body.title),
        title: body.title,
        content: body.content,
        category: body.category,
        author: user.id,
        created_at: chrono::Utc::now(),
        updated_at: chrono::Utc::now(),
    };

    let post = post_service.create_post(new_post).await?;

    Ok(HttpResponse::Created().json(post))
}

pub async fn get_posts(
    post_service: web::Data<PostService>,
    query: web::Query<PostListQuery>,
) -> Result<HttpResponse, CustomError> {
    let query = query.into_inner();
    let page = query.page.unwrap_or(1);
    let limit = query.limit.unwrap_or(10);

    let posts = post_service.list_posts(query.category, page, limit).await?;

    Ok(HttpResponse::Ok().json(posts))
}

pub async fn get_post(
    post_id: web::Path<String>,
    post_service: web::Data<PostService>,
) -> Result<HttpResponse, CustomError> {
    let post = post_service
        .get_post(&post_id.into_inner())
        .await?
        .ok_or_else(|| CustomError::NotFoundError("Post not found".to_string()))?;

    Ok(HttpResponse::Ok().json(post))
}

pub async fn update_post(
    post_id: web::Path<String>,
    post_service: web::Data<PostService>,
    body: web::Json<UpdatePostRequest>,
    req: HttpRequest,
) -> Result<HttpResponse, CustomError> {
    let user = authenticated_user(&req)?;

    let mut post = post_service
        .get_post(&post_id.into_inner())
        .await?
        .ok_or_else(|| CustomError::NotFoundError("Post not found".to_string()))?;

    ensure_author(&post, &user, "update")?;

    apply_updates(&mut post, body.into_inner());

    let post = post_service.save_post(post).await?;

    Ok(HttpResponse::Ok().json(post))
}

pub async fn delete_post(
    post_id: web::Path<String>,
    post_service: web::Data<PostService>,
    req: HttpRequest,
) -> Result<HttpResponse, CustomError> {
    let user = authenticated_user(&req)?;

    let post = post_service
        .get_post(&post_id.into_inner())
        .await?
        .ok_or_else(|| CustomError::NotFoundError("Post not found".to_string()))?;

    ensure_author(&post, &user, "delete")?;

    let deleted = post_service.delete_post(&post.id).await?;
    if !deleted {
        return Err(CustomError::NotFoundError("Post not found".to_string()));
    }

    Ok(HttpResponse::Ok().json(json!({ "message": "Post removed" })))
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::{ResponseError, http::StatusCode};
    use chrono::Utc;

    fn sample_post(author: ObjectId) -> Post {
        Post {
            id: ObjectId::new(),
            title: "Test Post".to_string(),
            content: "This is a test post".to_string(),
            category: "general".to_string(),
            author,
            slug: "test-post".to_string(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn user_with_id(id: ObjectId) -> AuthenticatedUser {
        AuthenticatedUser {
            id,
            username: "author".to_string(),
            email: "author@example.com".to_string(),
        }
    }

    #[test]
    fn author_may_mutate_their_own_post() {
        let author = ObjectId::new();
        let post = sample_post(author);
        assert!(ensure_author(&post, &user_with_id(author), "update").is_ok());
    }

    #[test]
    fn non_author_is_forbidden() {
        let post = sample_post(ObjectId::new());
        let err = ensure_author(&post, &user_with_id(ObjectId::new()), "delete").unwrap_err();
        assert_eq!(err.status_code(), StatusCode::FORBIDDEN);
        assert_eq!(err.to_string(), "User not authorized to delete this post");
    }

    #[test]
    fn title_change_recomputes_the_slug() {
        let mut post = sample_post(ObjectId::new());
        apply_updates(
            &mut post,
            UpdatePostRequest {
                title: Some("Brand New Title".to_string()),
                content: None,
            },
        );
        assert_eq!(post.title, "Brand New Title");
        assert_eq!(post.slug, "brand-new-title");
        assert_eq!(post.content, "This is a test post");
    }

    #[test]
    fn content_only_update_keeps_the_slug() {
        let mut post = sample_post(ObjectId::new());
        apply_updates(
            &mut post,
            UpdatePostRequest {
                title: None,
                content: Some("Fresh content".to_string()),
            },
        );
        assert_eq!(post.slug, "test-post");
        assert_eq!(post.content, "Fresh content");
    }
}
