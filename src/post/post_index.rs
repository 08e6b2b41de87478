use super::post_controller::{create_post, delete_post, get_post, get_posts, update_post};
use crate::middleware::auth::verify_token;
use actix_web::{guard, web};
use actix_web_httpauth::middleware::HttpAuthentication;

pub fn post_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/posts")
            // Mutations go through the auth middleware; reads stay public.
            .service(
                web::scope("")
                    .guard(
                        guard::Any(guard::Post())
                            .or(guard::Put())
                            .or(guard::Delete()),
                    )
                    .wrap(HttpAuthentication::with_fn(verify_token))
                    .route("", web::post().to(create_post))
                    .route("/{id}", web::put().to(update_post))
                    .route("/{id}", web::delete().to(delete_post)),
            )
            .route("", web::get().to(get_posts))
            .route("/{id}", web::get().to(get_post)),
    );
}
