use actix_web::middleware::Logger;
use actix_web::{App, HttpResponse, HttpServer, Responder, get, web};
use dotenv::dotenv;
use env_logger::Env;
use log::info;
use serde_json::json;

use blog_api::database;
use blog_api::middleware::not_found::not_found;
use blog_api::post::post_service::PostService;
use blog_api::router::index::routes;
use blog_api::user::service::UserService;

#[get("/")]
async fn default() -> impl Responder {
    HttpResponse::Ok().json(json!({
        "message": "Blog API is running",
    }))
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Load environment variables from .env file
    dotenv().ok();

    // Initialize logger with environment variable support
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    let port: u16 = std::env::var("PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or(8000);

    let mongo_client = database::connect_to_mongo()
        .await
        .expect("Failed to connect to MongoDB");

    let post_service = web::Data::new(PostService::new(&mongo_client));
    let user_service = web::Data::new(UserService::new(&mongo_client));

    info!("Starting server on http://localhost:{}", port);

    HttpServer::new(move || {
        App::new()
            .wrap(Logger::default())
            .app_data(post_service.clone())
            .app_data(user_service.clone())
            .service(default)
            .service(web::scope("/api").configure(routes))
            .default_service(web::route().to(not_found))
    })
    .bind(("localhost", port))?
    .run()
    .await?;

    info!("Server has stopped");

    Ok(())
}
