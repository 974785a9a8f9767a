// flora_admin/src/web/routes.rs

use actix_web::{guard, web};

use crate::config::AppConfig;
use crate::web::handlers::{product_handlers, upload_handlers};

async fn health_check_handler() -> actix_web::HttpResponse {
  actix_web::HttpResponse::Ok().json(serde_json::json!({ "status": "ok" }))
}

// Called from `main.rs` (and the handler tests) to configure services for the Actix App.
pub fn configure_app_routes(cfg: &mut web::ServiceConfig, config: &AppConfig) {
  cfg
    .service(
      web::scope("/api/v1")
        .route("/health", web::get().to(health_check_handler))
        .service(
          web::scope("/products")
            .route("", web::get().to(product_handlers::list_products_handler))
            .route("", web::post().to(product_handlers::create_product_handler))
            .route("/{product_id}", web::get().to(product_handlers::get_product_handler))
            .route("/{product_id}", web::patch().to(product_handlers::update_product_handler))
            .route("/{product_id}", web::post().to(product_handlers::product_form_action_handler))
            .route("/{product_id}", web::delete().to(product_handlers::delete_product_handler))
            .route("/{product_id}/images/move", web::post().to(product_handlers::move_image_handler)),
        ),
    )
    .service(
      web::resource("/api/upload")
        .app_data(web::PayloadConfig::new(config.max_upload_bytes))
        .route(
          web::post()
            .guard(guard::fn_guard(|ctx| upload_handlers::is_form_data_upload(ctx.head().headers())))
            .to(upload_handlers::multipart_upload_handler),
        )
        .route(web::post().to(upload_handlers::upload_handler))
        .route(web::get().to(upload_handlers::upload_method_not_allowed_handler)),
    )
    .route(
      &format!("{}/{{file_name}}", config.upload_url_prefix),
      web::get().to(upload_handlers::serve_upload_handler),
    );
}
