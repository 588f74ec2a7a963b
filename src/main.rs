mod auth;
mod cart;
mod config;
mod db;
mod error;
mod items;
mod orders;
mod pricing;
mod reviews;
mod stores;
mod validation;

use axum::{
    routing::{get, patch, post},
    Router,
};
use sqlx::PgPool;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use items::{ItemsRepository, ItemStatus};
use orders::{OrderService, OrdersRepository};
use reviews::{ReviewService, ReviewsRepository};
use stores::StoresRepository;

/// OpenAPI documentation structure
#[derive(OpenApi)]
#[openapi(
    paths(
        items::handlers::get_items_handler,
        items::handlers::create_item_handler,
    ),
    components(
        schemas(
            items::Item,
            items::ItemWithStore,
            items::CreateItemRequest,
            ItemStatus,
            orders::Order,
            orders::OrderStatus,
            orders::CreateOrderRequest,
            orders::UpdateStatusRequest,
            orders::VerifyPickupRequest,
            reviews::Review,
            reviews::ReviewWithReviewer,
            reviews::CreateReviewRequest,
            reviews::StoreReviewsResponse,
            stores::Store,
            stores::StoreRatingSummary,
        )
    ),
    tags(
        (name = "items", description = "Discounted surplus item listings")
    ),
    info(
        title = "Food Rescue API",
        version = "1.0.0",
        description = "RESTful API for a surplus-food marketplace: item listings, pickup orders and store reviews"
    )
)]
struct ApiDoc;

/// Application state shared across handlers
#[derive(Clone)]
struct AppState {
    items_repo: ItemsRepository,
    stores_repo: StoresRepository,
    order_service: OrderService,
    review_service: ReviewService,
}

/// Creates and configures the application router
/// Maps all API endpoints to their handlers and adds CORS middleware
fn create_router(db: PgPool) -> Router {
    use tower_http::cors::{Any, CorsLayer};

    let items_repo = ItemsRepository::new(db.clone());
    let stores_repo = StoresRepository::new(db.clone());
    let orders_repo = OrdersRepository::new(db.clone());
    let reviews_repo = ReviewsRepository::new(db);

    let order_service = OrderService::new(orders_repo.clone(), items_repo.clone());
    let review_service = ReviewService::new(reviews_repo, orders_repo, stores_repo.clone());

    let state = AppState {
        items_repo,
        stores_repo,
        order_service,
        review_service,
    };

    // Configure CORS to allow all origins, methods, and headers
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        // Swagger UI
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        // API routes
        .route(
            "/api/items",
            get(items::get_items_handler).post(items::create_item_handler),
        )
        .route(
            "/api/orders",
            post(orders::create_order_handler).get(orders::get_order_history_handler),
        )
        .route("/api/orders/:order_id", get(orders::get_order_by_id_handler))
        .route(
            "/api/orders/:order_id/status",
            patch(orders::update_order_status_handler),
        )
        .route(
            "/api/orders/:order_id/verify",
            post(orders::verify_pickup_handler),
        )
        .route(
            "/api/reviews",
            post(reviews::create_review_handler).get(reviews::get_store_reviews_handler),
        )
        .layer(cors)
        .with_state(state)
}

#[tokio::main]
async fn main() {
    // Load environment variables from .env file
    dotenv::dotenv().ok();

    // Initialize tracing subscriber for logging
    tracing_subscriber::fmt()
        .with_target(false)
        .with_level(true)
        .init();

    tracing::info!("Food Rescue API - Starting...");

    // Get configuration from environment variables
    let database_url =
        std::env::var("DATABASE_URL").expect("DATABASE_URL must be set in environment");
    let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
    let port = std::env::var("PORT").unwrap_or_else(|_| "8080".to_string());

    // Create database connection pool
    tracing::info!("Connecting to database...");
    let db_pool = db::create_pool(&database_url)
        .await
        .expect("Failed to create database pool");

    // Run SQLx migrations on startup
    tracing::info!("Running database migrations...");
    sqlx::migrate!("./migrations")
        .run(&db_pool)
        .await
        .expect("Failed to run database migrations");
    tracing::info!("Migrations completed successfully");

    // Create the application router
    let app = create_router(db_pool);

    // Start the Axum server
    let addr = format!("{}:{}", host, port);
    tracing::info!("Starting server on {}", addr);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .expect("Failed to bind to address");

    tracing::info!("Food Rescue API is running on http://{}", addr);
    tracing::info!("Swagger UI available at http://{}/swagger-ui", addr);

    axum::serve(listener, app)
        .await
        .expect("Server error");
}

#[cfg(test)]
mod tests;
