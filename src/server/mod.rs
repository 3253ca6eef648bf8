//! Development server
//!
//! Every request reads the posts directory again, so edits show up on the
//! next page load without a rebuild.

use anyhow::Result;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    routing::get,
    Router,
};
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::content::FsPostRepository;
use crate::generator::{Generator, PageError};
use crate::Blog;

/// Server state
type SharedGenerator = Arc<Generator<FsPostRepository>>;

/// Build the router for a blog
pub fn router(blog: &Blog) -> Result<Router> {
    let generator: SharedGenerator = Arc::new(Generator::new(&blog.config, blog.repository())?);
    let post_route = format!("/{}/:slug", blog.config.blog_dir.trim_matches('/'));

    Ok(Router::new()
        .route("/", get(index_handler))
        .route(&post_route, get(post_handler))
        .fallback_service(ServeDir::new(&blog.static_dir))
        .layer(TraceLayer::new_for_http())
        .with_state(generator))
}

/// Start the development server
pub async fn start(blog: &Blog, ip: &str, port: u16) -> Result<()> {
    let app = router(blog)?;

    // Parse address - handle "localhost" specially
    let bind_ip = if ip == "localhost" { "127.0.0.1" } else { ip };
    let addr: SocketAddr = format!("{}:{}", bind_ip, port).parse()?;

    println!("Server running at http://{}:{}", ip, port);
    println!("Press Ctrl+C to stop.");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

async fn index_handler(State(generator): State<SharedGenerator>) -> Response {
    match generator.index_page() {
        Ok(html) => Html(html).into_response(),
        Err(e) => error_response(&generator, "", e),
    }
}

async fn post_handler(
    State(generator): State<SharedGenerator>,
    Path(slug): Path<String>,
) -> Response {
    match generator.post_page(&slug) {
        Ok(html) => Html(html).into_response(),
        Err(e) => error_response(&generator, &slug, e),
    }
}

fn error_response(generator: &SharedGenerator, slug: &str, error: PageError) -> Response {
    if error.is_not_found() {
        tracing::debug!("No post for slug {:?}", slug);
        match generator.not_found_page(slug) {
            Ok(html) => return (StatusCode::NOT_FOUND, Html(html)).into_response(),
            Err(e) => return internal_error(e),
        }
    }

    internal_error(error)
}

fn internal_error(error: PageError) -> Response {
    tracing::error!("Failed to render page: {}", error);
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        format!("Failed to render page: {}", error),
    )
        .into_response()
}
