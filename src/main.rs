//! Prototype Hub - a local browser workspace for markdown documents and HTML
//! prototypes stored under one content directory.
//!
//! # Usage
//! ```bash
//! prototype-hub ./content          # Start server
//! prototype-hub ./content --open   # Start and open browser
//! prototype-hub status             # Check if running
//! prototype-hub kill               # Stop running instance
//! ```

mod content;
mod error;
mod models;
mod prototype;
mod routes;

use std::fs;
use std::io::{Read, Write};
use std::path::PathBuf;
use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use clap::{Parser, Subcommand};
use rust_embed::Embed;
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use content::{ContentRepository, SharedContent};

/// Embedded frontend static files
#[derive(Embed)]
#[folder = "frontend/"]
struct Assets;

/// Prototype Hub - Edit documents and preview prototypes in your browser
#[derive(Parser)]
#[command(name = "prototype-hub")]
#[command(about = "A local hub for markdown documents and HTML prototypes", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Directory holding documents and prototypes
    #[arg(value_name = "CONTENT_DIR", default_value = "content")]
    content_dir: String,

    /// Open browser automatically after starting
    #[arg(short, long)]
    open: bool,

    /// Port to run the server on
    #[arg(short, long, default_value = "3000")]
    port: u16,
}

#[derive(Subcommand)]
enum Commands {
    /// Check if prototype-hub is currently running
    Status,
    /// Stop the running prototype-hub instance
    Kill,
}

/// PID file info stored as JSON
#[derive(serde::Serialize, serde::Deserialize)]
struct PidInfo {
    pid: u32,
    content_root: String,
    port: u16,
}

fn get_pid_file_path() -> PathBuf {
    let mut path = std::env::temp_dir();
    path.push("prototype-hub.pid");
    path
}

fn read_pid_info() -> Option<PidInfo> {
    let path = get_pid_file_path();
    let mut file = fs::File::open(&path).ok()?;
    let mut contents = String::new();
    file.read_to_string(&mut contents).ok()?;
    serde_json::from_str(&contents).ok()
}

fn write_pid_info(info: &PidInfo) -> anyhow::Result<()> {
    let path = get_pid_file_path();
    let mut file = fs::File::create(&path)?;
    file.write_all(serde_json::to_string(info)?.as_bytes())?;
    Ok(())
}

fn remove_pid_file() {
    let _ = fs::remove_file(get_pid_file_path());
}

#[cfg(unix)]
fn is_process_running(pid: u32) -> bool {
    // Signal 0 only checks that the process exists
    unsafe { libc::kill(pid as i32, 0) == 0 }
}

#[cfg(windows)]
fn is_process_running(pid: u32) -> bool {
    use std::process::Command;
    Command::new("tasklist")
        .args(["/FI", &format!("PID eq {}", pid), "/NH"])
        .output()
        .map(|output| String::from_utf8_lossy(&output.stdout).contains(&pid.to_string()))
        .unwrap_or(false)
}

#[cfg(unix)]
fn kill_process(pid: u32) -> bool {
    unsafe { libc::kill(pid as i32, libc::SIGTERM) == 0 }
}

#[cfg(windows)]
fn kill_process(pid: u32) -> bool {
    use std::process::Command;
    Command::new("taskkill")
        .args(["/PID", &pid.to_string(), "/F"])
        .status()
        .map(|status| status.success())
        .unwrap_or(false)
}

fn handle_status() {
    match read_pid_info() {
        Some(info) if is_process_running(info.pid) => {
            println!("✓ prototype-hub is running");
            println!("  PID:     {}", info.pid);
            println!("  Content: {}", info.content_root);
            println!("  URL:     http://127.0.0.1:{}", info.port);
        }
        Some(_) => {
            println!("✗ prototype-hub is not running (stale PID file)");
            remove_pid_file();
        }
        None => println!("✗ prototype-hub is not running"),
    }
}

fn handle_kill() {
    match read_pid_info() {
        Some(info) if is_process_running(info.pid) => {
            if kill_process(info.pid) {
                println!("✓ Stopped prototype-hub (PID {})", info.pid);
                remove_pid_file();
            } else {
                println!("✗ Failed to stop prototype-hub (PID {})", info.pid);
            }
        }
        Some(_) => {
            println!("✗ prototype-hub is not running (stale PID file)");
            remove_pid_file();
        }
        None => println!("✗ prototype-hub is not running"),
    }
}

fn embedded(path: &str) -> Option<Response> {
    let content = Assets::get(path)?;
    let mime = mime_guess::from_path(path).first_or_octet_stream();
    Some(
        (
            StatusCode::OK,
            [(header::CONTENT_TYPE, mime.to_string())],
            content.data.into_owned(),
        )
            .into_response(),
    )
}

/// Serve embedded static files
async fn serve_static(req: Request<Body>) -> Response {
    let path = req.uri().path().trim_start_matches('/');

    // Paths without an extension are client-side views
    let path = if path.is_empty() || !path.contains('.') {
        "index.html"
    } else {
        path
    };

    embedded(path)
        .or_else(|| embedded("index.html"))
        .unwrap_or_else(|| (StatusCode::NOT_FOUND, "Not Found").into_response())
}

/// API routes plus the embedded UI, served same-origin without CORS headers.
fn create_app(content: SharedContent) -> Router {
    Router::new()
        .merge(routes::create_router(content))
        .fallback(get(serve_static))
        .layer(TraceLayer::new_for_http())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Handle subcommands
    match cli.command {
        Some(Commands::Status) => {
            handle_status();
            return Ok(());
        }
        Some(Commands::Kill) => {
            handle_kill();
            return Ok(());
        }
        None => {}
    }

    // Check if already running
    if let Some(info) = read_pid_info() {
        if is_process_running(info.pid) {
            eprintln!("✗ prototype-hub is already running (PID {})", info.pid);
            eprintln!("  Content: {}", info.content_root);
            eprintln!("  URL:     http://127.0.0.1:{}", info.port);
            eprintln!();
            eprintln!("Run 'prototype-hub kill' to stop it first.");
            std::process::exit(1);
        } else {
            remove_pid_file();
        }
    }

    // Initialize tracing (quieter for production)
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "warn".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Open the content directory
    let repo = match ContentRepository::open(&cli.content_dir) {
        Ok(r) => r,
        Err(e) => {
            eprintln!("✗ Failed to open content directory: {}", e);
            eprintln!("  Path: {}", cli.content_dir);
            std::process::exit(1);
        }
    };
    let content_root = repo.root().to_string_lossy().to_string();
    tracing::info!("Serving content from {}", content_root);

    let shared_content = Arc::new(repo);

    // Build the router with API routes and static file serving
    let app = create_app(shared_content);

    // Bind to the port
    let addr = format!("127.0.0.1:{}", cli.port);
    let listener = match tokio::net::TcpListener::bind(&addr).await {
        Ok(l) => l,
        Err(e) => {
            eprintln!("✗ Failed to bind to port {}: {}", cli.port, e);
            eprintln!("  Try a different port with --port <PORT>");
            std::process::exit(1);
        }
    };

    // Write PID file
    write_pid_info(&PidInfo {
        pid: std::process::id(),
        content_root: content_root.clone(),
        port: cli.port,
    })?;

    // Print startup message
    let url = format!("http://127.0.0.1:{}", cli.port);
    println!();
    println!("  ┌─────────────────────────────────────────────┐");
    println!("  │                Prototype Hub                │");
    println!("  └─────────────────────────────────────────────┘");
    println!();
    println!("  Content:    {}", content_root);
    println!("  Server:     {}", url);
    println!("  Prototypes: {}/prototypes/<name>", url);
    println!();
    println!("  Commands:");
    println!("    prototype-hub status  - Check if running");
    println!("    prototype-hub kill    - Stop the server");
    println!();
    println!("  Press Ctrl+C to stop");
    println!();

    // Open browser if requested
    if cli.open {
        if let Err(e) = open::that(&url) {
            eprintln!("  Warning: Could not open browser: {}", e);
        }
    }

    // Set up graceful shutdown
    let shutdown = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
        println!("\n  Shutting down...");
        remove_pid_file();
    };

    // Start the server with graceful shutdown
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown)
        .await?;

    Ok(())
}
