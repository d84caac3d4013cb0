//! Gateway Rate Limiting Module
//!
//! Fixed-window request counting per client address.

use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::{Duration, Instant};

use axum::{
    extract::{ConnectInfo, Request, State},
    middleware::Next,
    response::{IntoResponse, Response},
};
use tokio::sync::RwLock;
use tracing::{debug, warn};

use crate::error::ApiError;

/// Windows are swept once the table holds this many clients.
const PRUNE_THRESHOLD: usize = 4096;

#[derive(Clone)]
pub struct RateLimiter {
    // client -> (request_count, window_start)
    limits: Arc<RwLock<HashMap<String, (u32, Instant)>>>,
    pub max_requests: u32,
    pub window: Duration,
}

impl RateLimiter {
    pub fn new(max_requests: u32, window: Duration) -> Self {
        Self {
            limits: Arc::new(RwLock::new(HashMap::new())),
            max_requests,
            window,
        }
    }

    /// Check if a request from the given client is allowed.
    pub async fn check_limit(&self, client: &str) -> bool {
        let mut limits = self.limits.write().await;
        let now = Instant::now();

        if limits.len() >= PRUNE_THRESHOLD {
            let window = self.window;
            limits.retain(|_, (_, start)| now.duration_since(*start) <= window);
        }

        let state = limits.entry(client.to_string()).or_insert((0, now));

        if now.duration_since(state.1) > self.window {
            state.0 = 1;
            state.1 = now;
            debug!(client, "Rate limit window reset");
            true
        } else {
            state.0 += 1;
            if state.0 > self.max_requests {
                warn!(client, max = self.max_requests, "Rate limit exceeded");
                false
            } else {
                debug!(client, count = state.0, max = self.max_requests, "Rate limit OK");
                true
            }
        }
    }
}

/// Client key: peer IP when the server was started with connect info.
fn client_key(req: &Request) -> String {
    req.extensions()
        .get::<ConnectInfo<SocketAddr>>()
        .map(|ConnectInfo(addr)| addr.ip().to_string())
        .unwrap_or_else(|| "unknown".to_string())
}

pub async fn rate_limit_middleware(
    State(limiter): State<RateLimiter>,
    req: Request,
    next: Next,
) -> Response {
    let client = client_key(&req);
    if !limiter.check_limit(&client).await {
        return ApiError::TooManyRequests("Too many requests; try again later".to_string())
            .into_response();
    }
    next.run(req).await
}
