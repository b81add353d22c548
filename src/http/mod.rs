//! HTTP API server for external control (the UI layer)
//!
//! This module provides a REST API for driving interview sessions:
//! - POST /interviews/start - Create a session for a company persona
//! - POST /interviews/:id/ask - Ask the current question
//! - POST /interviews/:id/skip - Skip the thinking countdown
//! - POST /interviews/:id/stop - Stop recording the current answer
//! - POST /interviews/:id/cancel - Cancel the session
//! - POST /interviews/:id/frames - Push captured audio frames
//! - GET /interviews/:id/status - Query session status
//! - GET /interviews/:id/result - Get the terminal payload
//! - GET /companies - List built-in question banks
//! - GET /health - Health check

mod handlers;
mod routes;
mod state;

pub use routes::create_router;
pub use state::AppState;
