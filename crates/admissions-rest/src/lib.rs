//! HTTPS record store for the admissions intake form.
//!
//! Inserts go to a PostgREST endpoint (as exposed by Supabase) at
//! `{base_url}/rest/v1/{table}` with `Prefer: return=representation`, so the backend
//! echoes the inserted row back.

pub mod client;
pub mod error;
pub mod settings;

pub use client::*;
pub use error::*;
pub use settings::*;
