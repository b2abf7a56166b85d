pub mod auth_session;
pub mod supabase_auth;
pub mod sync_engine;
pub mod task_api;
