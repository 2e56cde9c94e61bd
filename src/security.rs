mod api_ext;
pub mod credentials;
mod session_tokens;
