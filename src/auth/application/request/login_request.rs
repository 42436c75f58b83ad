use serde::Serialize;

/// Body of `POST /access/ticket`. The realm travels inside `username`.
#[derive(Serialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}
