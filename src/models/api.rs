use serde::{ Serialize, Deserialize };

use crate::models::chat::ChatMessage;

#[derive(Serialize, Deserialize, Debug)]
pub struct ChatRequest {
    pub message: String,
}

#[derive(Serialize, Deserialize, Debug)]
pub struct ChatResponse {
    /// Turns appended by this submission, in insertion order.
    pub appended: Vec<ChatMessage>,
}

#[derive(Serialize, Deserialize, Debug)]
pub struct SessionResponse {
    pub session_id: String,
    pub messages: Vec<ChatMessage>,
    pub dark_mode: bool,
    pub model: String,
    pub models: Vec<String>,
}

#[derive(Serialize, Deserialize, Debug)]
pub struct ModelRequest {
    pub model: String,
}

#[derive(Serialize, Deserialize, Debug)]
pub struct ModelResponse {
    pub message: String,
    pub model: String,
}

#[derive(Serialize, Deserialize, Debug)]
pub struct ThemeResponse {
    pub dark_mode: bool,
}

#[derive(Serialize, Deserialize, Debug)]
pub struct ErrorResponse {
    pub error: String,
}
