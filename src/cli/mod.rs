use clap::Parser;

#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Host address and port for the server to listen on.
    #[arg(long, env = "SERVER_ADDR", default_value = "127.0.0.1:4000")]
    pub server_addr: String,

    /// API key for the Groq chat-completion API. Required; startup fails
    /// without it.
    #[arg(long, env = "GROQ_API_KEY", hide_env_values = true)]
    pub groq_api_key: String,

    /// Model the chain starts with. Must be one of the supported models.
    #[arg(long, env = "CHAT_MODEL", default_value = "llama3-70b-8192")]
    pub chat_model: String,

    /// Base URL override for the chat API (e.g., a local mock during development).
    #[arg(long, env = "CHAT_BASE_URL")]
    pub chat_base_url: Option<String>,

    /// Seconds a session may sit idle before it is dropped.
    #[arg(long, env = "SESSION_IDLE_SECS", default_value = "3600")]
    pub session_idle_secs: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_api_key_is_a_startup_error() {
        std::env::remove_var("GROQ_API_KEY");
        let parsed = Args::try_parse_from(["sahas"]);
        assert!(parsed.is_err());
    }

    #[test]
    fn flag_overrides_are_honored() {
        let args = Args::try_parse_from([
            "sahas",
            "--groq-api-key",
            "k",
            "--chat-model",
            "gemma-7b-it",
            "--server-addr",
            "0.0.0.0:8080",
        ]).unwrap();
        assert_eq!(args.chat_model, "gemma-7b-it");
        assert_eq!(args.server_addr, "0.0.0.0:8080");
        assert_eq!(args.session_idle_secs, 3600);
    }
}
