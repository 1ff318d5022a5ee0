pub mod deepseek;
pub mod scrub;
pub mod traits;

pub use deepseek::DeepSeekBackend;
pub use scrub::{sanitize_api_error, scrub_secret_patterns};
pub use traits::CompletionBackend;
