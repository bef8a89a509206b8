pub const DEFAULT_ENDPOINT: &str = "https://api.vectara.io";

pub const DEFAULT_TOP_K: u32 = 4;
pub const DEFAULT_LAMBDA: f64 = 0.025;
pub const DEFAULT_SENTENCES_BEFORE: u32 = 2;
pub const DEFAULT_SENTENCES_AFTER: u32 = 2;

pub const DEFAULT_SUMMARIZER_PROMPT: &str = "vectara-experimental-summary-ext-2023-10-23-med";
pub const DEFAULT_RESPONSE_LANG: &str = "en";
pub const DEFAULT_MAX_SUMMARIZED_RESULTS: u32 = 5;

pub const DEFAULT_LOG_LEVEL: &str = "info";
