// Wire constants
pub const SENDER_USER: &str = "USER";

// Shown for every failed exchange, animated like a normal reply.
pub const FALLBACK_TEXT: &str =
    "Hmm, something's not quite right. I can't reach my brain at the moment. Try again in a bit!";

// Typed out once on startup.
pub const WELCOME_TEXT: &str =
    "Hi! I'm your search assistant. Ask me anything and I'll dig up an answer.";

// Animation cadence (milliseconds)
pub const TYPING_INTERVAL_MS: u64 = 50;
pub const METADATA_DELAY_MS: u64 = 500;
pub const THINKING_INTERVAL_MS: u64 = 250;

// Event loop tick granularity; must not exceed TYPING_INTERVAL_MS.
pub const TICK_RATE_MS: u64 = 25;
