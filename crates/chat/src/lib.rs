pub mod events;
pub mod pipeline;
pub mod summary;

pub use events::{ChatMessageEvent, ChatReply};
pub use pipeline::ChatPipeline;
pub use summary::quote_summary;
