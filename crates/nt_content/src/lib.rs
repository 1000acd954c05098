pub mod client;
pub mod html;
pub mod images;
pub mod logging;

pub use client::ContentClient;
pub use html::{html_to_blocks, html_to_text, Block, BlockKind};
pub use images::HttpImageSource;
pub use logging::init_logging;
