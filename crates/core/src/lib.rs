// ABOUTME: Main library entry point for reelsnap, the Instagram reel media URL extractor.
// ABOUTME: Re-exports the public API: Client, ClientBuilder, ExtractionPipeline, ExtractionResult, ParseError, ErrorCode.

//! reelsnap - extract the direct media URL from an Instagram reel or post page.
//!
//! The crate validates the page URL, fetches the page with browser-like
//! headers, and runs an ordered chain of extraction strategies over the
//! markup. The first strategy to yield an absolute http(s) URL wins.
//!
//! # Example
//!
//! ```no_run
//! use reelsnap_core::{Client, ExtractionResult, ParseError};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), ParseError> {
//!     let client = Client::builder().build()?;
//!     match client.fetch_video("https://www.instagram.com/reel/C0ffee123/").await? {
//!         ExtractionResult::Found(url) => println!("{}", url),
//!         ExtractionResult::NotFound => eprintln!("no video on page"),
//!     }
//!     Ok(())
//! }
//! ```
//!
//! Markup that was downloaded elsewhere can be handed straight to the pipeline:
//!
//! ```
//! use reelsnap_core::{ExtractionPipeline, ExtractionResult};
//!
//! let html = r#"<meta property="og:video" content="https://cdn.example.com/v.mp4">"#;
//! assert_eq!(
//!     ExtractionPipeline::new().extract(html),
//!     ExtractionResult::Found("https://cdn.example.com/v.mp4".to_string())
//! );
//! ```

pub mod client;
pub mod error;
pub mod extractors;
pub mod options;
pub mod resource;
pub mod result;
pub mod target;

pub use crate::client::Client;
pub use crate::error::{ErrorCode, ParseError};
pub use crate::extractors::{
    Document, ExtractionPipeline, MetaTagStrategy, ScriptPatternStrategy, Strategy,
    VideoTagStrategy,
};
pub use crate::options::{ClientBuilder, Options};
pub use crate::result::{ExtractionResult, StrategyMatch};
pub use crate::target::{is_accepted_host, validate_target_url};
