//! # ficread
//!
//! A small library for turning archived AO3 fan-fiction pages into
//! renderable content plus metadata, ready for a static-site
//! generator's page pipeline.
//!
//! ## Features
//!
//! - Single-pass streaming extraction, no DOM tree
//! - Scrapes title, authors, tags, summary, and publish date from the
//!   work's metadata block
//! - Re-serializes the chapters block faithfully (attribute quoting,
//!   entity and character references preserved) with the surrounding
//!   site chrome stripped
//! - Lenient by design: missing or malformed metadata degrades to
//!   defaults instead of failing
//!
//! ## Quick Start
//!
//! ```
//! use ficread::read_work_from_str;
//!
//! let html = r#"<body>
//!   <div class="meta">
//!     <h1>My Fic</h1>
//!     <a rel="author">Jane</a>
//!     <dl class="tags"><dt>Fandoms:</dt><dd><a>Star Trek</a></dd></dl>
//!     <blockquote>A short summary.</blockquote>
//!   </div>
//!   <div id="chapters"><p>Hello</p></div>
//! </body>"#;
//!
//! let work = read_work_from_str(html)?;
//! assert_eq!(work.metadata.title, "My Fic");
//! assert_eq!(work.metadata.authors, vec!["Jane"]);
//! assert_eq!(work.metadata.tags, vec!["Fandoms:Star Trek"]);
//! assert!(work.body.contains("<p>Hello</p>"));
//! # Ok::<(), ficread::Error>(())
//! ```
//!
//! Reading from disk goes through [`read_work`], which also handles
//! byte decoding (UTF-8 with a Windows-1252 fallback). The [`Work`]
//! struct is the output type: a `body` fragment plus a
//! [`WorkMetadata`] record the host passes through its own metadata
//! post-processing.

mod error;
mod extract;
mod markup;
pub mod reader;
pub(crate) mod util;
pub mod work;

pub use error::{Error, Result};
pub use reader::{FILE_EXTENSIONS, is_work_path, read_work, read_work_from_str};
pub use work::{Work, WorkMetadata};
