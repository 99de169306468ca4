//! # doclift
//!
//! A fast, lightweight enhancer for static documentation pages.
//!
//! ## Features
//!
//! - Binds in-page anchor links and models clicks as smooth scroll requests
//! - Highlights code blocks (tokenizing engine, plus a legacy regex engine)
//! - Collapsible endpoint sections, first section expanded by default
//! - Serializes the enhanced page back to HTML
//!
//! ## Quick Start
//!
//! ```
//! use doclift::{EnhanceOptions, enhance_str};
//!
//! let html = r#"<div class="endpoint"><h3>GET /api/product</h3>
//!     <div><pre><code>const x = 1; // id</code></pre></div></div>"#;
//!
//! let enhanced = enhance_str(html, &EnhanceOptions::default()).unwrap();
//! assert!(enhanced.contains(r#"<span class="keyword">const</span>"#));
//! ```
//!
//! ## Working with Pages
//!
//! The [`Page`] struct is the central data type: parse once, enhance once,
//! then interact headlessly and serialize.
//!
//! ```
//! use doclift::{EnhanceOptions, Page};
//!
//! let mut page = Page::parse(r##"
//!     <a href="#product">jump</a>
//!     <div class="endpoint" id="product"><h3>GET /api/product</h3><div>…</div></div>
//! "##);
//! let report = page.enhance(&EnhanceOptions::default()).unwrap();
//! assert_eq!(report.anchors_bound, 1);
//!
//! // Clicking the link yields the scroll the viewport should perform
//! let scroll = page.click_anchor(0).unwrap();
//! assert_eq!(Some(scroll.target), page.dom().get_by_id("product"));
//!
//! // Clicking the first header collapses it again
//! assert_eq!(page.click_header(0), Some(false));
//! ```

pub mod dom;
pub mod error;
pub mod highlight;
pub mod nav;
pub mod page;
pub mod sections;

#[cfg(feature = "wasm")]
pub mod wasm;

pub use error::{Error, Result};
pub use highlight::Engine;
pub use nav::{AnchorBinding, ScrollBehavior, ScrollRequest};
pub use page::{EnhanceOptions, EnhanceReport, Page, enhance_file, enhance_str};
pub use sections::Section;
