//! Printable output for inspection records.
//!
//! A record is first projected into a [`PrintDocument`] (the fixed layout of
//! the official Berita Acara), which is then rendered:
//!
//! - **XHTML**: standalone printable page, images embedded as data URLs
//! - **Text**: terminal preview with the checklist as a table
//!
//! [`PrintSession`] drives a [`PrintProvider`] the way the archive screen
//! does: show, wait briefly, print, clear.

pub mod dates;
mod document;
mod html;
mod print;
mod text;

pub use document::{
    ChecklistRow, DEFAULT_CONCLUSION, IdentityRow, PrintDocument, SignatureBlock, UNSIGNED,
};
pub use html::{render_html, write_html};
pub use print::{DEFAULT_PRINT_DELAY, HtmlPrinter, PrintProvider, PrintSession};
pub use text::render_text;
