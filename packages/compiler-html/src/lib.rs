//! # Quizsheet HTML Compiler
//!
//! Renders a quiz collection into the standalone read-only preview document
//! that export and print operate on.
//!
//! The listing lives in a single element with id [`PREVIEW_ELEMENT_ID`];
//! capture code looks that element up and rasterizes only its box.

mod compiler;


pub use compiler::{compile_to_html, CompileError, CompileOptions, PreviewDocument, PREVIEW_ELEMENT_ID};
