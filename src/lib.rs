//! Sheets of archive serial number (ASN) labels, rendered to PDF.
//!
//! The crate is built around three pieces:
//!
//! * [`sheets`] — the catalog of physical label sheet formats,
//! * [`grid`] — the position engine that maps a running label index onto
//!   cells of a sheet and drives the per-label render loop,
//! * [`canvas`] — the drawing surface the engine paints through, with a
//!   printpdf-backed implementation.
//!
//! [`label::AsnLabel`] is the stock content renderer: one QR code plus the
//! human-readable ASN per cell.

use thiserror::Error;

pub mod canvas;
pub mod grid;
pub mod label;
pub mod sheets;
pub mod units;

pub use canvas::{Canvas, PdfCanvas};
pub use grid::{FillOrder, LabelSheet, SheetOptions, StartPosition};
pub use label::AsnLabel;
pub use sheets::{lookup, SheetFormat, FORMAT_NAMES};

#[derive(Error, Debug)]
pub enum LabelError {
    #[error("unknown sheet format: {0}")]
    UnknownFormat(String),
    #[error("invalid start position: {0}")]
    InvalidStartPosition(String),
    #[error("failed to write PDF: {0}")]
    Pdf(String),
    #[error("failed to generate QR code: {0}")]
    Qr(String),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
