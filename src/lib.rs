//! MedScan — medical lab report OCR scanner.
//!
//! Turns scanned images of printed lab reports and handwritten vitals
//! logs into structured rows ready for a review-then-save workflow. The
//! pipeline is OCR (cloud provider) → document classification →
//! field extraction → clinical status derivation; reviewed rows are
//! appended to a Google Sheet through an Apps Script web app.

pub mod api;
pub mod config;
pub mod models;
pub mod pipeline;
pub mod storage;
