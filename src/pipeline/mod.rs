//! Pipeline stages for catalog generation.
//!
//! Each submodule implements exactly one transformation step. Keeping
//! stages separate makes each independently testable and lets the CLI,
//! tests, and an embedding UI drive them through the same seams.
//!
//! ## Data Flow
//!
//! ```text
//! loader ──▶ classify ──▶ index ──▶ (selection) ──▶ render
//! (file)    (per name)  (buckets)                 (fetch + layout + PDF)
//! ```
//!
//! 1. [`loader`]   — decode the JSON/CSV file and normalize field keys
//! 2. [`classify`] — map each product name through the ordered rule table
//! 3. [`index`]    — group in-stock records by (category, size)
//! 4. [`fetch`]    — download and recompress one product image; the only
//!    stage with network I/O
//! 5. [`layout`]   — fixed page geometry, grid math, label wrapping
//! 6. [`render`]   — drive fetch + layout per record and write the PDF

pub mod classify;
pub mod fetch;
pub mod index;
pub mod layout;
pub mod loader;
pub mod render;
