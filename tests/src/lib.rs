//! # Invitii Check-In Test Suite
//!
//! ## Structure
//!
//! ```text
//! tests/src/
//! ├── harness.rs        # Wired store + service + clock + delivery
//! └── integration/      # Cross-crate flows
//!     ├── flows.rs      # RSVP -> issue -> deliver -> scan
//!     ├── scenarios.rs  # Dated door scenarios
//!     ├── concurrency.rs# Racing scanners and issuers
//!     └── tamper.rs     # Forgery and transfer properties
//! ```
//!
//! ## Running Tests
//!
//! ```bash
//! cargo test -p iv-tests
//! cargo test -p iv-tests integration::concurrency
//! cargo bench -p iv-tests
//! ```

pub mod harness;
