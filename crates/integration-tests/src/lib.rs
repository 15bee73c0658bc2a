//! Integration tests for Curbside.
//!
//! # Running Tests
//!
//! ```bash
//! # Start the database and run migrations + seed
//! cargo run -p curbside-cli -- migrate
//! cargo run -p curbside-cli -- seed
//!
//! # Start both servers
//! cargo run -p curbside-portal &
//! cargo run -p curbside-admin &
//!
//! # Run integration tests
//! cargo test -p curbside-integration-tests -- --ignored
//! ```
//!
//! # Test Categories
//!
//! - `portal_api` - Public intake and crew API tests
//! - `admin_api` - Admin console API tests
//!
//! Base URLs are configurable via `PORTAL_BASE_URL` and `ADMIN_BASE_URL`;
//! the admin tests expect `ADMIN_EMAIL`/`ADMIN_PASSWORD` to match the
//! running admin binary's configuration.
