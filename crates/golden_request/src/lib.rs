//! # golden_request
//!
//! Infrastructure request model, loading and linting for golden-render.
//!
//! A request names an application, its environment and Kubernetes
//! namespace, and lists the resources it needs in declaration order:
//!
//! ```yaml
//! app: shop
//! env: dev
//! namespace: shop
//! resources:
//!   - type: s3_bucket
//!     name: uploads
//!   - type: rds_database
//!     name: orders
//!     size: medium
//!   - type: irsa_role
//!     name: api
//!     s3_buckets: [uploads]
//!     rds_databases: [orders]
//! ```
//!
//! ## Example
//!
//! ```rust,no_run
//! use golden_request::{RequestReader, RequestValidator};
//!
//! let request = RequestReader::read_file("request.yaml").unwrap();
//! let result = RequestValidator::validate(&request);
//! for warning in &result.warnings {
//!     eprintln!("Warning: {}", warning);
//! }
//! ```

pub mod error;
pub mod models;
pub mod reader;
pub mod validator;

pub use error::{RequestError, RequestResult};
pub use models::*;
pub use reader::RequestReader;
pub use validator::{RequestValidator, ValidationResult};
