// PhiGuard - PHI detection, redaction and field-level encryption
// Copyright (c) 2025 PhiGuard Contributors
// Licensed under the MIT License

//! # PhiGuard
//!
//! PhiGuard protects Protected Health Information (PHI) flowing through a
//! clinical application. It finds PHI in free text and nested documents,
//! redacts or anonymizes it before logging or transmission, and encrypts
//! selected fields of structured records before they are persisted.
//!
//! ## Architecture
//!
//! - [`crypto`] - Key derivation, AES-256-GCM ciphertext strings, hashing and MACs
//! - [`detection`] - PHI pattern library and regex detector
//! - [`sanitizer`] - Redaction and anonymization of text and JSON values
//! - [`encryption`] - Field-level encryption of JSON records
//! - [`domain`] - Error taxonomy
//! - [`config`] - Configuration management
//! - [`logging`] - Structured logging
//! - [`cli`] - Command-line interface
//!
//! ## Quick Start
//!
//! ```rust
//! use phiguard::crypto::CipherCore;
//! use phiguard::detection::RegexDetector;
//! use phiguard::encryption::FieldEncryptor;
//! use phiguard::sanitizer::{PhiSanitizer, SanitizationMode};
//! use serde_json::json;
//! use std::sync::Arc;
//!
//! # fn main() -> Result<(), phiguard::domain::PhiGuardError> {
//! // Scrub a message before it reaches a log
//! let sanitizer = PhiSanitizer::new(Arc::new(RegexDetector::new()), SanitizationMode::Redact);
//! let line = sanitizer.redact_phi("Contact john@x.com re: SSN 123-45-6789")?;
//! assert_eq!(line, "Contact [REDACTED:EMAIL] re: SSN [REDACTED:SSN]");
//!
//! // Encrypt one field of a record before persisting it
//! let cipher = CipherCore::with_options("correct horse battery staple", None, 1_000)?;
//! let encryptor = FieldEncryptor::new(Arc::new(cipher));
//! let stored = encryptor.encrypt_fields(&json!({"ssn": "123-45-6789", "id": 7}), &["ssn"])?;
//! assert_eq!(stored["id"], 7);
//! # Ok(())
//! # }
//! ```
//!
//! ## Error Handling
//!
//! Every fallible operation returns [`domain::PhiGuardError`]. Data-path
//! errors never carry a fragment of the input that caused them.
//!
//! ## Logging
//!
//! PhiGuard uses structured logging with the `tracing` crate. Events carry
//! categories, counts and offsets, never matched values.

pub mod cli;
pub mod config;
pub mod crypto;
pub mod detection;
pub mod domain;
pub mod encryption;
pub mod logging;
pub mod sanitizer;
