//! Field-level encryption
//!
//! Encrypts only the addressed fields of a record so the rest stays
//! queryable. The cipher is injected, which lets callers and tests supply
//! any [`FieldCipher`](crate::crypto::FieldCipher).
//!
//! ```
//! use phiguard::crypto::CipherCore;
//! use phiguard::encryption::FieldEncryptor;
//! use serde_json::json;
//! use std::sync::Arc;
//!
//! let cipher = CipherCore::with_options("correct horse battery staple", None, 1_000)?;
//! let encryptor = FieldEncryptor::new(Arc::new(cipher));
//!
//! let record = json!({"patient": {"email": "john@x.com"}, "id": "123"});
//! let stored = encryptor.encrypt_fields(&record, &["patient.email"])?;
//! assert!(stored["patient"]["email"].as_str().unwrap().starts_with("v1:"));
//!
//! let restored = encryptor.decrypt_fields(&stored, &["patient.email"])?;
//! assert_eq!(restored, record);
//! # Ok::<(), phiguard::domain::PhiGuardError>(())
//! ```

pub mod canonical;
pub mod field;

pub use field::{FieldEncryptor, FieldReport};
