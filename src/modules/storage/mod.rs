//! Storage module for journal photos
//!
//! Provides a MinIO/S3-compatible client for photo uploads, deletion,
//! and public URL handling.

mod photo_storage;

pub use photo_storage::PhotoStorageClient;
