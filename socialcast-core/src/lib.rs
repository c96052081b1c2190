#![doc = "socialcast-core: core logic library for socialcast."]

//! This crate contains all business logic, data models and pipelines for
//! socialcast: extracting site pages, generating platform-tailored social
//! media content, versioned on-disk storage, and posting to platforms.
//! The CLI binary crate only does argument parsing and config assembly.
//!
//! # Usage
//! Add this as a dependency for all shared pipeline, platform, config and
//! posting code.

pub mod config;
pub mod contract;
pub mod extract;
pub mod generate;
pub mod image;
pub mod oauth1;
pub mod openai;
pub mod platform;
pub mod poster;
pub mod prompt;
pub mod store;
