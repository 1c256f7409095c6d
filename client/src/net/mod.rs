//! Networking modules for the identity and course-data services.
//!
//! SYSTEM CONTEXT
//! ==============
//! `identity` and `courses` define the collaborator traits the controller
//! depends on plus their REST implementations, `api` holds the shared HTTP
//! plumbing, `token` owns JWT decoding and token persistence, and `types`
//! defines the wire schema.

pub mod api;
pub mod courses;
pub mod identity;
pub mod token;
pub mod types;
