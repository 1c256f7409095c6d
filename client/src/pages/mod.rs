//! Page modules for route-level screens.
//!
//! ARCHITECTURE
//! ============
//! Pages own input state and validation only. Every side effect goes through
//! the callbacks the app shell hands them, which forward to the controller.

pub mod courses;
pub mod create_account;
pub(crate) mod forms;
pub mod login;
pub mod recover_password;
