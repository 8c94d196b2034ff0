//! Infrastructure layer - Storage backends, user wiring, validation and logging

pub mod logging;
pub mod storage;
pub mod user;
pub mod validator;
