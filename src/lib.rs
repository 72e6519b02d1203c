// src/lib.rs

//! Reshare Library
//!
//! Discovers feed posts matching configured topics, selects the
//! highest-engagement post not yet acted on, composes a short comment
//! and republishes the content via the platform API or a remote
//! browser session, recording every action to a local history file.

pub mod comment;
pub mod error;
pub mod models;
pub mod pipeline;
pub mod publish;
pub mod services;
pub mod storage;
pub mod utils;
