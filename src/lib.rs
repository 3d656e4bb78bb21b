//! # Complaint Portal
//!
//! `complaint-portal` is a small complaint-management service. Users register
//! with a name and email and receive a server-generated **secret code**; that
//! code is the only credential and travels in the JSON body of every request.
//!
//! ## Roles
//!
//! - **Users** submit complaints (title, summary, rating 1-10) and may only list
//!   or view the complaints they submitted.
//! - **Administrators** list every complaint and resolve pending ones. One
//!   administrator is seeded at startup from configuration.
//!
//! ## Storage
//!
//! All state lives in memory and is lost on restart. Users and complaints sit
//! in two independently locked maps; see [`store`] for the concurrency rules.

pub mod cli;
pub mod portal;
pub mod store;

#[allow(clippy::doc_markdown, clippy::needless_raw_string_hashes)]
pub mod built_info {
    include!(concat!(env!("OUT_DIR"), "/built.rs"));
}

pub const GIT_COMMIT_HASH: &str = match built_info::GIT_COMMIT_HASH {
    Some(hash) => hash,
    None => "unknown",
};
