//! ElderEase - a social media learning service for seniors
//!
//! Accounts, accessibility preferences, a step-by-step tutorial catalog with
//! per-user progress and bookmarks, plus the client-side session and chat
//! models the web frontend builds on.

pub mod api;
pub mod auth;
pub mod bookmarks;
pub mod catalog;
pub mod chat;
pub mod config;
pub mod context;
pub mod db;
pub mod error;
pub mod optimistic;
pub mod preferences;
pub mod progress;
pub mod server;
pub mod session;
