// HamLog Library
// Re-export modules for use in main.rs

pub mod adif;
pub mod commands;
pub mod config;
pub mod contact;
pub mod db;
pub mod dupes;
pub mod error;
