//! Core library for the Timegrid tracker.
//!
//! This crate exposes the domain model, blob-backed repository, weekly
//! grid derivation, statistics, CSV export and the reducer-style state
//! layer used by the Timegrid application.

pub mod calendar;
pub mod domain;
pub mod export;
pub mod forms;
pub mod repository;
pub mod slots;
pub mod state;
pub mod stats;
pub mod storage;
