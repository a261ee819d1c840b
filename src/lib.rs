//! `dictate` — local Whisper transcription utilities for backend services.
//!
//! This crate provides:
//! - A single-shot transcription runner (audio file in, transcript file out)
//! - An installation verifier that checks the local Whisper setup
//! - A model registry and downloader for the GGML models whisper.cpp consumes
//!
//! The binaries are thin wrappers over this library so the behavior stays
//! testable: an external backend spawns `dictate` as a subprocess, reads its
//! exit code, and picks up the transcript from the output path it supplied.

// Runner core and configuration.
pub mod opts;
pub mod transcribe;

// Whisper context management and the model registry.
pub mod ctx;
pub mod models;

// Audio input.
pub mod wav;

// Installation checks.
pub mod verify;

// Typed domain errors.
pub mod error;

// Logging configuration and control.
pub mod logging;
