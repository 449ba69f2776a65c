//! This module aggregates various utility submodules used throughout the application.

/// Parsing of `<#channel>` mentions in command arguments.
pub mod mentions;
/// The persistent message tracker and its state machine.
pub mod persistent_message;
/// The Discord-facing `ChatPlatform` seam and its serenity implementation.
pub mod platform;
/// Utilities for interacting with the Tenor GIF API.
pub mod tenor;
