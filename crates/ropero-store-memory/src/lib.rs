// # In-Memory Store Backends
//
// This crate provides in-memory implementations of the ropero store traits.
//
// ## Purpose
//
// Fast, dependency-free backends that don't persist across restarts.
// Useful for tests, demos, and embedded single-process deployments where
// the hosted document/blob services are unavailable or unnecessary.
//
// ## Crash Behavior
//
// - All documents and blobs are lost on restart/crash
// - No recovery possible (state is in-memory only)
//
// ## When to Use
//
// - Testing environments
// - Demos and local development
// - Embedded use where the remote backends are stubbed out

mod auth;
mod item;
mod media;

pub use auth::MemoryAuthSignal;
pub use item::MemoryItemStore;
pub use media::MemoryMediaStore;
