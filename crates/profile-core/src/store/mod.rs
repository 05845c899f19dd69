// # Profile Store Implementations
//
// This module provides implementations of the ProfileStore trait that ship
// with the core. Networked stores live in the hosting application.

pub mod memory;

pub use memory::MemoryProfileStore;
