//! Alternative storage adapters

pub mod memory;

pub use memory::MemoryAccountRepository;
