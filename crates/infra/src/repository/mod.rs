//! Schedule repository adapters

pub mod memory;

pub use memory::InMemoryScheduleRepository;
