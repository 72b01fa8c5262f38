pub mod memory;

pub use memory::InMemoryAccountRepository;
