//! インメモリ Repository 実装

pub mod participant;

pub use participant::InMemoryParticipantRepository;
