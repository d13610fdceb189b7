// Adapters layer: concrete implementations for external systems (chat transport).

pub mod telegram;
