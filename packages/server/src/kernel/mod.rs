// Kernel - shared infrastructure wiring for the domains

pub mod deps;

pub use deps::ServerDeps;
