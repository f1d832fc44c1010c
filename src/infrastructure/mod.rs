pub mod in_memory;
pub mod logging;
pub mod observability;
