// Module layout for LogRouter.

// Input side
pub mod parser;
pub mod record;

// Output side
pub mod client;
pub mod dispatch;

// Wiring
pub mod conf;
pub mod pipeline;
pub mod runtime;
