// Headline/Rating generation: template set, random source, generator, HTTP handlers.
// The generator itself is synchronous and pure apart from the RNG it is handed.

pub mod generator;
pub mod handlers;
pub mod randomness;
pub mod templates;
