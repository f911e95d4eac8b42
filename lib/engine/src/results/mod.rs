mod bindings;
mod quads;

pub use bindings::BindingsStream;
pub use quads::QuadStream;
