mod bus;
mod next;
mod tree_all;

pub use bus::{LinksAction, LinksKind, LinksMediatorRef, LinksOutput};
pub use next::NextLinksActor;
pub use tree_all::TreeAllLinksActor;
