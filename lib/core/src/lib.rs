mod action;
mod actor;
mod bus;
mod error;
mod mediator;
#[cfg(test)]
mod test_utils;

pub use action::ActionKind;
pub use actor::{Actor, ActorRef};
pub use bus::{Bus, TestOutcome};
pub use error::{ActorError, ActorResult};
pub use mediator::{CombinableOutput, Mediator, MediatorCombine, MediatorFirst, MediatorRef};
