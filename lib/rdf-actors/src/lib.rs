#![doc = include_str!("../README.md")]
#![doc(test(attr(deny(warnings))))]
#![cfg_attr(docsrs, feature(doc_auto_cfg))]

mod config;
mod engine;
mod error;

pub use config::EngineConfig;
pub use engine::{EngineBuilder, QueryEngine, QueryOperationActorFactory};
pub use error::EngineError;

pub mod model {
    pub use rdf_actors_model::*;
}

pub mod actors {
    pub use rdf_actors_core::*;
}

pub mod execution {
    pub use rdf_actors_engine::*;
}

pub mod hypermedia {
    pub use rdf_actors_hypermedia::*;
}

pub mod score {
    pub use rdf_actors_score::*;
}
