pub mod colors;
pub mod config;
pub mod error;
pub mod normalize;
pub mod pokemon;
pub mod raw;
pub mod routes;
pub mod selector;
pub mod session;
pub mod sources;
pub mod store;

pub use config::*;
pub use error::*;
pub use pokemon::*;
pub use selector::SourceSelector;
pub use sources::{Adapter, ApiSource, LocalFileAdapter, PokemonSource, RemoteApiAdapter};
