pub mod context;
pub mod errors;
pub mod http;
pub mod models;
pub mod poll;
pub mod state;
pub mod tasks;

pub use context::{
    ClientConfig,
    ClientContext,
};
pub use errors::PanelError;
pub use state::PanelState;
