pub mod error;
pub mod error_page;
pub mod handlers;
pub mod router;
pub mod server;
pub mod state;
pub mod templates;
pub mod validation;

pub use router::build_router;
pub use server::WebServer;
pub use state::{AppState, SharedState};
pub use templates::Templates;
