mod broker;
mod config;
mod logging;
mod server;
mod session;

pub use broker::Broker;
pub use config::Config;
pub use logging::init as init_logging;
pub use server::Server;
