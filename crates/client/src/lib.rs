pub mod api;
pub mod console;
pub mod session;
pub mod view;

pub use api::{ApiClient, ClientError};
pub use console::{parse_command, Command, ConsoleError};
pub use session::Session;
pub use view::render;
