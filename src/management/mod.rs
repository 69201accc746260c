mod session;

pub use session::Session;
pub use session::SessionFile;
pub use session::SessionManager;
