mod session;
mod summary;
mod user;

pub use session::*;
pub use summary::*;
pub use user::*;
