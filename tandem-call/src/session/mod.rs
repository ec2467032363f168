mod call_command;
mod call_state;
mod session;
mod sink_binder;

pub use call_command::*;
pub use call_state::*;
pub use session::*;
pub use sink_binder::*;
