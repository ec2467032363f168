mod rendezvous_client;
mod signaling_channel;

pub use rendezvous_client::*;
pub use signaling_channel::*;
