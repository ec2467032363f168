mod peer_transport;
mod track_set;
mod transport_event;

pub use peer_transport::*;
pub use track_set::*;
pub use transport_event::*;
