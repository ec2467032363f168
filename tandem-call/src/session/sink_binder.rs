use crate::transport::RemoteTrackSet;
use std::sync::Arc;
use tracing::info;

/// External rendering capability, consumed when the transport reports a
/// live remote stream. Display details are out of scope.
pub trait MediaSink: Send + Sync {
    fn bind(&self, tracks: RemoteTrackSet);
    fn clear(&self);
}

#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum BinderOutcome {
    /// First non-empty track set: bound to the sink.
    Attached,
    /// Previously bound stream went empty: remote stopped all tracks.
    Detached,
    Ignored,
}

/// Binds the first non-empty remote track set to the sink and flags a
/// later empty set as the remote hanging up.
pub struct RemoteSinkBinder {
    sink: Arc<dyn MediaSink>,
    bound: bool,
}

impl RemoteSinkBinder {
    pub fn new(sink: Arc<dyn MediaSink>) -> Self {
        Self { sink, bound: false }
    }

    pub fn is_bound(&self) -> bool {
        self.bound
    }

    pub fn on_remote_tracks(&mut self, tracks: RemoteTrackSet) -> BinderOutcome {
        if !self.bound && !tracks.is_empty() {
            info!(
                "binding remote stream {} ({} tracks)",
                tracks.stream_id,
                tracks.tracks.len()
            );
            self.bound = true;
            self.sink.bind(tracks);
            return BinderOutcome::Attached;
        }

        if self.bound && tracks.is_empty() {
            info!("remote stream stopped");
            self.bound = false;
            self.sink.clear();
            return BinderOutcome::Detached;
        }

        BinderOutcome::Ignored
    }
}
