#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum TrackKind {
    Audio,
    Video,
}

#[derive(Debug, Clone, Eq, PartialEq)]
pub struct RemoteTrack {
    pub id: String,
    pub kind: TrackKind,
}

/// Snapshot of the remote track bundle as reported by the transport.
///
/// An empty set after a non-empty one means the remote stopped all its
/// tracks, which the session treats as a disconnect.
#[derive(Debug, Clone, Default, Eq, PartialEq)]
pub struct RemoteTrackSet {
    pub stream_id: String,
    pub tracks: Vec<RemoteTrack>,
}

impl RemoteTrackSet {
    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }
}
