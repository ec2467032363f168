use tandem_core::RoomId;

/// User-facing controls, delivered to the session loop over its command
/// channel. Exact UI is out of scope; these are the triggers it fires.
#[derive(Debug)]
pub enum CallCommand {
    CreateRoom,
    JoinRoom(RoomId),
    HangUp,
    SetAudioEnabled(bool),
    SetVideoEnabled(bool),
}
