/// Why a session ended in `Failed`. Retained after the machine returns
/// to `Idle` so the user-facing status can name the cause.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum FailureReason {
    MediaUnavailable,
    SignalingUnavailable,
    NegotiationRejected,
    NegotiationTimeout,
    TransportFailed,
    PeerLeft,
}

/// Call lifecycle as a tagged union so illegal flag combinations are
/// unrepresentable. Exactly one value per session; all transitions go
/// through the session loop.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum CallState {
    Idle,
    AwaitingMedia,
    Negotiating,
    Active,
    Ending,
    Failed(FailureReason),
}

impl CallState {
    pub fn label(&self) -> &'static str {
        match self {
            CallState::Idle => "idle",
            CallState::AwaitingMedia => "awaiting-media",
            CallState::Negotiating => "negotiating",
            CallState::Active => "active",
            CallState::Ending => "ending",
            CallState::Failed(_) => "failed",
        }
    }

    /// Legal transitions of the lifecycle graph. `Failed` is reachable
    /// from anywhere (unrecoverable errors); `Idle` only via cleanup.
    pub fn may_enter(&self, next: &CallState) -> bool {
        use CallState::*;
        match (self, next) {
            (_, Failed(_)) => true,
            (Idle, AwaitingMedia) => true,
            (AwaitingMedia, Negotiating) => true,
            (Negotiating, Active) => true,
            (Negotiating | Active, Ending) => true,
            (Ending | Failed(_), Idle) => true,
            _ => false,
        }
    }
}
