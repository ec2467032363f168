use crate::error::MediaError;
use async_trait::async_trait;

/// Which track kinds to request from the capture layer.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct MediaConstraints {
    pub audio: bool,
    pub video: bool,
}

impl Default for MediaConstraints {
    fn default() -> Self {
        Self {
            audio: true,
            video: true,
        }
    }
}

/// A bundle of live local tracks.
///
/// Tracks are toggled in place; disabling never destroys the bundle and
/// never triggers renegotiation. `stop` releases the underlying devices
/// and must be idempotent.
pub trait MediaSource: Send + Sync {
    fn set_audio_enabled(&self, enabled: bool);
    fn set_video_enabled(&self, enabled: bool);
    fn stop(&self);
}

/// Capture capability (camera + microphone), injected by the platform.
#[async_trait]
pub trait MediaDevices: Send + Sync {
    async fn acquire(
        &self,
        constraints: MediaConstraints,
    ) -> Result<std::sync::Arc<dyn MediaSource>, MediaError>;
}
