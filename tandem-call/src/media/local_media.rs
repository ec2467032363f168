use crate::error::MediaError;
use crate::media::{MediaConstraints, MediaDevices, MediaSource};
use std::sync::Arc;
use tracing::{debug, info};

/// Owns the local capture source for the duration of one session.
///
/// Mute/video-toggle are in-place track switches; neither reacquires the
/// devices nor touches negotiation. `release` runs on every teardown
/// path and tolerates being called more than once.
pub struct LocalMediaManager {
    devices: Arc<dyn MediaDevices>,
    source: Option<Arc<dyn MediaSource>>,
}

impl LocalMediaManager {
    pub fn new(devices: Arc<dyn MediaDevices>) -> Self {
        Self {
            devices,
            source: None,
        }
    }

    /// Ensures a local source exists; a second call with a source already
    /// held is a no-op.
    pub async fn acquire(&mut self, constraints: MediaConstraints) -> Result<(), MediaError> {
        if self.source.is_some() {
            debug!("local source already acquired");
            return Ok(());
        }

        let source = self.devices.acquire(constraints).await?;
        info!(
            "local media acquired (audio: {}, video: {})",
            constraints.audio, constraints.video
        );
        self.source = Some(source);
        Ok(())
    }

    pub fn source(&self) -> Option<Arc<dyn MediaSource>> {
        self.source.clone()
    }

    pub fn set_audio_enabled(&self, enabled: bool) {
        if let Some(source) = &self.source {
            debug!("outgoing audio enabled: {}", enabled);
            source.set_audio_enabled(enabled);
        }
    }

    pub fn set_video_enabled(&self, enabled: bool) {
        if let Some(source) = &self.source {
            debug!("outgoing video enabled: {}", enabled);
            source.set_video_enabled(enabled);
        }
    }

    /// Stops and drops the source. Idempotent.
    pub fn release(&mut self) {
        if let Some(source) = self.source.take() {
            info!("releasing local media");
            source.stop();
        }
    }
}
