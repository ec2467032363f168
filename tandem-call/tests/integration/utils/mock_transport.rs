use async_trait::async_trait;
use std::sync::atomic::{AtomicBool, AtomicU32, Ordering};
use std::sync::{Arc, Mutex};
use tandem_call::{
    MediaSource, PeerTransport, TransportError, TransportEvent, TransportFactory,
};
use tandem_core::{NetworkCandidate, SessionDescription};
use tokio::sync::mpsc;

#[derive(Debug, Default)]
pub struct TransportLog {
    pub local_descriptions: Vec<SessionDescription>,
    pub remote_descriptions: Vec<SessionDescription>,
    pub applied_candidates: Vec<NetworkCandidate>,
}

/// Peer transport double recording every call made against it.
pub struct MockTransport {
    pub log: Mutex<TransportLog>,
    /// Event sender the session handed to the factory; tests use it to
    /// emit candidate/track/state events like a real transport would.
    pub events: mpsc::Sender<TransportEvent>,
    offers_created: AtomicU32,
    answers_created: AtomicU32,
    close_count: AtomicU32,
    fail_candidates: AtomicBool,
}

impl MockTransport {
    pub fn applied_candidates(&self) -> Vec<NetworkCandidate> {
        self.log.lock().unwrap().applied_candidates.clone()
    }

    pub fn remote_descriptions(&self) -> Vec<SessionDescription> {
        self.log.lock().unwrap().remote_descriptions.clone()
    }

    pub fn local_descriptions(&self) -> Vec<SessionDescription> {
        self.log.lock().unwrap().local_descriptions.clone()
    }

    pub fn close_count(&self) -> u32 {
        self.close_count.load(Ordering::SeqCst)
    }

    /// Make every subsequent add_candidate fail.
    pub fn fail_candidates(&self) {
        self.fail_candidates.store(true, Ordering::SeqCst);
    }
}

#[async_trait]
impl PeerTransport for MockTransport {
    async fn create_offer(&self) -> Result<SessionDescription, TransportError> {
        let n = self.offers_created.fetch_add(1, Ordering::SeqCst);
        Ok(SessionDescription::offer(format!("mock-offer-{}", n)))
    }

    async fn create_answer(&self) -> Result<SessionDescription, TransportError> {
        let n = self.answers_created.fetch_add(1, Ordering::SeqCst);
        Ok(SessionDescription::answer(format!("mock-answer-{}", n)))
    }

    async fn set_local_description(
        &self,
        description: SessionDescription,
    ) -> Result<(), TransportError> {
        self.log.lock().unwrap().local_descriptions.push(description);
        Ok(())
    }

    async fn set_remote_description(
        &self,
        description: SessionDescription,
    ) -> Result<(), TransportError> {
        self.log
            .lock()
            .unwrap()
            .remote_descriptions
            .push(description);
        Ok(())
    }

    async fn add_candidate(&self, candidate: NetworkCandidate) -> Result<(), TransportError> {
        if self.fail_candidates.load(Ordering::SeqCst) {
            return Err(TransportError::CandidateRejected("mock rejection".into()));
        }
        self.log.lock().unwrap().applied_candidates.push(candidate);
        Ok(())
    }

    async fn close(&self) {
        self.close_count.fetch_add(1, Ordering::SeqCst);
    }
}

pub struct MockTransportFactory {
    created: Mutex<Vec<Arc<MockTransport>>>,
    fail_create: AtomicBool,
}

impl MockTransportFactory {
    pub fn new() -> Arc<Self> {
        Arc::new(Self {
            created: Mutex::new(Vec::new()),
            fail_create: AtomicBool::new(false),
        })
    }

    pub fn fail_create(&self) {
        self.fail_create.store(true, Ordering::SeqCst);
    }

    pub fn created_count(&self) -> usize {
        self.created.lock().unwrap().len()
    }

    pub fn last(&self) -> Arc<MockTransport> {
        self.created
            .lock()
            .unwrap()
            .last()
            .cloned()
            .expect("no transport created yet")
    }
}

#[async_trait]
impl TransportFactory for MockTransportFactory {
    async fn create(
        &self,
        _source: Arc<dyn MediaSource>,
        events: mpsc::Sender<TransportEvent>,
    ) -> Result<Arc<dyn PeerTransport>, TransportError> {
        if self.fail_create.load(Ordering::SeqCst) {
            return Err(TransportError::Setup("mock factory failure".into()));
        }

        let transport = Arc::new(MockTransport {
            log: Mutex::new(TransportLog::default()),
            events,
            offers_created: AtomicU32::new(0),
            answers_created: AtomicU32::new(0),
            close_count: AtomicU32::new(0),
            fail_candidates: AtomicBool::new(false),
        });
        self.created.lock().unwrap().push(transport.clone());
        Ok(transport)
    }
}
