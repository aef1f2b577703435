/*!
 * Mock recognizer for testing.
 *
 * - `MockRecognizer::returning(transcript)` - always yields the given transcript
 * - `MockRecognizer::failing(message)` - always fails with `CommandFailed`
 */

use async_trait::async_trait;
use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use crate::errors::RecognizerError;
use crate::recognizer::Recognizer;
use crate::transcript::Transcript;

/// Behavior mode for the mock recognizer
#[derive(Debug, Clone)]
pub enum MockBehavior {
    /// Return a clone of this transcript
    Returning(Transcript),
    /// Fail with this message
    Failing(String),
}

/// Mock recognizer that never spawns a process
#[derive(Debug, Clone)]
pub struct MockRecognizer {
    behavior: MockBehavior,
    call_count: Arc<AtomicUsize>,
}

impl MockRecognizer {
    pub fn new(behavior: MockBehavior) -> Self {
        Self {
            behavior,
            call_count: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub fn returning(transcript: Transcript) -> Self {
        Self::new(MockBehavior::Returning(transcript))
    }

    pub fn failing(message: impl Into<String>) -> Self {
        Self::new(MockBehavior::Failing(message.into()))
    }

    /// Number of transcribe calls so far, shared between clones
    pub fn call_count(&self) -> usize {
        self.call_count.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Recognizer for MockRecognizer {
    async fn transcribe(&self, _media_path: &Path) -> Result<Transcript, RecognizerError> {
        self.call_count.fetch_add(1, Ordering::SeqCst);

        match &self.behavior {
            MockBehavior::Returning(transcript) => Ok(transcript.clone()),
            MockBehavior::Failing(message) => Err(RecognizerError::CommandFailed(message.clone())),
        }
    }

    async fn check_available(&self) -> Result<(), RecognizerError> {
        match &self.behavior {
            MockBehavior::Returning(_) => Ok(()),
            MockBehavior::Failing(message) => Err(RecognizerError::NotAvailable(message.clone())),
        }
    }

    fn name(&self) -> &str {
        "mock"
    }
}
