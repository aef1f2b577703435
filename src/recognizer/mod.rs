/*!
 * Speech recognizer backends.
 *
 * Recognition itself happens outside this crate. A recognizer turns a media file
 * into a [`Transcript`] by driving an external tool:
 * - `whisper`: the `whisper` command-line program
 * - `mock`: canned transcripts for tests
 */

use async_trait::async_trait;
use std::fmt::Debug;
use std::path::Path;

use crate::errors::RecognizerError;
use crate::transcript::Transcript;

/// Common trait for all recognizer backends
///
/// This trait defines the interface that the controller relies on, allowing
/// backends to be used interchangeably.
#[async_trait]
pub trait Recognizer: Send + Sync + Debug {
    /// Transcribe a media file into timestamped segments and words
    ///
    /// # Arguments
    /// * `media_path` - Video or audio file to transcribe
    ///
    /// # Returns
    /// * `Result<Transcript, RecognizerError>` - The transcript or an error
    async fn transcribe(&self, media_path: &Path) -> Result<Transcript, RecognizerError>;

    /// Check that the backend can be run
    async fn check_available(&self) -> Result<(), RecognizerError>;

    /// Short backend name for log messages
    fn name(&self) -> &str;
}

pub mod mock;
pub mod whisper;

pub use mock::MockRecognizer;
pub use whisper::WhisperCli;
