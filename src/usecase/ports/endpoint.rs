use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransportError {
    #[error("endpoint `{0}` does not exist")]
    UnknownEndpoint(String),
    #[error("request failed: {0}")]
    Request(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Download {
    pub file_name: String,
    pub bytes: Vec<u8>,
}

/// Request/response boundary between the admin screens and the list endpoints.
///
/// `post` takes form pairs and answers with a JSON body; `download` answers
/// with a binary document. A `TransportError` means the request never got
/// an answer, while application failures come back as `success: false`.
pub trait AdminEndpoint: Send + Sync {
    fn post(&self, endpoint: &str, form: &[(String, String)]) -> Result<String, TransportError>;
    fn download(
        &self,
        endpoint: &str,
        form: &[(String, String)],
    ) -> Result<Download, TransportError>;
}
