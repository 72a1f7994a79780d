pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
	#[error("Encoding error: {message}")]
	Encoding { message: String },
	#[error("Retrieval error: {message}")]
	Retrieval { message: String },
	#[error("Upstream generation error: {message}")]
	UpstreamGeneration { message: String },
	/// `field` names the offending request field when there is one.
	#[error("Invalid request: {message}")]
	InvalidRequest { field: Option<String>, message: String },
	#[error("Ingestion error: {message}")]
	Ingestion { message: String },
}
impl From<jamtown_storage::Error> for Error {
	fn from(err: jamtown_storage::Error) -> Self {
		Self::Retrieval { message: err.to_string() }
	}
}
