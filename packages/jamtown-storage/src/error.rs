pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
	#[error(transparent)]
	Sqlx(#[from] sqlx::Error),
	#[error("{message}")]
	InvalidArgument { message: String },
	#[error("{message}")]
	Malformed { message: String },
}
