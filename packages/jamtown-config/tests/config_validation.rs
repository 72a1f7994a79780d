use std::{
	env, fs,
	path::PathBuf,
	sync::atomic::{AtomicU64, Ordering},
	time::{SystemTime, UNIX_EPOCH},
};

use toml::Value;

use jamtown_config::{Config, VECTOR_DIM};

const SAMPLE_CONFIG_TOML: &str = include_str!("fixtures/sample_config.toml");

fn sample_with(section: &[&str], key: &str, value: Value) -> String {
	let mut root: Value = toml::from_str(SAMPLE_CONFIG_TOML).expect("Failed to parse sample config.");
	let mut table = root.as_table_mut().expect("Sample config must be a table.");

	for name in section {
		table = table
			.get_mut(*name)
			.and_then(Value::as_table_mut)
			.unwrap_or_else(|| panic!("Sample config must include [{name}]."));
	}

	table.insert(key.to_string(), value);

	toml::to_string(&root).expect("Failed to render sample config.")
}

fn write_temp_config(payload: String) -> PathBuf {
	static COUNTER: AtomicU64 = AtomicU64::new(0);

	let nanos = SystemTime::now()
		.duration_since(UNIX_EPOCH)
		.expect("System time must be valid.")
		.as_nanos();
	let ordinal = COUNTER.fetch_add(1, Ordering::SeqCst);
	let pid = std::process::id();
	let mut path = env::temp_dir();

	path.push(format!("jamtown_config_test_{nanos}_{pid}_{ordinal}.toml"));

	fs::write(&path, payload).expect("Failed to write test config.");

	path
}

fn load_err(payload: String) -> String {
	let path = write_temp_config(payload);
	let result = jamtown_config::load(&path);

	fs::remove_file(&path).expect("Failed to remove test config.");

	result.expect_err("Expected a validation error.").to_string()
}

fn base_config() -> Config {
	toml::from_str(SAMPLE_CONFIG_TOML).expect("Failed to parse sample config.")
}

#[test]
fn sample_config_loads() {
	let path = write_temp_config(SAMPLE_CONFIG_TOML.to_string());
	let result = jamtown_config::load(&path);

	fs::remove_file(&path).expect("Failed to remove test config.");

	let cfg = result.expect("Sample config must be valid.");

	assert_eq!(cfg.storage.postgres.vector_dim, VECTOR_DIM);
	assert_eq!(cfg.providers.embedding.native_dim, 768);
	assert_eq!(cfg.retrieval.default_limit, 5);
}

#[test]
fn native_dim_above_vector_dim_is_fatal() {
	let message =
		load_err(sample_with(&["providers", "embedding"], "native_dim", Value::Integer(2_048)));

	assert!(
		message.contains("providers.embedding.native_dim (2048) must not exceed"),
		"Unexpected error message: {message}"
	);
}

#[test]
fn native_dim_equal_to_vector_dim_is_allowed() {
	let mut cfg = base_config();

	cfg.providers.embedding.native_dim = cfg.storage.postgres.vector_dim;

	assert!(jamtown_config::validate(&cfg).is_ok());
}

#[test]
fn default_limit_must_lie_within_bounds() {
	let message = load_err(sample_with(&["retrieval"], "default_limit", Value::Integer(11)));

	assert!(message.contains("retrieval.default_limit must lie between"), "{message}");
}

#[test]
fn min_limit_must_be_positive() {
	let mut cfg = base_config();

	cfg.retrieval.min_limit = 0;

	let err = jamtown_config::validate(&cfg).expect_err("Expected min_limit validation error.");

	assert!(err.to_string().contains("retrieval.min_limit must be greater than zero."));
}

#[test]
fn generation_api_key_must_be_present() {
	let message =
		load_err(sample_with(&["providers", "generation"], "api_key", Value::String("  ".into())));

	assert!(message.contains("Provider generation api_key must be non-empty."), "{message}");
}

#[test]
fn header_values_must_be_strings() {
	let mut cfg = base_config();

	cfg.providers.embedding.default_headers.insert("x-retries".to_string(), 3.into());

	let err = jamtown_config::validate(&cfg).expect_err("Expected header validation error.");

	assert!(err.to_string().contains("default_headers.x-retries must be a string."));
}

#[test]
fn optional_sections_fall_back_to_defaults() {
	let mut root: Value = toml::from_str(SAMPLE_CONFIG_TOML).expect("Failed to parse sample config.");
	let table = root.as_table_mut().expect("Sample config must be a table.");

	table.remove("retrieval");
	table.remove("prompt");
	table.remove("ingest");

	let cfg: Config = toml::from_str(&toml::to_string(&root).expect("Failed to render config."))
		.expect("Failed to parse trimmed config.");

	assert_eq!(
		(cfg.retrieval.min_limit, cfg.retrieval.default_limit, cfg.retrieval.max_limit),
		(3, 5, 10)
	);
	assert_eq!(cfg.prompt.preview_wrap_width, 100);
	assert_eq!(cfg.ingest.batch_size, 32);
	assert!(jamtown_config::validate(&cfg).is_ok());
}
