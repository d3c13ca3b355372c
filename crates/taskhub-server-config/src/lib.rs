// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Configuration for the taskhub server.
//!
//! Layered from built-in defaults, an optional TOML file and
//! `TASKHUB_SERVER_*` environment variables, in increasing precedence.
//!
//! # Usage
//!
//! ```ignore
//! use taskhub_server_config::load_config;
//!
//! let config = load_config()?;
//! println!("Server listening on {}", config.socket_addr());
//! ```

pub mod error;
pub mod layer;
pub mod sections;
pub mod sources;

pub use error::ConfigError;
pub use layer::ServerConfigLayer;
pub use sections::*;
pub use sources::{ConfigSource, DefaultsSource, EnvSource, Precedence, TomlSource};

use tracing::{debug, info};

/// Fully resolved server configuration.
#[derive(Debug, Clone, Default)]
pub struct ServerConfig {
	pub http: HttpConfig,
	pub database: DatabaseConfig,
	pub logging: LoggingConfig,
	pub pagination: PaginationConfig,
}

impl ServerConfig {
	/// Get the socket address string for binding.
	pub fn socket_addr(&self) -> String {
		format!("{}:{}", self.http.host, self.http.port)
	}
}

/// Load configuration from all sources with standard precedence.
///
/// Precedence (highest to lowest):
/// 1. Environment variables (`TASKHUB_SERVER_*`)
/// 2. Config file (`/etc/taskhub/server.toml`)
/// 3. Built-in defaults
pub fn load_config() -> Result<ServerConfig, ConfigError> {
	load_from_sources(vec![
		Box::new(DefaultsSource),
		Box::new(TomlSource::system()),
		Box::new(EnvSource),
	])
}

/// Load configuration with a custom config file path.
pub fn load_config_with_file(
	config_path: impl Into<std::path::PathBuf>,
) -> Result<ServerConfig, ConfigError> {
	load_from_sources(vec![
		Box::new(DefaultsSource),
		Box::new(TomlSource::new(config_path)),
		Box::new(EnvSource),
	])
}

fn load_from_sources(mut sources: Vec<Box<dyn ConfigSource>>) -> Result<ServerConfig, ConfigError> {
	sources.sort_by_key(|s| s.precedence());

	let mut merged = ServerConfigLayer::default();
	for source in sources {
		debug!(source = source.name(), "loading configuration source");
		let layer = source.load()?;
		merged.merge(layer);
	}

	finalize(merged)
}

/// Finalize configuration layer into resolved config.
fn finalize(layer: ServerConfigLayer) -> Result<ServerConfig, ConfigError> {
	let http = layer.http.unwrap_or_default().finalize();
	let database = layer.database.unwrap_or_default().finalize();
	let logging = layer.logging.unwrap_or_default().finalize();
	let pagination = layer.pagination.unwrap_or_default().finalize();

	validate_config(&database, &pagination)?;

	info!(
		host = %http.host,
		port = http.port,
		database = %database.url,
		default_page_size = pagination.default_page_size,
		max_page_size = pagination.max_page_size,
		"Server configuration loaded"
	);

	Ok(ServerConfig {
		http,
		database,
		logging,
		pagination,
	})
}

/// Validate cross-field configuration rules.
fn validate_config(
	database: &DatabaseConfig,
	pagination: &PaginationConfig,
) -> Result<(), ConfigError> {
	if pagination.max_page_size == 0 || pagination.default_page_size == 0 {
		return Err(ConfigError::Validation(
			"page sizes must be greater than zero".to_string(),
		));
	}
	if pagination.default_page_size > pagination.max_page_size {
		return Err(ConfigError::Validation(format!(
			"default_page_size ({}) exceeds max_page_size ({})",
			pagination.default_page_size, pagination.max_page_size
		)));
	}
	if database.max_connections == 0 {
		return Err(ConfigError::Validation(
			"database max_connections must be greater than zero".to_string(),
		));
	}
	Ok(())
}

#[cfg(test)]
mod tests {
	use super::*;
	use proptest::prelude::*;
	use std::io::Write;

	/// A source that yields a fixed layer, standing in for the environment.
	struct FixedSource(Precedence, ServerConfigLayer);

	impl ConfigSource for FixedSource {
		fn name(&self) -> &'static str {
			"fixed"
		}

		fn precedence(&self) -> Precedence {
			self.0
		}

		fn load(&self) -> Result<ServerConfigLayer, ConfigError> {
			Ok(self.1.clone())
		}
	}

	fn pagination_layer(default: Option<u32>, max: Option<u32>) -> ServerConfigLayer {
		ServerConfigLayer {
			pagination: Some(PaginationConfigLayer {
				default_page_size: default,
				max_page_size: max,
			}),
			..Default::default()
		}
	}

	#[test]
	fn test_defaults_resolve_to_taskhub_settings() {
		let config = load_from_sources(vec![Box::new(DefaultsSource)]).unwrap();
		assert_eq!(config.socket_addr(), "0.0.0.0:8080");
		assert_eq!(config.database.url, "sqlite:./taskhub.db");
		assert_eq!(config.database.max_connections, 5);
		assert_eq!(config.pagination, PaginationConfig::default());
		assert!(!config.logging.json);
	}

	#[test]
	fn test_sources_apply_in_precedence_order_regardless_of_list_order() {
		let mut file = tempfile::NamedTempFile::new().unwrap();
		writeln!(file, "[pagination]\ndefault_page_size = 25\nmax_page_size = 40").unwrap();
		let config = load_from_sources(vec![
			Box::new(FixedSource(Precedence::Environment, pagination_layer(None, Some(60)))),
			Box::new(TomlSource::new(file.path())),
			Box::new(DefaultsSource),
		])
		.unwrap();
		assert_eq!(config.pagination.default_page_size, 25);
		assert_eq!(config.pagination.max_page_size, 60);
		assert_eq!(config.http.port, 8080);
	}

	#[test]
	fn test_default_page_size_above_file_max_fails() {
		let mut file = tempfile::NamedTempFile::new().unwrap();
		writeln!(file, "[pagination]\ndefault_page_size = 500").unwrap();
		let result = load_from_sources(vec![Box::new(TomlSource::new(file.path()))]);
		match result {
			Err(ConfigError::Validation(message)) => {
				assert!(message.contains("default_page_size (500) exceeds max_page_size (100)"))
			}
			other => panic!("expected validation error, got {other:?}"),
		}
	}

	#[test]
	fn test_env_can_lower_max_below_default() {
		let result = load_from_sources(vec![
			Box::new(DefaultsSource),
			Box::new(FixedSource(Precedence::Environment, pagination_layer(None, Some(5)))),
		]);
		assert!(matches!(result, Err(ConfigError::Validation(_))));
	}

	#[test]
	fn test_zero_page_sizes_are_rejected() {
		for (default, max) in [(0, 20), (10, 0)] {
			let pagination = PaginationConfig {
				default_page_size: default,
				max_page_size: max,
			};
			assert!(validate_config(&DatabaseConfig::default(), &pagination).is_err());
		}
	}

	#[test]
	fn test_zero_max_connections_is_rejected() {
		let database = DatabaseConfig {
			max_connections: 0,
			..Default::default()
		};
		let err = validate_config(&database, &PaginationConfig::default()).unwrap_err();
		assert!(err.to_string().contains("max_connections"));
	}

	proptest! {
		#[test]
		fn page_limits_validate_iff_default_within_max(default in 0u32..200, max in 0u32..200) {
			let pagination = PaginationConfig {
				default_page_size: default,
				max_page_size: max,
			};
			let ok = validate_config(&DatabaseConfig::default(), &pagination).is_ok();
			prop_assert_eq!(ok, default >= 1 && default <= max);
		}
	}
}
