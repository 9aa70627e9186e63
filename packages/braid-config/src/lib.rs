mod error;
mod types;

pub use error::{Error, Result};
pub use types::{
	Config, Decomposition, Expansion, Generation, LlmProviderConfig, Orchestration, Providers,
	Rerank, RetrievalProviderConfig, Service, Verification,
};

use std::{fs, path::Path};

pub fn load(path: &Path) -> Result<Config> {
	let raw = fs::read_to_string(path)
		.map_err(|err| Error::ReadConfig { path: path.to_path_buf(), source: err })?;

	let mut cfg: Config = toml::from_str(&raw)
		.map_err(|err| Error::ParseConfig { path: path.to_path_buf(), source: err })?;

	normalize(&mut cfg);

	validate(&cfg)?;

	Ok(cfg)
}

pub fn validate(cfg: &Config) -> Result<()> {
	if cfg.service.log_level.trim().is_empty() {
		return Err(Error::Validation {
			message: "service.log_level must be non-empty.".to_string(),
		});
	}

	validate_llm_provider(&cfg.providers.completion, "providers.completion")?;
	validate_llm_provider(&cfg.providers.generation, "providers.generation")?;

	if cfg.providers.retrieval.api_base.trim().is_empty() {
		return Err(Error::Validation {
			message: "providers.retrieval.api_base must be non-empty.".to_string(),
		});
	}
	if cfg.providers.retrieval.top_k == 0 {
		return Err(Error::Validation {
			message: "providers.retrieval.top_k must be greater than zero.".to_string(),
		});
	}
	if cfg.providers.retrieval.timeout_ms == 0 {
		return Err(Error::Validation {
			message: "providers.retrieval.timeout_ms must be greater than zero.".to_string(),
		});
	}
	if cfg.orchestration.deadline_ms == 0 {
		return Err(Error::Validation {
			message: "orchestration.deadline_ms must be greater than zero.".to_string(),
		});
	}
	if cfg.orchestration.expansion.max_queries == 0 {
		return Err(Error::Validation {
			message: "orchestration.expansion.max_queries must be greater than zero.".to_string(),
		});
	}
	if cfg.orchestration.decomposition.max_sub_questions == 0 {
		return Err(Error::Validation {
			message: "orchestration.decomposition.max_sub_questions must be greater than zero."
				.to_string(),
		});
	}
	if cfg.orchestration.verification.max_candidates == 0 {
		return Err(Error::Validation {
			message: "orchestration.verification.max_candidates must be greater than zero."
				.to_string(),
		});
	}
	if cfg.orchestration.verification.concurrency == 0 {
		return Err(Error::Validation {
			message: "orchestration.verification.concurrency must be greater than zero."
				.to_string(),
		});
	}

	let rerank_mode = cfg.orchestration.rerank.mode.as_str();

	if !matches!(rerank_mode, "passthrough" | "score") {
		return Err(Error::Validation {
			message: "orchestration.rerank.mode must be one of passthrough or score.".to_string(),
		});
	}
	if cfg.orchestration.generation.max_context_docs == 0 {
		return Err(Error::Validation {
			message: "orchestration.generation.max_context_docs must be greater than zero."
				.to_string(),
		});
	}
	if cfg.orchestration.generation.stream_idle_timeout_ms == 0 {
		return Err(Error::Validation {
			message: "orchestration.generation.stream_idle_timeout_ms must be greater than zero."
				.to_string(),
		});
	}

	Ok(())
}

fn validate_llm_provider(provider: &LlmProviderConfig, table: &str) -> Result<()> {
	if provider.api_base.trim().is_empty() {
		return Err(Error::Validation { message: format!("{table}.api_base must be non-empty.") });
	}
	if provider.model.trim().is_empty() {
		return Err(Error::Validation { message: format!("{table}.model must be non-empty.") });
	}
	if provider.timeout_ms == 0 {
		return Err(Error::Validation {
			message: format!("{table}.timeout_ms must be greater than zero."),
		});
	}
	if !provider.temperature.is_finite() || provider.temperature < 0.0 {
		return Err(Error::Validation {
			message: format!("{table}.temperature must be a finite number, zero or greater."),
		});
	}

	Ok(())
}

fn normalize(cfg: &mut Config) {
	if cfg.service.log_level.trim().is_empty() {
		cfg.service.log_level = "info".to_string();
	}

	trim_trailing_slash(&mut cfg.providers.completion.api_base);
	trim_trailing_slash(&mut cfg.providers.generation.api_base);
	trim_trailing_slash(&mut cfg.providers.retrieval.api_base);
}

fn trim_trailing_slash(base: &mut String) {
	while base.ends_with('/') {
		base.pop();
	}
}
