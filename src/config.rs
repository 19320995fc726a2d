use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::analysis::context::Context;
use crate::error::{Result, SignalLabError};

pub const DEFAULT_STAKES: u8 = 7;
pub const DEFAULT_LOG_LEVEL: &str = "signal_lab=info";

/// What the analyzing party is trying to achieve in the conversation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Objective {
    BuildRapport,
    SecureMeeting,
    CloseDeal,
    ResolveConflict,
    OfferSupport,
    Collaborate,
}

impl Objective {
    /// Objective assumed when none is configured
    pub fn for_context(context: Context) -> Self {
        match context {
            Context::Business => Objective::SecureMeeting,
            Context::CreativeCollab => Objective::Collaborate,
            Context::Conflict => Objective::ResolveConflict,
            Context::Negotiation => Objective::CloseDeal,
            Context::SupportSeeking => Objective::OfferSupport,
            Context::Romantic | Context::Friendship | Context::General => Objective::BuildRapport,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Objective::BuildRapport => "Build Rapport",
            Objective::SecureMeeting => "Secure Meeting",
            Objective::CloseDeal => "Close Deal",
            Objective::ResolveConflict => "Resolve Conflict",
            Objective::OfferSupport => "Offer Support",
            Objective::Collaborate => "Collaborate",
        }
    }
}

impl fmt::Display for Objective {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Objective {
    type Err = SignalLabError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let norm = s.trim().to_lowercase().replace(['-', ' '], "_");
        match norm.as_str() {
            "build_rapport" | "rapport" => Ok(Objective::BuildRapport),
            "secure_meeting" | "meeting" => Ok(Objective::SecureMeeting),
            "close_deal" | "deal" => Ok(Objective::CloseDeal),
            "resolve_conflict" => Ok(Objective::ResolveConflict),
            "offer_support" | "support" => Ok(Objective::OfferSupport),
            "collaborate" => Ok(Objective::Collaborate),
            _ => Err(SignalLabError::InvalidParams {
                message: format!("unknown objective '{}'", s),
            }),
        }
    }
}

/// Output rendering for the CLI
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Json,
    Text,
}

impl FromStr for OutputFormat {
    type Err = SignalLabError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "json" => Ok(OutputFormat::Json),
            "text" => Ok(OutputFormat::Text),
            _ => Err(SignalLabError::InvalidParams {
                message: format!("unknown output format '{}'", s),
            }),
        }
    }
}

/// Per-invocation analysis settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    /// 1..=10
    pub stakes: u8,
    pub context_override: Option<Context>,
    pub objective_override: Option<Objective>,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            stakes: DEFAULT_STAKES,
            context_override: None,
            objective_override: None,
        }
    }
}

impl AnalysisConfig {
    pub fn validate(&self) -> Result<()> {
        if !(1..=10).contains(&self.stakes) {
            return Err(SignalLabError::Validation {
                message: format!("stakes must be between 1 and 10, got {}", self.stakes),
            });
        }
        Ok(())
    }

    /// Configured objective, or the one implied by the detected context
    pub fn objective_for(&self, context: Context) -> Objective {
        self.objective_override
            .unwrap_or_else(|| Objective::for_context(context))
    }
}

/// Process-level settings that do not affect analysis results
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RuntimeConfig {
    pub log_level: String,
    pub format: OutputFormat,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            log_level: DEFAULT_LOG_LEVEL.to_string(),
            format: OutputFormat::default(),
        }
    }
}

/// Main configuration loaded from signal_lab.toml and environment variables
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub analysis: AnalysisConfig,
    pub runtime: RuntimeConfig,
}

fn parse_override<T: FromStr>(
    var: &str,
    value: Option<String>,
    warnings: &mut Vec<String>,
) -> Option<T> {
    let raw = value?;
    match raw.parse::<T>() {
        Ok(v) => Some(v),
        Err(_) => {
            warnings.push(format!("Ignoring invalid {}={}", var, raw));
            None
        }
    }
}

impl Config {
    /// Load configuration from TOML file and environment variables.
    /// Uses SIGNAL_LAB_CONFIG or defaults to "signal_lab.toml".
    pub fn load() -> Result<Self> {
        let (config, warnings) = Self::load_with_warnings()?;
        for warning in &warnings {
            tracing::warn!("{}", warning);
        }
        Ok(config)
    }

    /// Same as [`Config::load`], but hands back the warnings instead of
    /// logging them, for callers that install logging from the loaded config.
    pub fn load_with_warnings() -> Result<(Self, Vec<String>)> {
        let _ = dotenvy::dotenv();

        let config_path = std::env::var("SIGNAL_LAB_CONFIG")
            .unwrap_or_else(|_| "signal_lab.toml".to_string());

        let mut warnings = Vec::new();
        let mut config: Config = if let Ok(content) = std::fs::read_to_string(&config_path) {
            Self::from_toml(&content)?
        } else {
            warnings.push(format!("Config file {} not found, using defaults", config_path));
            Self::default()
        };

        warnings.extend(config.apply_overrides(|key| std::env::var(key).ok()));
        config.analysis.validate()?;
        Ok((config, warnings))
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        let config: Config = toml::from_str(content)?;
        config.analysis.validate()?;
        Ok(config)
    }

    /// Apply SIGNAL_LAB_* overrides from `lookup`. Values that fail to parse
    /// or are out of range are skipped; a warning for each is returned.
    pub fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) -> Vec<String> {
        let mut warnings = Vec::new();
        if let Some(stakes) =
            parse_override::<u8>("SIGNAL_LAB_STAKES", lookup("SIGNAL_LAB_STAKES"), &mut warnings)
        {
            if (1..=10).contains(&stakes) {
                self.analysis.stakes = stakes;
            } else {
                warnings.push(format!(
                    "SIGNAL_LAB_STAKES={} out of range 1-10, keeping {}",
                    stakes, self.analysis.stakes
                ));
            }
        }
        if let Some(ctx) = parse_override::<Context>(
            "SIGNAL_LAB_CONTEXT",
            lookup("SIGNAL_LAB_CONTEXT"),
            &mut warnings,
        ) {
            self.analysis.context_override = Some(ctx);
        }
        if let Some(obj) = parse_override::<Objective>(
            "SIGNAL_LAB_OBJECTIVE",
            lookup("SIGNAL_LAB_OBJECTIVE"),
            &mut warnings,
        ) {
            self.analysis.objective_override = Some(obj);
        }
        if let Some(level) = lookup("SIGNAL_LAB_LOG") {
            self.runtime.log_level = level;
        }
        if let Some(format) = parse_override::<OutputFormat>(
            "SIGNAL_LAB_FORMAT",
            lookup("SIGNAL_LAB_FORMAT"),
            &mut warnings,
        ) {
            self.runtime.format = format;
        }
        warnings
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.analysis.stakes, DEFAULT_STAKES);
        assert_eq!(config.runtime.log_level, DEFAULT_LOG_LEVEL);
        assert_eq!(config.runtime.format, OutputFormat::Json);
        assert!(config.analysis.validate().is_ok());
    }

    #[test]
    fn test_stakes_validation() {
        let cfg = AnalysisConfig {
            stakes: 0,
            ..Default::default()
        };
        assert!(matches!(cfg.validate(), Err(SignalLabError::Validation { .. })));
        let cfg = AnalysisConfig {
            stakes: 11,
            ..Default::default()
        };
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn test_from_toml_partial() {
        let config = Config::from_toml(
            r#"
            [analysis]
            stakes = 9
            context_override = "business"

            [runtime]
            format = "text"
            "#,
        )
        .unwrap();
        assert_eq!(config.analysis.stakes, 9);
        assert_eq!(config.analysis.context_override, Some(Context::Business));
        assert_eq!(config.analysis.objective_override, None);
        assert_eq!(config.runtime.format, OutputFormat::Text);
        assert_eq!(config.runtime.log_level, DEFAULT_LOG_LEVEL);
    }

    #[test]
    fn test_from_toml_rejects_bad_stakes() {
        let err = Config::from_toml("[analysis]\nstakes = 42\n").unwrap_err();
        assert!(matches!(err, SignalLabError::Validation { .. }));
        let err = Config::from_toml("[analysis\n").unwrap_err();
        assert!(matches!(err, SignalLabError::Config { .. }));
    }

    #[test]
    fn test_env_overrides() {
        let env: HashMap<&str, &str> = HashMap::from([
            ("SIGNAL_LAB_STAKES", "3"),
            ("SIGNAL_LAB_CONTEXT", "creative"),
            ("SIGNAL_LAB_OBJECTIVE", "close-deal"),
            ("SIGNAL_LAB_LOG", "signal_lab=debug"),
            ("SIGNAL_LAB_FORMAT", "TEXT"),
        ]);
        let mut config = Config::default();
        let warnings = config.apply_overrides(|k| env.get(k).map(|v| v.to_string()));
        assert!(warnings.is_empty());
        assert_eq!(config.analysis.stakes, 3);
        assert_eq!(config.analysis.context_override, Some(Context::CreativeCollab));
        assert_eq!(config.analysis.objective_override, Some(Objective::CloseDeal));
        assert_eq!(config.runtime.log_level, "signal_lab=debug");
        assert_eq!(config.runtime.format, OutputFormat::Text);
    }

    #[test]
    fn test_invalid_env_overrides_ignored() {
        let env: HashMap<&str, &str> = HashMap::from([
            ("SIGNAL_LAB_STAKES", "99"),
            ("SIGNAL_LAB_CONTEXT", "astrology"),
            ("SIGNAL_LAB_FORMAT", "yaml"),
        ]);
        let mut config = Config::default();
        let warnings = config.apply_overrides(|k| env.get(k).map(|v| v.to_string()));
        assert_eq!(config, Config::default());
        assert_eq!(warnings.len(), 3);
        assert!(warnings.iter().any(|w| w.contains("SIGNAL_LAB_STAKES=99 out of range")));
        assert!(warnings.contains(&"Ignoring invalid SIGNAL_LAB_CONTEXT=astrology".to_string()));
        assert!(warnings.contains(&"Ignoring invalid SIGNAL_LAB_FORMAT=yaml".to_string()));
    }

    #[test]
    fn test_objective_inference() {
        let cfg = AnalysisConfig::default();
        assert_eq!(cfg.objective_for(Context::Business), Objective::SecureMeeting);
        assert_eq!(cfg.objective_for(Context::General), Objective::BuildRapport);
        let cfg = AnalysisConfig {
            objective_override: Some(Objective::OfferSupport),
            ..Default::default()
        };
        assert_eq!(cfg.objective_for(Context::Business), Objective::OfferSupport);
    }
}
