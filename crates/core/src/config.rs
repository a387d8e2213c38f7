//! 설정 관리 — shipyard.toml 파싱 및 런타임 설정
//!
//! [`ShipyardConfig`]는 모든 크레이트의 설정을 담는 최상위 구조체입니다.
//!
//! # 설정 로딩 우선순위
//! 1. CLI 인자 (최고 우선)
//! 2. 환경변수 (`SHIPYARD_COMMAND_DOCKER_BIN=/usr/bin/docker` 형식)
//! 3. 설정 파일 (`shipyard.toml`)
//! 4. 기본값 (`Default` 구현)
//!
//! # 사용 예시
//! ```no_run
//! # async fn example() -> Result<(), shipyard_core::error::ShipyardError> {
//! use shipyard_core::config::ShipyardConfig;
//!
//! // 파일에서 로드 + 환경변수 오버라이드
//! let config = ShipyardConfig::load("shipyard.toml").await?;
//!
//! // TOML 문자열에서 직접 파싱
//! let config = ShipyardConfig::parse("[general]\nlog_level = \"debug\"")?;
//! # Ok(())
//! # }
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::{ConfigError, ShipyardError};

/// Shipyard 통합 설정
///
/// `shipyard.toml` 파일의 최상위 구조를 나타냅니다.
/// 각 크레이트는 자기 섹션만 읽어 사용합니다.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ShipyardConfig {
    /// 일반 설정
    #[serde(default)]
    pub general: GeneralConfig,
    /// 외부 명령 실행 설정
    #[serde(default)]
    pub command: CommandConfig,
    /// 프로젝트 디스크립터 설정
    #[serde(default)]
    pub topology: TopologyConfig,
    /// 인증서 발급 설정
    #[serde(default)]
    pub certbot: CertbotConfig,
}

impl ShipyardConfig {
    /// TOML 파일에서 설정을 로드하고 환경변수 오버라이드를 적용합니다.
    pub async fn load(path: impl AsRef<Path>) -> Result<Self, ShipyardError> {
        let mut config = Self::from_file(path).await?;
        config.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }

    /// TOML 파일을 읽고 파싱만 합니다 (환경변수 오버라이드, 검증 없음).
    ///
    /// 검증은 모든 오버라이드를 적용한 뒤 호출자가 수행합니다.
    pub async fn from_file(path: impl AsRef<Path>) -> Result<Self, ShipyardError> {
        let path = path.as_ref();
        let content = tokio::fs::read_to_string(path).await.map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                ShipyardError::Config(ConfigError::FileNotFound {
                    path: path.display().to_string(),
                })
            } else {
                ShipyardError::Io(e)
            }
        })?;
        Self::parse(&content)
    }

    /// TOML 문자열에서 설정을 파싱합니다.
    pub fn parse(toml_str: &str) -> Result<Self, ShipyardError> {
        toml::from_str(toml_str).map_err(|e| {
            ShipyardError::Config(ConfigError::ParseFailed {
                reason: e.to_string(),
            })
        })
    }

    /// 환경변수로 설정값을 오버라이드합니다.
    ///
    /// 환경변수 네이밍 규칙: `SHIPYARD_{SECTION}_{FIELD}`
    pub fn apply_env_overrides(&mut self) {
        override_string(&mut self.general.log_level, "SHIPYARD_GENERAL_LOG_LEVEL");
        override_string(&mut self.general.log_format, "SHIPYARD_GENERAL_LOG_FORMAT");

        override_string(&mut self.command.docker_bin, "SHIPYARD_COMMAND_DOCKER_BIN");
        override_string(&mut self.command.git_bin, "SHIPYARD_COMMAND_GIT_BIN");
        override_string(&mut self.command.certbot_bin, "SHIPYARD_COMMAND_CERTBOT_BIN");
        override_string(
            &mut self.command.workspace_root,
            "SHIPYARD_COMMAND_WORKSPACE_ROOT",
        );

        override_string(&mut self.topology.source, "SHIPYARD_TOPOLOGY_SOURCE");
        override_string(
            &mut self.topology.descriptor_path,
            "SHIPYARD_TOPOLOGY_DESCRIPTOR_PATH",
        );
        override_string(
            &mut self.topology.descriptor_container,
            "SHIPYARD_TOPOLOGY_DESCRIPTOR_CONTAINER",
        );

        override_string(&mut self.certbot.email, "SHIPYARD_CERTBOT_EMAIL");
        override_bool(&mut self.certbot.staging, "SHIPYARD_CERTBOT_STAGING");
    }

    /// 설정값의 유효성을 검증합니다.
    pub fn validate(&self) -> Result<(), ShipyardError> {
        let valid_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_levels.contains(&self.general.log_level.as_str()) {
            return Err(ConfigError::InvalidValue {
                field: "general.log_level".to_owned(),
                reason: format!("must be one of: {}", valid_levels.join(", ")),
            }
            .into());
        }

        let valid_formats = ["json", "pretty"];
        if !valid_formats.contains(&self.general.log_format.as_str()) {
            return Err(ConfigError::InvalidValue {
                field: "general.log_format".to_owned(),
                reason: format!("must be one of: {}", valid_formats.join(", ")),
            }
            .into());
        }

        for (field, value) in [
            ("command.docker_bin", &self.command.docker_bin),
            ("command.git_bin", &self.command.git_bin),
            ("command.workspace_root", &self.command.workspace_root),
            ("topology.descriptor_path", &self.topology.descriptor_path),
        ] {
            if value.trim().is_empty() {
                return Err(ConfigError::InvalidValue {
                    field: field.to_owned(),
                    reason: "must not be empty".to_owned(),
                }
                .into());
            }
        }

        let valid_sources = ["file", "container"];
        if !valid_sources.contains(&self.topology.source.as_str()) {
            return Err(ConfigError::InvalidValue {
                field: "topology.source".to_owned(),
                reason: format!("must be one of: {}", valid_sources.join(", ")),
            }
            .into());
        }

        // container 소스는 컨테이너 이름이 필요함
        if self.topology.source == "container" && self.topology.descriptor_container.is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "topology.descriptor_container".to_owned(),
                reason: "must not be empty when source is 'container'".to_owned(),
            }
            .into());
        }

        Ok(())
    }
}

/// 일반 설정
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    /// 로그 레벨 (trace, debug, info, warn, error)
    pub log_level: String,
    /// 로그 형식 (json, pretty)
    pub log_format: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_owned(),
            log_format: "pretty".to_owned(),
        }
    }
}

/// 외부 명령 실행 설정
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CommandConfig {
    /// docker 실행 파일
    pub docker_bin: String,
    /// git 실행 파일
    pub git_bin: String,
    /// certbot 실행 파일
    pub certbot_bin: String,
    /// 프로젝트 체크아웃 루트 디렉토리
    pub workspace_root: String,
}

impl Default for CommandConfig {
    fn default() -> Self {
        Self {
            docker_bin: "docker".to_owned(),
            git_bin: "git".to_owned(),
            certbot_bin: "certbot".to_owned(),
            workspace_root: "/var/lib/shipyard/projects".to_owned(),
        }
    }
}

/// 프로젝트 디스크립터 설정
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TopologyConfig {
    /// 디스크립터 소스 (file, container)
    pub source: String,
    /// 디스크립터 JSON 문서 경로
    pub descriptor_path: String,
    /// `source = "container"`일 때 문서를 읽어올 컨테이너
    pub descriptor_container: String,
}

impl Default for TopologyConfig {
    fn default() -> Self {
        Self {
            source: "file".to_owned(),
            descriptor_path: "/var/lib/shipyard/projects.json".to_owned(),
            descriptor_container: String::new(),
        }
    }
}

/// 인증서 발급 설정
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CertbotConfig {
    /// 등록 이메일
    pub email: String,
    /// staging 서버 사용 여부
    pub staging: bool,
}

impl Default for CertbotConfig {
    fn default() -> Self {
        Self {
            email: "admin@localhost".to_owned(),
            staging: false,
        }
    }
}

// --- 환경변수 오버라이드 헬퍼 ---

fn override_string(target: &mut String, env_key: &str) {
    if let Ok(val) = std::env::var(env_key) {
        *target = val;
    }
}

fn override_bool(target: &mut bool, env_key: &str) {
    if let Ok(val) = std::env::var(env_key) {
        match val.parse::<bool>() {
            Ok(parsed) => *target = parsed,
            Err(_) => warn!(
                env_key,
                value = val.as_str(),
                "failed to parse bool from env var, ignoring"
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_has_sane_values() {
        let config = ShipyardConfig::default();
        assert_eq!(config.general.log_level, "info");
        assert_eq!(config.general.log_format, "pretty");
        assert_eq!(config.command.docker_bin, "docker");
        assert_eq!(config.topology.source, "file");
        assert!(!config.certbot.staging);
    }

    #[test]
    fn default_config_passes_validation() {
        ShipyardConfig::default().validate().unwrap();
    }

    #[test]
    fn from_str_empty_toml_uses_defaults() {
        let config = ShipyardConfig::parse("").unwrap();
        assert_eq!(config.general.log_level, "info");
        assert_eq!(config.command.git_bin, "git");
    }

    #[test]
    fn from_str_partial_toml_merges_with_defaults() {
        let toml = r#"
[general]
log_level = "debug"

[topology]
source = "container"
descriptor_container = "shipyard-store"
"#;
        let config = ShipyardConfig::parse(toml).unwrap();
        assert_eq!(config.general.log_level, "debug");
        // log_format은 기본값 유지
        assert_eq!(config.general.log_format, "pretty");
        assert_eq!(config.topology.source, "container");
        assert_eq!(
            config.topology.descriptor_path,
            "/var/lib/shipyard/projects.json"
        );
        config.validate().unwrap();
    }

    #[test]
    fn from_str_invalid_toml_returns_error() {
        let err = ShipyardConfig::parse("invalid = [[[toml").unwrap_err();
        assert!(matches!(
            err,
            ShipyardError::Config(ConfigError::ParseFailed { .. })
        ));
    }

    #[test]
    fn validate_rejects_invalid_log_level() {
        let mut config = ShipyardConfig::default();
        config.general.log_level = "verbose".to_owned();
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("log_level"));
    }

    #[test]
    fn validate_rejects_invalid_log_format() {
        let mut config = ShipyardConfig::default();
        config.general.log_format = "xml".to_owned();
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("log_format"));
    }

    #[test]
    fn validate_rejects_empty_docker_bin() {
        let mut config = ShipyardConfig::default();
        config.command.docker_bin = "  ".to_owned();
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("docker_bin"));
    }

    #[test]
    fn validate_rejects_unknown_topology_source() {
        let mut config = ShipyardConfig::default();
        config.topology.source = "http".to_owned();
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("topology.source"));
    }

    #[test]
    fn validate_requires_container_for_container_source() {
        let mut config = ShipyardConfig::default();
        config.topology.source = "container".to_owned();
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("descriptor_container"));
    }

    #[test]
    fn env_override_string() {
        let mut val = "original".to_owned();
        // SAFETY: 이 키는 이 테스트에서만 사용됩니다.
        unsafe { std::env::set_var("TEST_SHIPYARD_STR", "overridden") };
        override_string(&mut val, "TEST_SHIPYARD_STR");
        assert_eq!(val, "overridden");
        unsafe { std::env::remove_var("TEST_SHIPYARD_STR") };
    }

    #[test]
    fn env_override_bool_invalid_keeps_original() {
        let mut val = false;
        // SAFETY: 이 키는 이 테스트에서만 사용됩니다.
        unsafe { std::env::set_var("TEST_SHIPYARD_BOOL_BAD", "not-a-bool") };
        override_bool(&mut val, "TEST_SHIPYARD_BOOL_BAD");
        assert!(!val);
        unsafe { std::env::remove_var("TEST_SHIPYARD_BOOL_BAD") };
    }

    #[test]
    fn env_override_missing_var_keeps_original() {
        let mut val = "original".to_owned();
        override_string(&mut val, "TEST_SHIPYARD_NONEXISTENT_12345");
        assert_eq!(val, "original");
    }

    #[test]
    fn config_serialize_roundtrip() {
        let config = ShipyardConfig::default();
        let toml_str = toml::to_string_pretty(&config).unwrap();
        let parsed = ShipyardConfig::parse(&toml_str).unwrap();
        assert_eq!(config.command.workspace_root, parsed.command.workspace_root);
        assert_eq!(config.certbot.email, parsed.certbot.email);
    }

    #[tokio::test]
    async fn from_file_defers_validation() {
        let dir = std::env::temp_dir().join(format!("shipyard-from-file-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("shipyard.toml");
        std::fs::write(&path, "[general]\nlog_level = \"verbose\"\n").unwrap();

        let mut config = ShipyardConfig::from_file(&path).await.unwrap();
        assert_eq!(config.general.log_level, "verbose");
        assert!(config.validate().is_err());

        config.general.log_level = "debug".to_owned();
        config.validate().unwrap();
    }

    #[tokio::test]
    async fn from_file_not_found() {
        let err = ShipyardConfig::from_file("/nonexistent/path/shipyard.toml")
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            ShipyardError::Config(ConfigError::FileNotFound { .. })
        ));
    }
}
