//! 라이프사이클 명령 설정
//!
//! [`LifecycleConfig`]는 core의 [`CommandConfig`](shipyard_core::config::CommandConfig)와
//! [`CertbotConfig`](shipyard_core::config::CertbotConfig)에서 파생됩니다.

use shipyard_core::config::ShipyardConfig;

use crate::error::CommandError;

/// 라이프사이클 명령 설정
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LifecycleConfig {
    /// docker 실행 파일
    pub docker_bin: String,
    /// git 실행 파일
    pub git_bin: String,
    /// certbot 실행 파일
    pub certbot_bin: String,
    /// 인증서 등록 이메일
    pub certbot_email: String,
    /// staging 서버 사용 여부
    pub certbot_staging: bool,
}

impl Default for LifecycleConfig {
    fn default() -> Self {
        Self::from_core(&ShipyardConfig::default())
    }
}

impl LifecycleConfig {
    /// core 설정에서 라이프사이클 설정을 생성합니다.
    pub fn from_core(core: &ShipyardConfig) -> Self {
        Self {
            docker_bin: core.command.docker_bin.clone(),
            git_bin: core.command.git_bin.clone(),
            certbot_bin: core.command.certbot_bin.clone(),
            certbot_email: core.certbot.email.clone(),
            certbot_staging: core.certbot.staging,
        }
    }

    /// 설정값의 유효성을 검증합니다.
    pub fn validate(&self) -> Result<(), CommandError> {
        for (field, value) in [
            ("docker_bin", &self.docker_bin),
            ("git_bin", &self.git_bin),
            ("certbot_bin", &self.certbot_bin),
        ] {
            if value.trim().is_empty() {
                return Err(CommandError::InvalidArgument {
                    field: field.to_owned(),
                    reason: "must not be empty".to_owned(),
                });
            }
        }
        if !self.certbot_email.contains('@') {
            return Err(CommandError::InvalidArgument {
                field: "certbot_email".to_owned(),
                reason: format!("'{}' is not an email address", self.certbot_email),
            });
        }
        Ok(())
    }
}

/// 라이프사이클 설정 빌더
#[derive(Default)]
pub struct LifecycleConfigBuilder {
    config: LifecycleConfig,
}

impl LifecycleConfigBuilder {
    /// 새 빌더를 생성합니다.
    pub fn new() -> Self {
        Self::default()
    }

    /// docker 실행 파일을 설정합니다.
    pub fn docker_bin(mut self, bin: impl Into<String>) -> Self {
        self.config.docker_bin = bin.into();
        self
    }

    /// git 실행 파일을 설정합니다.
    pub fn git_bin(mut self, bin: impl Into<String>) -> Self {
        self.config.git_bin = bin.into();
        self
    }

    /// certbot 실행 파일을 설정합니다.
    pub fn certbot_bin(mut self, bin: impl Into<String>) -> Self {
        self.config.certbot_bin = bin.into();
        self
    }

    /// 인증서 등록 이메일을 설정합니다.
    pub fn certbot_email(mut self, email: impl Into<String>) -> Self {
        self.config.certbot_email = email.into();
        self
    }

    /// staging 서버 사용 여부를 설정합니다.
    pub fn certbot_staging(mut self, staging: bool) -> Self {
        self.config.certbot_staging = staging;
        self
    }

    /// 설정을 검증하고 빌드합니다.
    pub fn build(self) -> Result<LifecycleConfig, CommandError> {
        self.config.validate()?;
        Ok(self.config)
    }
}
