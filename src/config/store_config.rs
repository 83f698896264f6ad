//! 저장소 연결 및 실행 환경 설정 관리 모듈
//!
//! 환경 변수 기반으로 MongoDB 연결 정보와 실행 프로파일을 제공합니다.

use std::env;

use log::{error, info};

/// 애플리케이션 실행 환경
#[derive(Debug, Clone, PartialEq)]
pub enum Environment {
    Development,
    Test,
    Staging,
    Production,
}

impl Environment {
    /// 현재 실행 환경을 감지합니다.
    ///
    /// `ENVIRONMENT` 또는 `PROFILE` 환경 변수를 확인하며,
    /// 설정되지 않은 경우 `Development`를 기본값으로 사용합니다.
    pub fn current() -> Self {
        let name = env::var("ENVIRONMENT")
            .or_else(|_| env::var("PROFILE"))
            .unwrap_or_else(|_| "dev".to_string());

        Self::from_name(&name)
    }

    /// 문자열에서 Environment를 생성합니다. 알 수 없는 값은 `Production`입니다.
    pub fn from_name(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "development" | "dev" => Environment::Development,
            "test" | "testing" => Environment::Test,
            "staging" | "stage" => Environment::Staging,
            _ => Environment::Production,
        }
    }

    /// 환경별 기본 데이터베이스 이름
    pub fn default_database_name(&self) -> &'static str {
        match self {
            Environment::Development => "guild_store_dev",
            Environment::Test => "guild_store_test",
            Environment::Staging => "guild_store_staging",
            Environment::Production => "guild_store",
        }
    }
}

/// MongoDB 저장소 설정
pub struct StoreConfig;

impl StoreConfig {
    /// 프로파일에 맞는 `.env` 파일을 로드합니다.
    ///
    /// # Environment Variables
    ///
    /// * `PROFILE=dev` - .env.dev 파일 로드 (기본값)
    /// * `PROFILE=prod` - .env.prod 파일 로드
    /// * 기타 - 기본 .env 파일 로드
    pub fn load_env_file() {
        let profile = env::var("PROFILE").unwrap_or_else(|_| "dev".to_string());

        info!("Current profile: {}", profile);

        match profile.as_str() {
            "prod" => match dotenv::from_filename(".env.prod") {
                Ok(_) => info!(".env.prod 파일 로드 됨"),
                Err(e) => error!(".env.prod 파일 로드 실패: {}", e),
            },
            "dev" => match dotenv::from_filename(".env.dev") {
                Ok(_) => info!(".env.dev 파일 로드 됨"),
                Err(e) => error!(".env.dev 파일 로드 실패: {}", e),
            },
            _ => {
                dotenv::dotenv().ok();
                info!("기본 .env 파일 로드");
            }
        }
    }

    /// MongoDB 연결 URI
    ///
    /// - `MONGODB_URI` (기본값: "mongodb://localhost:27017")
    pub fn mongodb_uri() -> String {
        env::var("MONGODB_URI").unwrap_or_else(|_| "mongodb://localhost:27017".to_string())
    }

    /// 데이터베이스 이름
    ///
    /// - `DATABASE_NAME` (기본값: 환경별 이름, 개발 환경은 "guild_store_dev")
    pub fn database_name() -> String {
        env::var("DATABASE_NAME")
            .unwrap_or_else(|_| Environment::current().default_database_name().to_string())
    }

    /// 드라이버에 전달할 애플리케이션 이름 (모니터링 및 로깅용)
    ///
    /// - `MONGODB_APP_NAME` (기본값: "guild_store")
    pub fn app_name() -> String {
        env::var("MONGODB_APP_NAME").unwrap_or_else(|_| "guild_store".to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_environment_from_name() {
        assert_eq!(Environment::from_name("development"), Environment::Development);
        assert_eq!(Environment::from_name("DEV"), Environment::Development);
        assert_eq!(Environment::from_name("test"), Environment::Test);
        assert_eq!(Environment::from_name("stage"), Environment::Staging);
        assert_eq!(Environment::from_name("unknown"), Environment::Production);
    }

    #[test]
    fn test_default_database_name_per_environment() {
        assert_eq!(Environment::Development.default_database_name(), "guild_store_dev");
        assert_eq!(Environment::Test.default_database_name(), "guild_store_test");
        assert_eq!(Environment::Production.default_database_name(), "guild_store");
    }

    #[test]
    fn test_store_config_defaults() {
        if env::var("MONGODB_URI").is_err() {
            assert_eq!(StoreConfig::mongodb_uri(), "mongodb://localhost:27017");
        }

        if env::var("MONGODB_APP_NAME").is_err() {
            assert_eq!(StoreConfig::app_name(), "guild_store");
        }
    }
}
