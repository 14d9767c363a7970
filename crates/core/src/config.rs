//! 설정 관리 -- 파서 설정과 퍼널 설정 YAML 로딩
//!
//! [`ParserConfig`]는 로그 라인을 엔트리로 바꾸는 방법을,
//! [`FunnelConfig`]는 순차 퍼널 단계 정의를 담습니다.
//!
//! # 설정 로딩 순서
//! 1. YAML 파일 읽기 (빈 경로, 없는 파일, 빈 파일은 에러)
//! 2. YAML 파싱
//! 3. 환경변수 오버라이드 (`EVENTLENS_PARSER_EVENT_REGEX=...` 형식, 파서 설정만)
//! 4. 기본값 보정 및 검증
//!
//! # 사용 예시
//! ```no_run
//! # fn example() -> Result<(), eventlens_core::error::EventlensError> {
//! use eventlens_core::config::{FunnelConfig, ParserConfig};
//!
//! let parser = ParserConfig::load("parser.yaml")?;
//! let funnel = FunnelConfig::load("funnel.yaml")?;
//!
//! // YAML 문자열에서 직접 파싱
//! let parser = ParserConfig::parse("json_extraction: true")?;
//! # Ok(())
//! # }
//! ```

use std::collections::{BTreeMap, HashSet};
use std::fmt;
use std::path::Path;
use std::str::FromStr;

use regex::Regex;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::error::{ConfigError, EventlensError};

/// 라인 구조 패턴과 이벤트 추출 패턴의 기본값 (라인 전체를 캡처)
pub const DEFAULT_LINE_REGEX: &str = "^(.*)$";

/// 퍼널 하나에 허용되는 최대 단계 수
pub const MAX_FUNNEL_STEPS: usize = 100;

/// 입력 로그 형식
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LogFormat {
    /// 라인 단위 텍스트 (라인 구조 정규식으로 분해)
    #[default]
    Plain,
    /// Android Studio `.logcat` JSON 문서
    LogcatJson,
}

impl fmt::Display for LogFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Plain => write!(f, "plain"),
            Self::LogcatJson => write!(f, "logcat-json"),
        }
    }
}

impl FromStr for LogFormat {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "plain" => Ok(Self::Plain),
            "logcat-json" | "logcat_json" => Ok(Self::LogcatJson),
            other => Err(ConfigError::InvalidValue {
                field: "format".to_owned(),
                reason: format!("unknown format '{other}', expected plain or logcat-json"),
            }),
        }
    }
}

/// 파서 설정
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParserConfig {
    /// 입력 형식
    pub format: LogFormat,
    /// chrono strftime 형식 (빈 문자열이면 타임스탬프를 파싱하지 않음)
    pub timestamp_format: String,
    /// 구조화 데이터를 추출할 정규식 (첫 번째 캡처 그룹 사용)
    pub event_regex: String,
    /// 구조화 데이터 추출 활성화 여부
    pub json_extraction: bool,
    /// 라인 구조 정규식 (timestamp, pid, tid, level, tag, message 순서의 캡처 그룹)
    pub log_line_regex: String,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            format: LogFormat::Plain,
            timestamp_format: String::new(),
            event_regex: DEFAULT_LINE_REGEX.to_owned(),
            json_extraction: false,
            log_line_regex: DEFAULT_LINE_REGEX.to_owned(),
        }
    }
}

impl ParserConfig {
    /// YAML 파일에서 설정을 로드하고 환경변수 오버라이드, 기본값 보정, 검증을 적용합니다.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, EventlensError> {
        let path = path.as_ref();
        let content = read_config_file(path)?;
        let mut config = Self::parse(&content)?;
        config.apply_env_overrides();
        config.apply_defaults();
        config.validate()?;
        info!(path = %path.display(), format = %config.format, "parser config loaded");
        Ok(config)
    }

    /// YAML 문자열에서 설정을 파싱합니다 (오버라이드와 검증 없음).
    pub fn parse(yaml: &str) -> Result<Self, EventlensError> {
        serde_yaml::from_str(yaml).map_err(|e| {
            EventlensError::Config(ConfigError::ParseFailed {
                reason: e.to_string(),
            })
        })
    }

    /// 환경변수로 설정값을 오버라이드합니다.
    ///
    /// 환경변수 네이밍 규칙: `EVENTLENS_PARSER_{FIELD}`
    pub fn apply_env_overrides(&mut self) {
        override_format(&mut self.format, "EVENTLENS_PARSER_FORMAT");
        override_string(
            &mut self.timestamp_format,
            "EVENTLENS_PARSER_TIMESTAMP_FORMAT",
        );
        override_string(&mut self.event_regex, "EVENTLENS_PARSER_EVENT_REGEX");
        override_bool(&mut self.json_extraction, "EVENTLENS_PARSER_JSON_EXTRACTION");
        override_string(&mut self.log_line_regex, "EVENTLENS_PARSER_LOG_LINE_REGEX");
    }

    /// 비어 있는 정규식 필드를 기본값으로 채웁니다.
    pub fn apply_defaults(&mut self) {
        if self.event_regex.is_empty() {
            self.event_regex = DEFAULT_LINE_REGEX.to_owned();
        }
        if self.log_line_regex.is_empty() {
            self.log_line_regex = DEFAULT_LINE_REGEX.to_owned();
        }
    }

    /// 두 정규식이 모두 컴파일되는지 검증합니다.
    pub fn validate(&self) -> Result<(), EventlensError> {
        let mut errors = Vec::new();
        check_regex(&mut errors, "event_regex", &self.event_regex);
        check_regex(&mut errors, "log_line_regex", &self.log_line_regex);
        into_result(errors)
    }
}

/// 퍼널 설정
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FunnelConfig {
    /// 퍼널 이름
    #[serde(default)]
    pub name: String,
    /// 순서가 있는 단계 목록
    #[serde(default)]
    pub steps: Vec<StepConfig>,
}

/// 퍼널 단계 정의
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StepConfig {
    /// 단계 이름 (퍼널 내에서 유일)
    #[serde(default)]
    pub name: String,
    /// 이벤트 매칭 정규식 (부분 일치)
    #[serde(default)]
    pub event_pattern: String,
    /// 구조화 데이터 속성명 → 값 정규식
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub required_properties: BTreeMap<String, String>,
}

impl StepConfig {
    /// 속성 조건 없는 단계를 생성합니다.
    pub fn new(name: impl Into<String>, event_pattern: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            event_pattern: event_pattern.into(),
            required_properties: BTreeMap::new(),
        }
    }

    /// 속성 조건을 추가합니다.
    pub fn with_property(mut self, key: impl Into<String>, pattern: impl Into<String>) -> Self {
        self.required_properties.insert(key.into(), pattern.into());
        self
    }
}

impl FunnelConfig {
    /// YAML 파일에서 퍼널 설정을 로드하고 검증합니다.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, EventlensError> {
        let path = path.as_ref();
        let content = read_config_file(path)?;
        let config = Self::parse(&content)?;
        config.validate()?;
        info!(
            path = %path.display(),
            funnel = %config.name,
            steps = config.steps.len(),
            "funnel config loaded"
        );
        Ok(config)
    }

    /// YAML 문자열에서 퍼널 설정을 파싱합니다 (검증 없음).
    pub fn parse(yaml: &str) -> Result<Self, EventlensError> {
        serde_yaml::from_str(yaml).map_err(|e| {
            EventlensError::Config(ConfigError::ParseFailed {
                reason: e.to_string(),
            })
        })
    }

    /// 퍼널 정의를 검증합니다.
    ///
    /// 모든 위반 사항을 모아 한 번에 보고합니다.
    pub fn validate(&self) -> Result<(), EventlensError> {
        let mut errors = Vec::new();

        if self.name.trim().is_empty() {
            errors.push(invalid("name", "funnel name must not be empty"));
        }

        if self.steps.is_empty() {
            errors.push(invalid("steps", "at least one step is required"));
        } else if self.steps.len() > MAX_FUNNEL_STEPS {
            errors.push(invalid(
                "steps",
                &format!(
                    "too many steps: {} (max: {MAX_FUNNEL_STEPS})",
                    self.steps.len()
                ),
            ));
        }

        let mut seen = HashSet::new();
        for (i, step) in self.steps.iter().enumerate() {
            let field = format!("steps[{i}]");

            if step.name.trim().is_empty() {
                errors.push(invalid(&format!("{field}.name"), "step name must not be empty"));
            } else if !seen.insert(step.name.as_str()) {
                errors.push(invalid(
                    &format!("{field}.name"),
                    &format!("duplicate step name '{}'", step.name),
                ));
            }

            if step.event_pattern.is_empty() {
                errors.push(invalid(
                    &format!("{field}.event_pattern"),
                    "event pattern must not be empty",
                ));
            } else {
                check_regex(&mut errors, &format!("{field}.event_pattern"), &step.event_pattern);
            }

            for (key, pattern) in &step.required_properties {
                if key.is_empty() {
                    errors.push(invalid(
                        &format!("{field}.required_properties"),
                        "property name must not be empty",
                    ));
                    continue;
                }
                let prop_field = format!("{field}.required_properties.{key}");
                if pattern.is_empty() {
                    errors.push(invalid(&prop_field, "property pattern must not be empty"));
                } else {
                    check_regex(&mut errors, &prop_field, pattern);
                }
            }
        }

        into_result(errors)
    }
}

/// 설정 파일을 읽습니다.
fn read_config_file(path: &Path) -> Result<String, EventlensError> {
    if path.as_os_str().is_empty() {
        return Err(invalid("path", "config file path is required").into());
    }

    debug!(path = %path.display(), "reading config file");
    let content = std::fs::read_to_string(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            EventlensError::Config(ConfigError::FileNotFound {
                path: path.display().to_string(),
            })
        } else {
            EventlensError::Io(e)
        }
    })?;

    if content.is_empty() {
        return Err(ConfigError::Empty {
            path: path.display().to_string(),
        }
        .into());
    }

    Ok(content)
}

fn invalid(field: &str, reason: &str) -> ConfigError {
    ConfigError::InvalidValue {
        field: field.to_owned(),
        reason: reason.to_owned(),
    }
}

fn check_regex(errors: &mut Vec<ConfigError>, field: &str, pattern: &str) {
    if let Err(e) = Regex::new(pattern) {
        errors.push(invalid(field, &format!("invalid regex '{pattern}': {e}")));
    }
}

fn into_result(mut errors: Vec<ConfigError>) -> Result<(), EventlensError> {
    match errors.len() {
        0 => Ok(()),
        1 => Err(errors.remove(0).into()),
        _ => Err(ConfigError::Multiple(errors).into()),
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

fn override_format(target: &mut LogFormat, env_key: &str) {
    if let Ok(val) = std::env::var(env_key) {
        match val.parse::<LogFormat>() {
            Ok(parsed) => *target = parsed,
            Err(_) => warn!(
                env_key,
                value = val.as_str(),
                "failed to parse log format from env var, ignoring"
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn two_step_funnel() -> FunnelConfig {
        FunnelConfig {
            name: "checkout".to_owned(),
            steps: vec![
                StepConfig::new("view", "product_view"),
                StepConfig::new("buy", "purchase").with_property("currency", "^(USD|EUR)$"),
            ],
        }
    }

    #[test]
    fn default_parser_config_has_sane_values() {
        let config = ParserConfig::default();
        assert_eq!(config.format, LogFormat::Plain);
        assert!(config.timestamp_format.is_empty());
        assert_eq!(config.event_regex, DEFAULT_LINE_REGEX);
        assert_eq!(config.log_line_regex, DEFAULT_LINE_REGEX);
        assert!(!config.json_extraction);
        config.validate().unwrap();
    }

    #[test]
    fn parse_partial_yaml_merges_with_defaults() {
        let config = ParserConfig::parse("json_extraction: true\n").unwrap();
        assert!(config.json_extraction);
        assert_eq!(config.log_line_regex, DEFAULT_LINE_REGEX);
        assert_eq!(config.format, LogFormat::Plain);
    }

    #[test]
    fn parse_logcat_format() {
        let config = ParserConfig::parse("format: logcat-json\n").unwrap();
        assert_eq!(config.format, LogFormat::LogcatJson);
    }

    #[test]
    fn parse_unknown_format_fails() {
        let err = ParserConfig::parse("format: syslog\n").unwrap_err();
        assert!(matches!(
            err,
            EventlensError::Config(ConfigError::ParseFailed { .. })
        ));
    }

    #[test]
    fn apply_defaults_fills_empty_regexes() {
        let mut config = ParserConfig::parse("event_regex: \"\"\nlog_line_regex: \"\"\n").unwrap();
        config.apply_defaults();
        assert_eq!(config.event_regex, DEFAULT_LINE_REGEX);
        assert_eq!(config.log_line_regex, DEFAULT_LINE_REGEX);
    }

    #[test]
    fn validate_reports_both_invalid_regexes() {
        let config = ParserConfig {
            event_regex: "(".to_owned(),
            log_line_regex: "[".to_owned(),
            ..ParserConfig::default()
        };
        let err = config.validate().unwrap_err();
        match err {
            EventlensError::Config(ConfigError::Multiple(errors)) => assert_eq!(errors.len(), 2),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn log_format_from_str() {
        assert_eq!("plain".parse::<LogFormat>().unwrap(), LogFormat::Plain);
        assert_eq!(
            "LOGCAT-JSON".parse::<LogFormat>().unwrap(),
            LogFormat::LogcatJson
        );
        assert!("xml".parse::<LogFormat>().is_err());
    }

    #[test]
    fn valid_funnel_passes() {
        two_step_funnel().validate().unwrap();
    }

    #[test]
    fn funnel_without_name_or_steps_reports_all() {
        let err = FunnelConfig::default().validate().unwrap_err();
        match err {
            EventlensError::Config(ConfigError::Multiple(errors)) => {
                assert_eq!(errors.len(), 2);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn funnel_duplicate_step_names_rejected() {
        let mut config = two_step_funnel();
        config.steps[1].name = "view".to_owned();
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("duplicate step name 'view'"));
    }

    #[test]
    fn funnel_invalid_event_pattern_rejected() {
        let mut config = two_step_funnel();
        config.steps[0].event_pattern = "([".to_owned();
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("steps[0].event_pattern"));
    }

    #[test]
    fn funnel_empty_event_pattern_rejected() {
        let mut config = two_step_funnel();
        config.steps[0].event_pattern.clear();
        assert!(config.validate().is_err());
    }

    #[test]
    fn funnel_invalid_property_pattern_rejected() {
        let mut config = two_step_funnel();
        config.steps[1]
            .required_properties
            .insert("amount".to_owned(), "(".to_owned());
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("required_properties.amount"));
    }

    #[test]
    fn funnel_empty_property_key_rejected() {
        let mut config = two_step_funnel();
        config.steps[0]
            .required_properties
            .insert(String::new(), "x".to_owned());
        assert!(config.validate().is_err());
    }

    #[test]
    fn funnel_step_limit_enforced() {
        let config = FunnelConfig {
            name: "long".to_owned(),
            steps: (0..=MAX_FUNNEL_STEPS)
                .map(|i| StepConfig::new(format!("s{i}"), "e"))
                .collect(),
        };
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("too many steps"));

        let config = FunnelConfig {
            name: "max".to_owned(),
            steps: (0..MAX_FUNNEL_STEPS)
                .map(|i| StepConfig::new(format!("s{i}"), "e"))
                .collect(),
        };
        config.validate().unwrap();
    }

    #[test]
    fn parse_funnel_yaml_preserves_step_order() {
        let yaml = r#"
name: onboarding
steps:
  - name: open
    event_pattern: app_open
  - name: signup
    event_pattern: sign_up
    required_properties:
      method: "email|google"
"#;
        let config = FunnelConfig::parse(yaml).unwrap();
        assert_eq!(config.name, "onboarding");
        let names: Vec<_> = config.steps.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["open", "signup"]);
        assert_eq!(
            config.steps[1].required_properties.get("method").map(String::as_str),
            Some("email|google")
        );
        config.validate().unwrap();
    }
}
