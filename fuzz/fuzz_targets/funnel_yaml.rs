#![no_main]

use eventlens_core::config::FunnelConfig;
use eventlens_log_pipeline::FunnelAnalyzer;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // YAML 파서는 &str을 받으므로 UTF-8 변환 필요
    let Ok(yaml_str) = std::str::from_utf8(data) else {
        return;
    };
    let Ok(config) = FunnelConfig::parse(yaml_str) else {
        return;
    };

    // 검증을 통과한 설정은 반드시 컴파일되어야 한다
    if config.validate().is_ok() {
        assert!(FunnelAnalyzer::new(&config).is_ok());
    }
});
