#![no_main]

use eventlens_core::config::{LogFormat, ParserConfig};
use eventlens_log_pipeline::parser::LogcatJsonParser;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Ok(text) = std::str::from_utf8(data) else {
        return;
    };

    let config = ParserConfig {
        format: LogFormat::LogcatJson,
        json_extraction: true,
        event_regex: r"(\{.*\})".to_owned(),
        ..ParserConfig::default()
    };
    let Ok(parser) = LogcatJsonParser::new(&config) else {
        return;
    };

    // 잘못된 문서는 Err, 타임스탬프 범위 초과는 None으로 처리되어야 함
    let _ = parser.parse_document(text);
});
