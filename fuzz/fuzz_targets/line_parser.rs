#![no_main]

use eventlens_core::config::ParserConfig;
use eventlens_core::pipeline::LogParser;
use eventlens_log_pipeline::parser::LineParser;
use libfuzzer_sys::fuzz_target;

const ANDROID_LINE_REGEX: &str = r"^(\d{2}-\d{2} \d{2}:\d{2}:\d{2}\.\d{3})\s+(\d+)\s+(\d+)\s+([VDIWEF])\s+([^:]+?)\s*:\s(.*)$";

fuzz_target!(|data: &[u8]| {
    let Ok(line) = std::str::from_utf8(data) else {
        return;
    };

    let config = ParserConfig {
        timestamp_format: "%m-%d %H:%M:%S%.3f".to_owned(),
        log_line_regex: ANDROID_LINE_REGEX.to_owned(),
        json_extraction: true,
        event_regex: r"(\{.*\})".to_owned(),
        ..ParserConfig::default()
    };
    let Ok(parser) = LineParser::new(&config) else {
        return;
    };

    // 크래시나 패닉 없이 Ok 또는 Err을 반환해야 한다
    let _ = parser.parse_line(line);
});
