//! 파이프라인 trait -- 로그 형식 확장 포인트 정의

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use tracing::{debug, info};

use crate::error::EventlensError;
use crate::types::LogEntry;

/// 로그 파서 trait
///
/// 새로운 로그 형식을 지원하려면 이 trait을 구현합니다.
/// 라인 단위 형식은 `parse_line`만 구현하면 되고,
/// 문서 단위 형식은 `parse_reader`를 재정의합니다.
pub trait LogParser: Send + Sync {
    /// 지원하는 로그 형식 이름
    fn format_name(&self) -> &str;

    /// 원시 라인 하나를 로그 엔트리로 파싱
    fn parse_line(&self, line: &str) -> Result<LogEntry, EventlensError>;

    /// 스트림 전체를 파싱합니다.
    ///
    /// 공백 라인과 파싱에 실패한 라인은 건너뛰고, 읽기 실패만 에러로 전파합니다.
    /// UTF-8이 아닌 바이트는 대체 문자로 바꿔 라인을 계속 처리합니다.
    fn parse_reader(&self, reader: &mut dyn BufRead) -> Result<Vec<LogEntry>, EventlensError> {
        let mut entries = Vec::new();
        let mut stats = ParseStats::default();

        let mut buf = Vec::new();
        loop {
            buf.clear();
            if reader.read_until(b'\n', &mut buf)? == 0 {
                break;
            }
            stats.lines += 1;

            let line = String::from_utf8_lossy(trim_line_ending(&buf));
            if line.trim().is_empty() {
                continue;
            }

            match self.parse_line(&line) {
                Ok(entry) => {
                    stats.parsed += 1;
                    debug!(line_no = stats.lines, entry = %entry, "parsed line");
                    entries.push(entry);
                }
                Err(e) => {
                    stats.skipped += 1;
                    debug!(line_no = stats.lines, error = %e, "skipping unparsable line");
                }
            }
        }

        info!(
            format = self.format_name(),
            total = stats.lines,
            parsed = stats.parsed,
            skipped = stats.skipped,
            "finished parsing log input"
        );
        Ok(entries)
    }

    /// 파일을 열어 `parse_reader`에 위임합니다.
    fn parse_file(&self, path: &Path) -> Result<Vec<LogEntry>, EventlensError> {
        let file = File::open(path)?;
        let mut reader = BufReader::new(file);
        self.parse_reader(&mut reader)
    }
}

/// 라인 끝의 `\n` 또는 `\r\n`을 제거합니다.
fn trim_line_ending(buf: &[u8]) -> &[u8] {
    let buf = buf.strip_suffix(b"\n").unwrap_or(buf);
    buf.strip_suffix(b"\r").unwrap_or(buf)
}

/// 스트림 파싱 진단용 카운터
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ParseStats {
    /// 읽은 전체 라인 수 (공백 라인 포함)
    pub lines: usize,
    /// 엔트리로 변환된 라인 수
    pub parsed: usize,
    /// 파싱 실패로 건너뛴 라인 수
    pub skipped: usize,
}
