//! 이벤트 수집 모듈 -- 로그 파일을 라인 단위로 읽어 [`LogEvent`](clfstat_core::types::LogEvent)를 만듭니다.
//!
//! # 구성
//! - [`LineReader`]: 원시 바이트 라인 읽기 (줄바꿈 제거, 라인 번호 부여)
//! - [`EventCollector`]: 디코딩 -> 매칭 -> 정규화를 라인마다 적용
//!
//! 라인은 파일 순서대로 처리되며, 결과 이벤트도 같은 순서를 유지합니다.
//! 패턴에 매칭되지 않는 라인은 조용히 버려집니다.

pub mod file;

pub use file::{EventCollector, open_input};

use std::io::{BufRead, ErrorKind};

/// 파일에서 읽은 원시 라인
///
/// 줄바꿈(`\n`, `\r\n`, `\r`)은 제거된 상태입니다.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RawLine<'a> {
    /// 1부터 시작하는 라인 번호
    pub number: usize,
    /// 원시 바이트 (디코딩 전)
    pub bytes: &'a [u8],
}

/// 바이트 단위 라인 리더
///
/// 내부 버퍼를 재사용하므로 반환된 [`RawLine`]은 다음 호출 전까지만 유효합니다.
pub struct LineReader<R> {
    reader: R,
    buf: Vec<u8>,
    line_number: usize,
}

impl<R: BufRead> LineReader<R> {
    /// 새 라인 리더를 생성합니다.
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            buf: Vec::with_capacity(512),
            line_number: 0,
        }
    }

    /// 다음 라인을 읽습니다. 파일 끝이면 `None`.
    ///
    /// 줄바꿈은 `\n`, `\r\n`, 단독 `\r` 세 가지를 모두 인식합니다.
    pub fn next_line(&mut self) -> std::io::Result<Option<RawLine<'_>>> {
        self.buf.clear();
        let mut read_any = false;

        loop {
            let chunk = match self.reader.fill_buf() {
                Ok(chunk) => chunk,
                Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                Err(e) => return Err(e),
            };
            if chunk.is_empty() {
                break;
            }
            read_any = true;

            match chunk.iter().position(|&b| b == b'\n' || b == b'\r') {
                Some(end) => {
                    let terminator = chunk[end];
                    self.buf.extend_from_slice(&chunk[..end]);
                    self.reader.consume(end + 1);
                    if terminator == b'\r' {
                        self.skip_lf_after_cr()?;
                    }
                    break;
                }
                None => {
                    let len = chunk.len();
                    self.buf.extend_from_slice(chunk);
                    self.reader.consume(len);
                }
            }
        }

        if !read_any {
            return Ok(None);
        }
        self.line_number += 1;

        Ok(Some(RawLine {
            number: self.line_number,
            bytes: &self.buf,
        }))
    }

    /// `\r` 바로 뒤의 `\n`을 소비합니다 (버퍼 경계에 걸친 `\r\n` 포함).
    fn skip_lf_after_cr(&mut self) -> std::io::Result<()> {
        loop {
            match self.reader.fill_buf() {
                Ok(next) => {
                    if next.first() == Some(&b'\n') {
                        self.reader.consume(1);
                    }
                    return Ok(());
                }
                Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                Err(e) => return Err(e),
            }
        }
    }

    /// 지금까지 읽은 라인 수
    pub fn lines_read(&self) -> usize {
        self.line_number
    }
}
