//! 로그 파싱 모듈 -- Common Log Format 라인 매칭, 필드 정규화, 바이트 디코딩
//!
//! # 구성
//! - [`ClfParser`]: 고정 패턴으로 라인에서 원본 필드를 추출 (라인 매처)
//! - [`normalize`]: 원본 필드를 [`LogEvent`](clfstat_core::types::LogEvent)로 변환 (필드 정규화)
//! - [`decode_line`]: 원시 바이트를 정책에 따라 UTF-8 텍스트로 디코딩
//!
//! # 사용 예시
//! ```ignore
//! use clfstat_log_pipeline::parser::{ClfParser, decode_line};
//! use clfstat_core::types::DecodeErrorPolicy;
//!
//! let parser = ClfParser::new()?;
//! let text = decode_line(raw_bytes, DecodeErrorPolicy::Skip)?;
//! if let Some(event) = parser.parse_line(&text)? {
//!     println!("{event}");
//! }
//! ```

pub mod clf;
pub mod decode;
pub mod normalize;

pub use clf::{ClfParser, RawFields};
pub use decode::decode_line;
pub use normalize::normalize;
