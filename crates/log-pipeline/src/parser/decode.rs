//! 라인 디코딩 -- 원시 바이트를 UTF-8 텍스트로 변환합니다.
//!
//! 잘못된 바이트 시퀀스 처리는 [`DecodeErrorPolicy`]로 결정합니다.

use std::borrow::Cow;
use std::str::Utf8Error;

use clfstat_core::types::DecodeErrorPolicy;

/// 원시 라인 바이트를 정책에 따라 텍스트로 디코딩합니다.
///
/// 유효한 UTF-8이면 복사 없이 빌려온 문자열을 반환합니다.
/// `Fail` 정책에서만 에러를 반환합니다.
pub fn decode_line(raw: &[u8], policy: DecodeErrorPolicy) -> Result<Cow<'_, str>, Utf8Error> {
    match std::str::from_utf8(raw) {
        Ok(text) => Ok(Cow::Borrowed(text)),
        Err(e) => match policy {
            DecodeErrorPolicy::Fail => Err(e),
            DecodeErrorPolicy::Replace => Ok(String::from_utf8_lossy(raw)),
            DecodeErrorPolicy::Skip => {
                let mut text = String::with_capacity(raw.len());
                for chunk in raw.utf8_chunks() {
                    text.push_str(chunk.valid());
                }
                Ok(Cow::Owned(text))
            }
        },
    }
}
