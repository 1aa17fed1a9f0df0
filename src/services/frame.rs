use crate::error::AppError;
use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use image::{ImageFormat, ImageReader};
use std::io::Cursor;

/// 디코딩/검증된 카메라 프레임. 인식기로 원본 인코딩 바이트를 그대로 넘긴다.
#[derive(Debug, Clone)]
pub struct Frame {
    pub bytes: Vec<u8>,
    pub width: u32,
    pub height: u32,
    pub format: ImageFormat,
}

impl Frame {
    pub fn to_base64(&self) -> String {
        STANDARD.encode(&self.bytes)
    }
}

/// base64 (또는 data URL) 문자열을 프레임으로 디코딩한다.
pub fn decode_frame(payload: &str, max_bytes: usize) -> Result<Frame, AppError> {
    let encoded = strip_data_url(payload.trim())?;
    let cleaned: String = encoded.chars().filter(|c| !c.is_whitespace()).collect();

    if cleaned.is_empty() {
        return Err(AppError::BadRequest("missing image".into()));
    }

    // 디코딩 전에 대략적인 크기로 먼저 거른다
    if cleaned.len() / 4 * 3 > max_bytes + 3 {
        return Err(too_large(max_bytes));
    }

    let bytes = STANDARD
        .decode(cleaned.as_bytes())
        .map_err(|e| AppError::BadRequest(format!("invalid base64 image: {e}")))?;

    if bytes.len() > max_bytes {
        return Err(too_large(max_bytes));
    }

    let format = image::guess_format(&bytes)
        .map_err(|_| AppError::BadRequest("unsupported image format".into()))?;
    // 헤더만 읽는다. 픽셀 디코딩은 인식 모델 쪽 일이다.
    let (width, height) = ImageReader::with_format(Cursor::new(&bytes), format)
        .into_dimensions()
        .map_err(|e| AppError::BadRequest(format!("invalid image data: {e}")))?;
    if width == 0 || height == 0 {
        return Err(AppError::BadRequest("empty image".into()));
    }

    Ok(Frame {
        bytes,
        width,
        height,
        format,
    })
}

/// "data:image/jpeg;base64,...." 접두사 제거
fn strip_data_url(payload: &str) -> Result<&str, AppError> {
    if !payload.starts_with("data:") {
        return Ok(payload);
    }
    payload
        .split_once(',')
        .map(|(_, data)| data)
        .ok_or_else(|| AppError::BadRequest("malformed data URL".into()))
}

fn too_large(max_bytes: usize) -> AppError {
    AppError::BadRequest(format!("image exceeds {max_bytes} bytes"))
}

#[cfg(test)]
pub(crate) fn encode_test_png(width: u32, height: u32) -> String {
    let img = image::DynamicImage::ImageRgb8(image::RgbImage::new(width, height));
    let mut buf = std::io::Cursor::new(Vec::new());
    img.write_to(&mut buf, ImageFormat::Png)
        .expect("png encoding should succeed");
    STANDARD.encode(buf.into_inner())
}
