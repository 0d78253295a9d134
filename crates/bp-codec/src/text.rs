use base64::engine::general_purpose::STANDARD;
use base64::{DecodeError, Engine as _};
use bp_core::{Error, RgbaImage, buffer_len};

/// Characters produced per sample by [`Encoding::PerSample`].
const SAMPLE_CHARS: usize = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "snake_case")
)]
pub enum Encoding {
    PerSample,
    #[default]
    Packed,
}

impl Encoding {
    pub fn name(self) -> &'static str {
        match self {
            Self::PerSample => "per_sample",
            Self::Packed => "packed",
        }
    }
}

pub fn encode(samples: &[u8], encoding: Encoding) -> String {
    match encoding {
        Encoding::Packed => STANDARD.encode(samples),
        Encoding::PerSample => {
            let mut out = String::with_capacity(samples.len() * SAMPLE_CHARS);
            for &v in samples {
                STANDARD.encode_string(v.to_string(), &mut out);
            }
            out
        }
    }
}

pub fn decode(
    text: &str,
    width: usize,
    height: usize,
    encoding: Encoding,
) -> Result<RgbaImage, Error> {
    let expected = buffer_len(width, height).ok_or(Error::SizeMismatch {
        expected: usize::MAX,
        actual: 0,
    })?;

    let data = match encoding {
        Encoding::Packed => decode_packed(text)?,
        Encoding::PerSample => decode_per_sample(text, expected)?,
    };

    RgbaImage::from_vec(width, height, data)
}

fn decode_packed(text: &str) -> Result<Vec<u8>, Error> {
    STANDARD.decode(text).map_err(|err| match err {
        DecodeError::InvalidByte(offset, _) | DecodeError::InvalidLastSymbol(offset, _) => {
            Error::InvalidEncoding { offset }
        }
        DecodeError::InvalidLength => Error::TruncatedEncoding { len: text.len() },
        _ => Error::InvalidEncoding {
            offset: text.len().saturating_sub(1),
        },
    })
}

fn decode_per_sample(text: &str, expected: usize) -> Result<Vec<u8>, Error> {
    let bytes = text.as_bytes();
    if !bytes.len().is_multiple_of(SAMPLE_CHARS) {
        return Err(Error::TruncatedEncoding { len: bytes.len() });
    }

    let count = bytes.len() / SAMPLE_CHARS;
    if count != expected {
        return Err(Error::SizeMismatch {
            expected,
            actual: count,
        });
    }

    let mut out = Vec::with_capacity(count);
    for (i, chunk) in bytes.chunks_exact(SAMPLE_CHARS).enumerate() {
        let offset = i * SAMPLE_CHARS;
        let digits = STANDARD
            .decode(chunk)
            .map_err(|_| Error::InvalidEncoding { offset })?;
        out.push(parse_sample(&digits).ok_or(Error::InvalidEncoding { offset })?);
    }

    Ok(out)
}

fn parse_sample(digits: &[u8]) -> Option<u8> {
    if digits.is_empty() || digits.len() > 3 || !digits.iter().all(u8::is_ascii_digit) {
        return None;
    }
    let v = digits
        .iter()
        .fold(0u32, |acc, &d| acc * 10 + u32::from(d - b'0'));
    u8::try_from(v).ok()
}
