use core::num::NonZeroU32;

use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum VarintDecodingError {
    #[error("buffer too short")]
    BufferTooShort,
    #[error("non-minimal integer encoding")]
    NonMinimalIntegerEncoding,
    #[error("invalid value")]
    InvalidValue,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum TlvDecodingError {
    #[error("cannot decode type: {err}")]
    CannotDecodeType { err: VarintDecodingError },
    #[error("cannot decode length of type {typ}: {err}")]
    CannotDecodeLength {
        typ: NonZeroU32,
        err: VarintDecodingError,
    },
    #[error("value of type {typ} needs {len} bytes, buffer is shorter")]
    CannotDecodeValue { typ: NonZeroU32, len: usize },
}

pub trait Write {
    type Error;
    fn write(&mut self, bytes: &[u8]) -> Result<(), Self::Error>;
}

impl Write for Vec<u8> {
    type Error = core::convert::Infallible;

    fn write(&mut self, bytes: &[u8]) -> Result<(), Self::Error> {
        self.extend_from_slice(bytes);
        Ok(())
    }
}

pub trait Encode {
    fn encoded_length(&self) -> usize;
    fn encode<W: Write + ?Sized>(&self, writer: &mut W) -> Result<(), W::Error>;
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct TLV<'a> {
    pub typ: NonZeroU32,
    pub val: &'a [u8],
}

impl<'a> TLV<'a> {
    pub fn try_decode(bytes: &'a [u8]) -> Result<(TLV<'a>, usize), TlvDecodingError> {
        let mut cursor = 0;
        let typ: u32 = parse_varint(bytes, &mut cursor)
            .map_err(|err| TlvDecodingError::CannotDecodeType { err })?
            .try_into()
            .map_err(|_| TlvDecodingError::CannotDecodeType {
                err: VarintDecodingError::InvalidValue,
            })?;
        let typ = NonZeroU32::new(typ).ok_or(TlvDecodingError::CannotDecodeType {
            err: VarintDecodingError::InvalidValue,
        })?;

        let len: usize = parse_varint(bytes, &mut cursor)
            .map_err(|err| TlvDecodingError::CannotDecodeLength { typ, err })?
            .try_into()
            .map_err(|_| TlvDecodingError::CannotDecodeLength {
                typ,
                err: VarintDecodingError::InvalidValue,
            })?;

        // The length comes off the wire and may be anything up to u64::MAX
        if len > bytes.len() - cursor {
            return Err(TlvDecodingError::CannotDecodeValue { typ, len });
        }

        let end = cursor + len;
        Ok((TLV { typ, val: &bytes[cursor..end] }, end))
    }
}

/// Iterates over the back-to-back TLVs in `bytes`, stopping after the first error.
pub fn parse_tlvs(bytes: &[u8]) -> impl Iterator<Item = Result<TLV<'_>, TlvDecodingError>> {
    let mut offset = 0;
    let mut failed = false;
    core::iter::from_fn(move || {
        if failed || offset >= bytes.len() {
            return None;
        }
        match TLV::try_decode(&bytes[offset..]) {
            Ok((tlv, len)) => {
                offset += len;
                Some(Ok(tlv))
            }
            Err(err) => {
                failed = true;
                Some(Err(err))
            }
        }
    })
}

fn take<const N: usize>(bytes: &[u8], cursor: &mut usize) -> Result<[u8; N], VarintDecodingError> {
    let end = *cursor + N;
    let next: [u8; N] = bytes
        .get(*cursor..end)
        .ok_or(VarintDecodingError::BufferTooShort)?
        .try_into()
        .map_err(|_| VarintDecodingError::BufferTooShort)?;
    *cursor = end;
    Ok(next)
}

fn parse_varint(bytes: &[u8], cursor: &mut usize) -> Result<u64, VarintDecodingError> {
    let first = *bytes
        .get(*cursor)
        .ok_or(VarintDecodingError::BufferTooShort)?;
    *cursor += 1;
    match first {
        0..=252 => Ok(first as u64),
        253 => {
            let val = u16::from_be_bytes(take(bytes, cursor)?);
            if val > 252 {
                Ok(val as u64)
            } else {
                Err(VarintDecodingError::NonMinimalIntegerEncoding)
            }
        }
        254 => {
            let val = u32::from_be_bytes(take(bytes, cursor)?);
            if val > 65535 {
                Ok(val as u64)
            } else {
                Err(VarintDecodingError::NonMinimalIntegerEncoding)
            }
        }
        255 => {
            let val = u64::from_be_bytes(take(bytes, cursor)?);
            if val > 4294967295 {
                Ok(val)
            } else {
                Err(VarintDecodingError::NonMinimalIntegerEncoding)
            }
        }
    }
}

impl Encode for u64 {
    fn encoded_length(&self) -> usize {
        if *self <= 252 {
            1
        } else if *self <= 65535 {
            3
        } else if *self <= 4294967295 {
            5
        } else {
            9
        }
    }

    fn encode<W: Write + ?Sized>(&self, writer: &mut W) -> Result<(), W::Error> {
        if *self <= 252 {
            writer.write(&[*self as u8])
        } else if *self <= 65535 {
            writer.write(&[253])?;
            writer.write(&(*self as u16).to_be_bytes())
        } else if *self <= 4294967295 {
            writer.write(&[254])?;
            writer.write(&(*self as u32).to_be_bytes())
        } else {
            writer.write(&[255])?;
            writer.write(&self.to_be_bytes())
        }
    }
}

impl<'a> Encode for TLV<'a> {
    fn encoded_length(&self) -> usize {
        let l = self.val.len();
        (self.typ.get() as u64).encoded_length() + (l as u64).encoded_length() + l
    }

    fn encode<W: Write + ?Sized>(&self, writer: &mut W) -> Result<(), W::Error> {
        (self.typ.get() as u64).encode(writer)?;
        (self.val.len() as u64).encode(writer)?;
        writer.write(self.val)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unsigned() {
        for v in 0u64..252 {
            assert_eq!(v.encoded_length(), 1);
        }
        assert_eq!(253u64.encoded_length(), 3);
        assert_eq!(254u64.encoded_length(), 3);
        assert_eq!(255u64.encoded_length(), 3);
        assert_eq!(256u64.encoded_length(), 3);
        assert_eq!(65535u64.encoded_length(), 3);
        assert_eq!(65536u64.encoded_length(), 5);
        assert_eq!(4294967295u64.encoded_length(), 5);
        assert_eq!(4294967296u64.encoded_length(), 9);
    }

    #[test]
    fn test_varint_bytes() {
        let mut buf = Vec::new();
        let _ = 300u64.encode(&mut buf);
        assert_eq!(buf, [253, 1, 44]);

        let mut cursor = 0;
        assert_eq!(parse_varint(&buf, &mut cursor), Ok(300));
        assert_eq!(cursor, 3);

        // Exactly enough bytes must be accepted
        let mut cursor = 0;
        assert_eq!(parse_varint(&[254, 0, 1, 0, 0], &mut cursor), Ok(65536));

        let mut cursor = 0;
        assert_eq!(
            parse_varint(&[253, 1], &mut cursor),
            Err(VarintDecodingError::BufferTooShort)
        );

        let mut cursor = 0;
        assert_eq!(
            parse_varint(&[253, 0, 10], &mut cursor),
            Err(VarintDecodingError::NonMinimalIntegerEncoding)
        );

        let mut cursor = 0;
        assert_eq!(
            parse_varint(&[], &mut cursor),
            Err(VarintDecodingError::BufferTooShort)
        );
    }

    #[test]
    fn test_tlv() {
        let bytes = [8, 3, b'a', b'b', b'c', 8, 1, b'd'];
        let (tlv, len) = TLV::try_decode(&bytes).ok().unwrap();
        assert_eq!(tlv.typ.get(), 8);
        assert_eq!(tlv.val, b"abc");
        assert_eq!(len, 5);

        let all: Vec<_> = parse_tlvs(&bytes).collect();
        assert_eq!(all.len(), 2);
        assert!(all.iter().all(|t| t.is_ok()));

        let mut buf = Vec::new();
        let _ = tlv.encode(&mut buf);
        assert_eq!(buf.as_slice(), &bytes[..5]);
        assert_eq!(tlv.encoded_length(), 5);

        assert!(matches!(
            TLV::try_decode(&[8, 4, b'a']),
            Err(TlvDecodingError::CannotDecodeValue { len: 4, .. })
        ));
        assert!(matches!(
            TLV::try_decode(&[0, 1, b'a']),
            Err(TlvDecodingError::CannotDecodeType { .. })
        ));

        // Lengths larger than any buffer must not wrap around
        assert!(matches!(
            TLV::try_decode(&[8, 255, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff]),
            Err(TlvDecodingError::CannotDecodeValue { len: usize::MAX, .. })
                | Err(TlvDecodingError::CannotDecodeLength { .. })
        ));
        assert!(matches!(
            TLV::try_decode(&[8, 255, 0x7f, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xfe, b'a']),
            Err(TlvDecodingError::CannotDecodeValue { .. })
                | Err(TlvDecodingError::CannotDecodeLength { .. })
        ));

        let broken: Vec<_> = parse_tlvs(&[8, 1, b'a', 8, 9]).collect();
        assert_eq!(broken.len(), 2);
        assert!(broken[1].is_err());
    }
}
