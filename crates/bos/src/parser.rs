//! Bounded recursive-descent walker shared by validation and decoding.

use bos_buffers::{BufferError, Reader};

use crate::builder::ValueBuilder;
use crate::constants::{Tag, HEADER_SIZE, MIN_BUFFER_SIZE};
use crate::error::DecodeError;
use crate::options::{DecodeOptions, UnknownTagPolicy};
use crate::varint::read_varint;

/// The 4-byte size header of a buffer that passed the entry checks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Header {
    /// Total encoded length, header included.
    pub declared: u32,
}

impl Header {
    /// Reads and checks the header of `data`.
    ///
    /// Rejects inputs shorter than 5 bytes, declared sizes under 5 and
    /// declared sizes larger than `data`.
    pub fn parse(data: &[u8]) -> Result<Header, DecodeError> {
        if data.len() < MIN_BUFFER_SIZE {
            return Err(DecodeError::BufferTooSmall { len: data.len() });
        }
        let declared = u32::from_le_bytes([data[0], data[1], data[2], data[3]]);
        let end = usize::try_from(declared).unwrap_or(usize::MAX);
        if end < MIN_BUFFER_SIZE {
            return Err(DecodeError::DeclaredSizeTooSmall { declared });
        }
        if end > data.len() {
            return Err(DecodeError::DeclaredSizeExceedsBuffer {
                declared,
                len: data.len(),
            });
        }
        Ok(Header { declared })
    }

    /// End of the declared region as a slice index.
    pub fn end(&self) -> usize {
        // `parse` checked that the declared size fits inside a slice.
        self.declared as usize
    }
}

/// Walks one buffer, reporting every item to a [`ValueBuilder`].
///
/// All reads are confined to `HEADER_SIZE..declared`. Nothing past the
/// declared size is ever touched, even when the slice is longer.
pub struct Parser<'a, 'b, B> {
    reader: Reader<'a>,
    header: Header,
    builder: &'b mut B,
    options: DecodeOptions,
}

impl<'a, 'b, B: ValueBuilder> Parser<'a, 'b, B> {
    pub fn new(data: &'a [u8], header: Header, builder: &'b mut B, options: DecodeOptions) -> Self {
        Self {
            reader: Reader::from_slice(data, HEADER_SIZE, header.end()),
            header,
            builder,
            options,
        }
    }

    /// Reads the root value and, in exact-size mode, checks that it fills
    /// the declared region.
    pub fn parse_root(mut self) -> Result<B::Node, DecodeError> {
        let root = self.read_value(0)?;
        if self.options.exact_size && !self.reader.is_eof() {
            return Err(DecodeError::TrailingBytes {
                unused: self.reader.remaining(),
                declared: self.header.declared,
            });
        }
        Ok(root)
    }

    /// Reads a tag and its payload. `depth` is the number of containers
    /// enclosing the value.
    ///
    /// Only containers recurse; scalar payloads are read out of line so each
    /// nesting level costs one small frame.
    pub fn read_value(&mut self, depth: usize) -> Result<B::Node, DecodeError> {
        let offset = self.reader.position();
        let byte = self
            .reader
            .try_u8()
            .map_err(|err| buffer_error(err, offset))?;
        match Tag::from_u8(byte) {
            Some(tag) if tag.is_container() => {
                let depth = self.enter(tag, depth, offset)?;
                match tag {
                    Tag::Array => self.read_array(depth),
                    _ => self.read_object(depth),
                }
            }
            Some(tag) => self.read_scalar(tag),
            None => match self.options.unknown_tags {
                UnknownTagPolicy::Null => Ok(self.builder.null()),
                UnknownTagPolicy::Reject => Err(DecodeError::UnknownTag { tag: byte, offset }),
            },
        }
    }

    #[inline(never)]
    fn read_scalar(&mut self, tag: Tag) -> Result<B::Node, DecodeError> {
        let node = match tag {
            Tag::Null => self.builder.null(),
            Tag::Bool => {
                let b = self.fixed(Reader::try_u8)?;
                self.builder.bool(b != 0)
            }
            Tag::Int8 => {
                let v = self.fixed(Reader::try_i8)?;
                self.builder.integer(i64::from(v))
            }
            Tag::Int16 => {
                let v = self.fixed(Reader::try_i16)?;
                self.builder.integer(i64::from(v))
            }
            Tag::Int32 => {
                let v = self.fixed(Reader::try_i32)?;
                self.builder.integer(i64::from(v))
            }
            Tag::Int64 => {
                let v = self.fixed(Reader::try_i64)?;
                self.builder.integer(v)
            }
            Tag::UInt8 => {
                let v = self.fixed(Reader::try_u8)?;
                self.builder.integer(i64::from(v))
            }
            Tag::UInt16 => {
                let v = self.fixed(Reader::try_u16)?;
                self.builder.integer(i64::from(v))
            }
            Tag::UInt32 => {
                let v = self.fixed(Reader::try_u32)?;
                self.builder.integer(i64::from(v))
            }
            Tag::UInt64 => {
                let v = self.fixed(Reader::try_u64)?;
                self.builder.uinteger(v)
            }
            Tag::Float => {
                let v = self.fixed(Reader::try_f32)?;
                self.builder.real(f64::from(v))
            }
            Tag::Double => {
                let v = self.fixed(Reader::try_f64)?;
                self.builder.real(v)
            }
            Tag::String => {
                let s = self.read_str()?;
                self.builder.string(s)
            }
            Tag::Bytes => {
                let len = self.read_length(1)?;
                let at = self.reader.position();
                let b = self.reader.try_buf(len).map_err(|err| buffer_error(err, at))?;
                self.builder.bytes(b)
            }
            // Dispatched by `read_value`.
            Tag::Array | Tag::Object => self.builder.null(),
        };
        Ok(node)
    }

    fn enter(&self, tag: Tag, depth: usize, offset: usize) -> Result<usize, DecodeError> {
        let depth = depth + 1;
        if depth > self.options.max_depth {
            tracing::debug!(
                kind = tag.name(),
                offset,
                max_depth = self.options.max_depth,
                "nesting limit reached"
            );
            return Err(DecodeError::TooDeep {
                max_depth: self.options.max_depth,
                offset,
            });
        }
        Ok(depth)
    }

    fn read_array(&mut self, depth: usize) -> Result<B::Node, DecodeError> {
        // Every element carries at least its tag byte.
        let count = self.read_length(1)?;
        let mut array = self.builder.array(count);
        for _ in 0..count {
            let element = self.read_value(depth)?;
            self.builder.array_append(&mut array, element);
        }
        Ok(array)
    }

    fn read_object(&mut self, depth: usize) -> Result<B::Node, DecodeError> {
        // Every pair carries at least a key length byte and a tag byte.
        let count = self.read_length(2)?;
        let mut object = self.builder.object(count);
        for _ in 0..count {
            let key = self.read_str()?;
            let value = self.read_value(depth)?;
            self.builder.object_set(&mut object, key, value);
        }
        Ok(object)
    }

    fn read_str(&mut self) -> Result<&'a str, DecodeError> {
        let len = self.read_length(1)?;
        let at = self.reader.position();
        self.reader.try_utf8(len).map_err(|err| buffer_error(err, at))
    }

    /// Reads a varint length or count and checks that `unit` bytes per item
    /// fit in what is left of the declared region.
    fn read_length(&mut self, unit: u64) -> Result<usize, DecodeError> {
        let offset = self.reader.position();
        let length = read_varint(&mut self.reader).map_err(|err| buffer_error(err, offset))?;
        let remaining = self.reader.remaining();
        match length.checked_mul(unit) {
            Some(needed) if needed <= remaining as u64 => Ok(length as usize),
            _ => Err(DecodeError::Truncated { offset }),
        }
    }

    fn fixed<T>(
        &mut self,
        read: impl FnOnce(&mut Reader<'a>) -> Result<T, BufferError>,
    ) -> Result<T, DecodeError> {
        let offset = self.reader.position();
        read(&mut self.reader).map_err(|err| buffer_error(err, offset))
    }
}

fn buffer_error(err: BufferError, offset: usize) -> DecodeError {
    match err {
        BufferError::EndOfBuffer => DecodeError::Truncated { offset },
        BufferError::InvalidUtf8 => DecodeError::InvalidUtf8 { offset },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::{BosValueBuilder, SkipBuilder};
    use crate::value::BosValue;

    fn walk(data: &[u8], options: DecodeOptions) -> Result<BosValue, DecodeError> {
        let header = Header::parse(data)?;
        Parser::new(data, header, &mut BosValueBuilder, options).parse_root()
    }

    #[test]
    fn header_checks() {
        assert_eq!(
            Header::parse(&[5, 0, 0, 0]),
            Err(DecodeError::BufferTooSmall { len: 4 })
        );
        assert_eq!(
            Header::parse(&[4, 0, 0, 0, 0]),
            Err(DecodeError::DeclaredSizeTooSmall { declared: 4 })
        );
        assert_eq!(
            Header::parse(&[6, 0, 0, 0, 0]),
            Err(DecodeError::DeclaredSizeExceedsBuffer { declared: 6, len: 5 })
        );
        assert_eq!(Header::parse(&[5, 0, 0, 0, 0]), Ok(Header { declared: 5 }));
    }

    #[test]
    fn reads_stay_inside_declared_region() {
        // A uint8 whose payload byte sits past the declared size.
        let data = [5, 0, 0, 0, 0x06, 0x2a];
        assert_eq!(
            walk(&data, DecodeOptions::default()),
            Err(DecodeError::Truncated { offset: 5 })
        );
    }

    #[test]
    fn unknown_tag_policy() {
        let data = [5, 0, 0, 0, 0x10];
        assert_eq!(
            walk(&data, DecodeOptions::default()),
            Err(DecodeError::UnknownTag { tag: 0x10, offset: 4 })
        );
        let lenient = DecodeOptions::default().with_unknown_tags(UnknownTagPolicy::Null);
        assert_eq!(walk(&data, lenient), Ok(BosValue::Null));
    }

    #[test]
    fn depth_counts_containers() {
        // [[ ]]
        let data = [8, 0, 0, 0, 0x0e, 0x01, 0x0e, 0x00];
        let options = DecodeOptions::default().with_max_depth(2);
        assert!(walk(&data, options).is_ok());
        let options = DecodeOptions::default().with_max_depth(1);
        assert_eq!(
            walk(&data, options),
            Err(DecodeError::TooDeep { max_depth: 1, offset: 6 })
        );
    }

    #[test]
    fn nested_objects_hit_the_limit_too() {
        // {"": {"": null}}
        let data = [11, 0, 0, 0, 0x0f, 0x01, 0x00, 0x0f, 0x01, 0x00, 0x00];
        assert!(walk(&data, DecodeOptions::default().with_max_depth(2)).is_ok());
        assert_eq!(
            walk(&data, DecodeOptions::default().with_max_depth(1)),
            Err(DecodeError::TooDeep { max_depth: 1, offset: 7 })
        );
    }

    #[test]
    fn count_larger_than_region_fails_before_allocating() {
        // Array claiming u64::MAX elements.
        let data = [14, 0, 0, 0, 0x0e, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff];
        assert_eq!(
            walk(&data, DecodeOptions::default()),
            Err(DecodeError::Truncated { offset: 5 })
        );
    }

    #[test]
    fn invalid_utf8_reports_payload_offset() {
        let data = [7, 0, 0, 0, 0x0c, 0x01, 0xff];
        assert_eq!(
            walk(&data, DecodeOptions::default()),
            Err(DecodeError::InvalidUtf8 { offset: 6 })
        );
    }

    #[test]
    fn trailing_bytes_only_matter_in_exact_mode() {
        let data = [6, 0, 0, 0, 0x00, 0x00];
        assert_eq!(walk(&data, DecodeOptions::default()), Ok(BosValue::Null));
        assert_eq!(
            walk(&data, DecodeOptions::default().with_exact_size(true)),
            Err(DecodeError::TrailingBytes { unused: 1, declared: 6 })
        );
    }

    #[test]
    fn skip_builder_walks_without_output() {
        let data = [12, 0, 0, 0, 0x0f, 0x01, 0x01, b'a', 0x0e, 0x01, 0x01, 0x01];
        let header = Header::parse(&data).unwrap();
        let result = Parser::new(&data, header, &mut SkipBuilder, DecodeOptions::default()).parse_root();
        assert_eq!(result, Ok(()));
    }
}
