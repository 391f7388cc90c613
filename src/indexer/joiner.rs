//! Joins the unterminated tail of the previous chunk with the next chunk.

use std::borrow::Cow;

/// Returns `remainder` followed by `chunk` as one contiguous buffer. The chunk
/// is borrowed as-is when there is nothing to carry; otherwise a new buffer is
/// allocated. Neither input is modified.
pub fn join<'a>(remainder: Option<&[u8]>, chunk: &'a [u8]) -> Cow<'a, [u8]> {
    match remainder {
        Some(carried) if !carried.is_empty() => {
            let mut buffer = Vec::with_capacity(carried.len() + chunk.len());
            buffer.extend_from_slice(carried);
            buffer.extend_from_slice(chunk);
            Cow::Owned(buffer)
        }
        _ => Cow::Borrowed(chunk),
    }
}

/// Concatenates any number of buffers, in order, into one owned buffer.
pub fn concat<B: AsRef<[u8]>>(parts: &[B]) -> Vec<u8> {
    let total = parts.iter().map(|part| part.as_ref().len()).sum();
    let mut buffer = Vec::with_capacity(total);
    for part in parts {
        buffer.extend_from_slice(part.as_ref());
    }
    buffer
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_remainder_borrows_chunk() {
        let chunk = b"abc\n";
        assert!(matches!(join(None, chunk), Cow::Borrowed(b) if b == chunk));
        assert!(matches!(join(Some(&b""[..]), chunk), Cow::Borrowed(_)));
    }

    #[test]
    fn remainder_is_prepended() {
        let carried = b"a\r".to_vec();
        let joined = join(Some(carried.as_slice()), b"\nb");
        assert_eq!(&*joined, b"a\r\nb");
        assert_eq!(carried, b"a\r");
    }

    #[test]
    fn join_with_empty_chunk() {
        assert_eq!(&*join(Some(&b"tail"[..]), b""), b"tail");
    }

    #[test]
    fn concat_parts() {
        assert_eq!(concat(&[&b"ab"[..], &b""[..], &b"c\n"[..]]), b"abc\n");
        assert!(concat::<&[u8]>(&[]).is_empty());
    }
}
