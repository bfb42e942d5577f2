use bstr::{BStr, ByteSlice};

/// The `FromStr` analog for `&[u8]`.
pub trait FromBytes: Sized {
    type Err;

    fn from_bytes(bytes: &[u8]) -> Result<Self, Self::Err>;
}

/// Adds `parse` to byte slices, like `str::parse`.
pub trait BytesExt {
    // Not `as_bytes`, since that collides with `bstr`'s methods.
    fn as_byte_slice(&self) -> &[u8];

    fn parse<T: FromBytes>(&self) -> Result<T, <T as FromBytes>::Err> {
        FromBytes::from_bytes(self.as_byte_slice())
    }
}

impl BytesExt for [u8] {
    fn as_byte_slice(&self) -> &[u8] {
        self
    }
}

/// A borrowed line read from a stream, along with its line number.
#[derive(Clone, Copy, Debug)]
pub struct Line<'a> {
    /// The line number, 1-indexed.
    number: usize,
    /// The full line including its line terminator if present.
    full: &'a BStr,
}

impl<'a> Line<'a> {
    pub fn new(number: usize, full: &'a [u8]) -> Line<'a> {
        Line { number, full: full.as_bstr() }
    }

    /// Return the one-indexed line number of this line.
    pub fn number(&self) -> usize {
        self.number
    }

    /// Return the line without its terminator (`\n` or `\r\n`), if present.
    pub fn content(&self) -> &'a BStr {
        let mut end = self.full.len();
        if self.full.last_byte() == Some(b'\n') {
            end -= 1;
            if end > 0 && self.full[end - 1] == b'\r' {
                end -= 1;
            }
        }
        self.full[..end].as_bstr()
    }

    /// Return the content of this line as a string slice.
    pub fn to_str(&self) -> anyhow::Result<&'a str> {
        self.content().to_str().map_err(|_| {
            anyhow::anyhow!(
                "line {} is not valid UTF-8: {:?}",
                self.number,
                self.content(),
            )
        })
    }
}

/// An extension trait for `std::io::BufRead` for visiting lines as byte
/// strings.
///
/// This is like `bstr::io::BufReadExt::for_byte_line`, except errors are
/// `anyhow::Error` so that closures can use `?` on anything.
pub trait BufReadExt: std::io::BufRead {
    /// Executes the given closure on each (`\n`|`\r\n`)-terminated line in the
    /// underlying reader. The final line need not have a terminator.
    ///
    /// Iteration stops early when the closure returns `false` or an error.
    fn for_byte_line<F>(&mut self, mut for_each_line: F) -> anyhow::Result<()>
    where
        Self: Sized,
        F: FnMut(Line<'_>) -> anyhow::Result<bool>,
    {
        let mut number = 0;
        let mut bytes = vec![];
        loop {
            bytes.clear();
            if self.read_until(b'\n', &mut bytes)? == 0 {
                return Ok(());
            }
            number += 1;
            if !for_each_line(Line::new(number, &bytes))? {
                return Ok(());
            }
        }
    }
}

impl<B: std::io::BufRead> BufReadExt for B {}
