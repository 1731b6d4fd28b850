//! Stream-valued arguments: inline content, a file reference or standard input.

use std::convert::Infallible;
use std::fs::File;
use std::io::{self, Cursor, Read};
use std::path::PathBuf;
use std::str::FromStr;

/// Source of a stream-valued argument.
///
/// - `@path` refers to the file at `path`
/// - `-` refers to standard input
/// - anything else is the content itself
///
/// Decoding never touches the filesystem; the source is only opened by [`Payload::open`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Payload {
    Inline(String),
    File(PathBuf),
    Stdin,
}

impl Payload {
    /// Open the source for reading.
    pub fn open(&self) -> io::Result<Box<dyn Read>> {
        Ok(match self {
            Payload::Inline(content) => Box::new(Cursor::new(content.clone().into_bytes())),
            Payload::File(path) => Box::new(File::open(path)?),
            Payload::Stdin => Box::new(io::stdin()),
        })
    }

    /// Read the whole source as UTF-8 text.
    pub fn read_to_string(&self) -> io::Result<String> {
        let mut out = String::new();
        self.open()?.read_to_string(&mut out)?;
        Ok(out)
    }
}

impl Default for Payload {
    fn default() -> Self {
        Payload::Inline(String::new())
    }
}

impl FromStr for Payload {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s {
            "-" => Payload::Stdin,
            _ => match s.strip_prefix('@') {
                Some(path) => Payload::File(PathBuf::from(path)),
                None => Payload::Inline(s.to_owned()),
            },
        })
    }
}

crate::registered_target!(Payload);
