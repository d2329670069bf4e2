//! Line, word and character counts for text files.

use crate::error::{Result, TrackError};
use std::borrow::Cow;
use std::fs::File;
use std::io::{self, BufRead, BufReader, Seek};
use std::path::Path;
use tracing::{Level, debug, span};

/// Statistics derived from the current contents of a text file.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TextStats {
    /// Number of lines; a trailing fragment without a newline counts as one
    pub lines: u64,
    /// Number of whitespace-delimited words
    pub words: u64,
    /// Number of characters, each line terminator counted as one
    pub characters: u64,
}

impl TextStats {
    /// Re-reads `path` and replaces the counts.
    ///
    /// # Errors
    ///
    /// Returns [`TrackError::NotFound`] if the file is gone and
    /// [`TrackError::Io`] if it cannot be opened or is not valid UTF-8.
    pub fn refresh(&mut self, path: &Path) -> Result<()> {
        let span = span!(Level::DEBUG, "text_refresh", path = %path.display());
        let _guard = span.enter();

        let file = File::open(path).map_err(|e| TrackError::from_io(path, e))?;
        let mut reader = BufReader::new(file);
        *self = Self::tally(&mut reader).map_err(|e| TrackError::from_io(path, e))?;

        debug!(
            lines = self.lines,
            words = self.words,
            characters = self.characters,
            "Text statistics refreshed"
        );
        Ok(())
    }

    /// Counts a stream in three passes, rewinding between them.
    ///
    /// `\r\n`, `\r` and `\n` all end a line and each counts as a single
    /// `\n` character.
    ///
    /// # Errors
    ///
    /// Propagates read and seek failures.
    pub fn tally<R: BufRead + Seek>(reader: &mut R) -> io::Result<Self> {
        let mut lines = 0u64;
        for_each_line(reader, |_| lines += 1)?;

        reader.rewind()?;
        let mut words = 0u64;
        for_each_line(reader, |line| words += count_words(line))?;

        reader.rewind()?;
        let mut characters = 0u64;
        for_each_line(reader, |line| characters += line.chars().count() as u64)?;

        Ok(Self {
            lines,
            words,
            characters,
        })
    }
}

/// Feeds every line to `f`, with its terminator normalized to `\n`.
fn for_each_line<R: BufRead>(reader: &mut R, mut f: impl FnMut(&str)) -> io::Result<()> {
    let mut buf = Vec::new();
    loop {
        buf.clear();
        if reader.read_until(b'\n', &mut buf)? == 0 {
            return Ok(());
        }
        let chunk = std::str::from_utf8(&buf)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;

        // A chunk ends at `\n` or end of input, so a `\r\n` pair never spans two.
        let chunk: Cow<'_, str> = if chunk.contains('\r') {
            Cow::Owned(chunk.replace("\r\n", "\n").replace('\r', "\n"))
        } else {
            Cow::Borrowed(chunk)
        };
        chunk.split_inclusive('\n').for_each(&mut f);
    }
}

/// Word separators: Unicode whitespace plus the ASCII information
/// separators `\x1c`..=`\x1f`.
fn is_separator(c: char) -> bool {
    c.is_whitespace() || ('\x1c'..='\x1f').contains(&c)
}

fn count_words(line: &str) -> u64 {
    line.split(is_separator).filter(|w| !w.is_empty()).count() as u64
}
