//! Line-oriented reading with one line of push-back.
//!
//! The block scanners hand the line that ended a block back to the medium so
//! the next phase sees it again: a single header line may close the parameter
//! block and open the port block. Push-back is implemented by seeking back by
//! the byte length of the last line read.

use std::io::{BufRead, Seek, SeekFrom};

use crate::{Error, Result};

pub struct LineCursor<R> {
    reader: R,
    offset: u64,
    last_len: usize,
    line_number: usize,
    line: String,
}

impl<R: BufRead + Seek> LineCursor<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            offset: 0,
            last_len: 0,
            line_number: 0,
            line: String::new(),
        }
    }

    /// Seek back to the start of the medium.
    pub fn rewind(&mut self) -> Result<()> {
        self.reader
            .seek(SeekFrom::Start(0))
            .map_err(Error::UnreadableSource)?;
        self.offset = 0;
        self.last_len = 0;
        self.line_number = 0;
        Ok(())
    }

    /// Read the next line (including its terminator). `None` at end of input.
    pub fn consume_line(&mut self) -> Result<Option<&str>> {
        self.line.clear();
        let read = self
            .reader
            .read_line(&mut self.line)
            .map_err(Error::UnreadableSource)?;
        if read == 0 {
            self.last_len = 0;
            return Ok(None);
        }

        self.offset += read as u64;
        self.last_len = read;
        self.line_number += 1;
        Ok(Some(&self.line))
    }

    /// Reposition to the start of the line returned by the last
    /// [`consume_line`](Self::consume_line). A second call without reading in
    /// between is a no-op.
    pub fn unread_line(&mut self) -> Result<()> {
        if self.last_len == 0 {
            return Ok(());
        }

        self.offset -= self.last_len as u64;
        self.reader
            .seek(SeekFrom::Start(self.offset))
            .map_err(Error::UnreadableSource)?;
        self.last_len = 0;
        self.line_number -= 1;
        Ok(())
    }

    /// Read the next line without consuming it.
    pub fn peek_line(&mut self) -> Result<Option<String>> {
        let line = self.consume_line()?.map(str::to_string);
        self.unread_line()?;
        Ok(line)
    }

    /// Byte offset of the start of the next line.
    pub fn offset(&self) -> u64 {
        self.offset
    }

    /// 1-based number of the last line read, 0 before any read.
    pub fn line_number(&self) -> usize {
        self.line_number
    }
}
