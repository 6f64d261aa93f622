//! The fixed-size file header.

use super::{MAJOR_VERSION, MINOR_VERSION, PAGE_SIZE, SIGNATURE};
use crate::{Error, Result};
use byteorder::{LittleEndian, ReadBytesExt, WriteBytesExt};
use std::io::{Read, Write};

/// The first bytes of every E57 file.
///
/// All offsets are relative to the start of the header.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Header {
    /// Always "ASTM-E57".
    pub file_signature: [u8; 8],

    /// The major version of the format.
    ///
    /// Only version 1 is understood.
    pub major_version: u32,

    /// The minor version of the format.
    pub minor_version: u32,

    /// The length of the whole file, in bytes.
    pub file_physical_length: u64,

    /// The offset of the metadata directory.
    pub directory_offset: u64,

    /// The length of the metadata directory, in bytes.
    pub directory_length: u64,

    /// The page size of the file, in bytes.
    pub page_size: u64,
}

impl Header {
    /// The length of the header, in bytes.
    pub const LEN: u64 = 48;

    /// Reads a raw header from a `Read`.
    ///
    /// # Examples
    ///
    /// ```
    /// use std::io::Cursor;
    /// use e57_simple::raw::Header;
    /// let mut cursor = Cursor::new(Vec::new());
    /// Header::default().write_to(&mut cursor).unwrap();
    /// cursor.set_position(0);
    /// let header = Header::read_from(cursor).unwrap();
    /// assert_eq!(1, header.major_version);
    /// ```
    pub fn read_from<R: Read>(mut read: R) -> Result<Header> {
        let mut file_signature = [0; 8];
        read.read_exact(&mut file_signature)?;
        if &file_signature != SIGNATURE {
            return Err(Error::InvalidFileSignature(
                String::from_utf8_lossy(&file_signature).into_owned(),
            ));
        }
        let major_version = read.read_u32::<LittleEndian>()?;
        let minor_version = read.read_u32::<LittleEndian>()?;
        if major_version != MAJOR_VERSION {
            return Err(Error::UnsupportedVersion {
                major: major_version,
                minor: minor_version,
            });
        }
        Ok(Header {
            file_signature,
            major_version,
            minor_version,
            file_physical_length: read.read_u64::<LittleEndian>()?,
            directory_offset: read.read_u64::<LittleEndian>()?,
            directory_length: read.read_u64::<LittleEndian>()?,
            page_size: read.read_u64::<LittleEndian>()?,
        })
    }

    /// Writes this raw header to a `Write`.
    pub fn write_to<W: Write>(&self, mut write: W) -> Result<()> {
        write.write_all(&self.file_signature)?;
        write.write_u32::<LittleEndian>(self.major_version)?;
        write.write_u32::<LittleEndian>(self.minor_version)?;
        write.write_u64::<LittleEndian>(self.file_physical_length)?;
        write.write_u64::<LittleEndian>(self.directory_offset)?;
        write.write_u64::<LittleEndian>(self.directory_length)?;
        write.write_u64::<LittleEndian>(self.page_size)?;
        Ok(())
    }
}

impl Default for Header {
    fn default() -> Header {
        Header {
            file_signature: *SIGNATURE,
            major_version: MAJOR_VERSION,
            minor_version: MINOR_VERSION,
            file_physical_length: Header::LEN,
            directory_offset: 0,
            directory_length: 0,
            page_size: PAGE_SIZE,
        }
    }
}
