use crate::error::{Result, VaultError};
use std::fmt;
use std::io::{self, Write};

/// A validated zstd compression level.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Level(i32);

impl Level {
    pub const MIN: i32 = 1;
    pub const MAX: i32 = 22;
    pub const DEFAULT: Level = Level(3);

    pub fn new(level: i32) -> Result<Self> {
        if (Self::MIN..=Self::MAX).contains(&level) {
            Ok(Self(level))
        } else {
            Err(VaultError::InvalidLevel(level))
        }
    }

    pub fn get(self) -> i32 {
        self.0
    }
}

impl Default for Level {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl TryFrom<i32> for Level {
    type Error = VaultError;

    fn try_from(level: i32) -> Result<Self> {
        Self::new(level)
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Codec {
    Store,
    Zstd(Level),
}

impl Default for Codec {
    fn default() -> Self {
        Codec::Zstd(Level::DEFAULT)
    }
}

impl Codec {
    pub fn compressor(self) -> Box<dyn Compressor> {
        match self {
            Codec::Store => Box::new(store::Store),
            Codec::Zstd(level) => Box::new(zstdc::ZstdCompressor::new(level)),
        }
    }
}

impl fmt::Display for Codec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Codec::Store => f.write_str("store"),
            Codec::Zstd(level) => write!(f, "zstd:{}", level.get()),
        }
    }
}

/// One in-progress payload. Bytes written go through the codec into the
/// destination; `finish` flushes any trailing frame data.
pub trait FrameWriter: Write {
    fn finish(self: Box<Self>) -> io::Result<()>;
}

pub trait Compressor: Send + Sync {
    fn codec(&self) -> Codec;
    fn begin<'a>(&self, dst: &'a mut dyn Write) -> io::Result<Box<dyn FrameWriter + 'a>>;
}

pub mod store;
pub mod zstdc;
