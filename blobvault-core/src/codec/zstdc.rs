use super::{Codec, Compressor, FrameWriter, Level};
use std::io::{self, Write};
use zstd::stream::Encoder;

pub struct ZstdCompressor {
    level: Level,
}

impl ZstdCompressor {
    pub fn new(level: Level) -> Self {
        Self { level }
    }
}

impl<W: Write> FrameWriter for Encoder<'_, W> {
    fn finish(self: Box<Self>) -> io::Result<()> {
        // Writes the frame epilogue; errors here mean the frame is unusable.
        Encoder::finish(*self).map(|_| ())
    }
}

impl Compressor for ZstdCompressor {
    fn codec(&self) -> Codec {
        Codec::Zstd(self.level)
    }

    fn begin<'a>(&self, dst: &'a mut dyn Write) -> io::Result<Box<dyn FrameWriter + 'a>> {
        let mut enc = Encoder::new(dst, self.level.get())?;
        enc.include_checksum(true)?;
        Ok(Box::new(enc))
    }
}
