use super::{Codec, Compressor, FrameWriter};
use std::io::{self, Write};

pub struct Store;

struct Passthrough<'a>(&'a mut dyn Write);

impl Write for Passthrough<'_> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.write(buf)
    }
    fn flush(&mut self) -> io::Result<()> {
        self.0.flush()
    }
}

impl FrameWriter for Passthrough<'_> {
    fn finish(mut self: Box<Self>) -> io::Result<()> {
        self.flush()
    }
}

impl Compressor for Store {
    fn codec(&self) -> Codec {
        Codec::Store
    }

    fn begin<'a>(&self, dst: &'a mut dyn Write) -> io::Result<Box<dyn FrameWriter + 'a>> {
        Ok(Box::new(Passthrough(dst)))
    }
}
