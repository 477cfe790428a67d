//! Serial-port angle source
use imucube_core::{AngleSource, LineBuffer, Orientation, SourceError};
use serialport::{ClearBuffer, SerialPort};
use std::io::{self, Read};
use std::time::Duration;
use tracing::{info, warn};

use crate::config::SerialConfig;

/// Upper bound on bytes pulled from the port in one poll
const READ_CHUNK: usize = 1024;

/// A byte stream that can report how much data is waiting
pub trait ByteStream {
    /// Bytes that can be read right now without blocking
    fn available(&mut self) -> io::Result<usize>;
    fn read_bytes(&mut self, buf: &mut [u8]) -> io::Result<usize>;
}

impl ByteStream for Box<dyn SerialPort> {
    fn available(&mut self) -> io::Result<usize> {
        Ok(self.bytes_to_read()? as usize)
    }

    fn read_bytes(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        self.read(buf)
    }
}

/// Angle source reading wire-format lines from a byte stream.
///
/// Each poll checks how much is buffered, reads at most that much, and
/// returns the newest valid reading among the lines completed so far.
pub struct StreamSource<P: ByteStream> {
    name: String,
    port: Option<P>,
    lines: LineBuffer,
    buf: Vec<u8>,
}

/// The serial-port flavour used by the binary
pub type SerialAngleSource = StreamSource<Box<dyn SerialPort>>;

impl SerialAngleSource {
    /// Open and prepare the configured port.
    ///
    /// Many boards reset when the port opens, so this waits `settle_ms`
    /// and then drops whatever arrived during the reset.
    pub fn open(config: &SerialConfig) -> Result<Self, SourceError> {
        let port = serialport::new(&config.port, config.baud_rate)
            .timeout(Duration::from_millis(config.timeout_ms))
            .open()
            .map_err(|e| SourceError::unavailable(&config.port, e))?;

        if config.settle_ms > 0 {
            std::thread::sleep(Duration::from_millis(config.settle_ms));
        }
        port.clear(ClearBuffer::Input)
            .map_err(|e| SourceError::unavailable(&config.port, e))?;

        info!(port = %config.port, baud = config.baud_rate, "Connected to serial port");
        Ok(Self::from_stream(config.port.clone(), port))
    }
}

impl<P: ByteStream> StreamSource<P> {
    pub fn from_stream(name: impl Into<String>, port: P) -> Self {
        Self {
            name: name.into(),
            port: Some(port),
            lines: LineBuffer::new(),
            buf: vec![0; READ_CHUNK],
        }
    }

    pub fn is_open(&self) -> bool {
        self.port.is_some()
    }

    /// Move whatever is buffered on the port into the line framer
    fn pump(&mut self) -> Result<usize, SourceError> {
        let Some(port) = self.port.as_mut() else {
            return Ok(0);
        };
        let waiting = port.available()?;
        if waiting == 0 {
            return Ok(0);
        }
        let n = port.read_bytes(&mut self.buf[..waiting.min(READ_CHUNK)])?;
        self.lines.push(&self.buf[..n]);
        Ok(n)
    }
}

impl<P: ByteStream> AngleSource for StreamSource<P> {
    fn poll(&mut self) -> Option<Orientation> {
        if let Err(e) = self.pump() {
            warn!(port = %self.name, %e, "Serial read failed");
        }
        self.lines.latest_reading()
    }

    fn release(&mut self) {
        if self.port.take().is_some() {
            self.lines.clear();
            info!(port = %self.name, "Serial port closed");
        }
    }

    fn name(&self) -> String {
        self.name.clone()
    }
}

impl<P: ByteStream> Drop for StreamSource<P> {
    fn drop(&mut self) {
        self.release();
    }
}
