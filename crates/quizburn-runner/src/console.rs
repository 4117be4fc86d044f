use std::io::{self, Write};
use std::sync::{Arc, Mutex, MutexGuard};

/// Cloneable writer shared by the coordinator and the collector thread.
#[derive(Clone)]
pub struct SharedOutput {
    inner: Arc<Mutex<dyn Write + Send>>,
}

impl SharedOutput {
    pub fn new<W: Write + Send + 'static>(writer: W) -> Self {
        Self {
            inner: Arc::new(Mutex::new(writer)),
        }
    }

    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }

    fn lock(&self) -> io::Result<MutexGuard<'_, dyn Write + Send + 'static>> {
        self.inner
            .lock()
            .map_err(|_| io::Error::other("output lock poisoned"))
    }

    /// Write a prompt with no trailing newline and flush it.
    pub fn prompt(&self, text: &str) -> io::Result<()> {
        let mut out = self.lock()?;
        out.write_all(text.as_bytes())?;
        out.flush()
    }

    pub fn line(&self, text: &str) -> io::Result<()> {
        let mut out = self.lock()?;
        writeln!(out, "{}", text)?;
        out.flush()
    }
}

impl Write for SharedOutput {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.lock()?.write(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.lock()?.flush()
    }
}

/// In-memory output for tests.
#[cfg(test)]
#[derive(Clone, Default)]
pub(crate) struct Captured(Arc<Mutex<Vec<u8>>>);

#[cfg(test)]
impl Captured {
    pub(crate) fn output(&self) -> SharedOutput {
        SharedOutput::new(self.clone())
    }

    pub(crate) fn text(&self) -> String {
        String::from_utf8_lossy(&self.0.lock().unwrap()).into_owned()
    }
}

#[cfg(test)]
impl Write for Captured {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Reader whose reads block until the sending side is dropped.
#[cfg(test)]
pub(crate) struct Stalled(pub(crate) std::sync::mpsc::Receiver<()>);

#[cfg(test)]
impl io::Read for Stalled {
    fn read(&mut self, _buf: &mut [u8]) -> io::Result<usize> {
        let _ = self.0.recv();
        Ok(0)
    }
}
