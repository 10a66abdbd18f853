use std::io::{self, Write};

use crate::render::{text, Screen};

use super::config::{OutputConfig, OutputFormat};
use super::types::Envelope;

pub trait Presenter: Send + Sync {
    fn emit(&self, op: &'static str, screen: &Screen, w: &mut dyn Write) -> io::Result<()>;
}

pub struct JsonPresenter { pub pretty: bool }
impl Presenter for JsonPresenter {
    fn emit(&self, op: &'static str, screen: &Screen, w: &mut dyn Write) -> io::Result<()> {
        let env = Envelope::result(op, screen).map_err(to_io)?;
        if self.pretty { serde_json::to_writer_pretty(&mut *w, &env).map_err(to_io)? } else { serde_json::to_writer(&mut *w, &env).map_err(to_io)? }
        writeln!(w)
    }
}

pub struct TextPresenter;
impl Presenter for TextPresenter {
    fn emit(&self, _op: &'static str, screen: &Screen, w: &mut dyn Write) -> io::Result<()> {
        text::write_screen(screen, w)?;
        writeln!(w)
    }
}

/// Writes screens to stdout (or any writer) in the configured format.
pub struct Emitter {
    presenter: Box<dyn Presenter>,
    out: Box<dyn Write + Send>,
}

impl Emitter {
    pub fn from_config(cfg: OutputConfig) -> Self {
        Self::to_writer(cfg, Box::new(io::stdout()))
    }

    pub fn to_writer(cfg: OutputConfig, out: Box<dyn Write + Send>) -> Self {
        let presenter: Box<dyn Presenter> = match cfg.format {
            OutputFormat::Json => Box::new(JsonPresenter { pretty: cfg.pretty }),
            OutputFormat::Text => Box::new(TextPresenter),
        };
        Emitter { presenter, out }
    }

    pub fn emit(&mut self, op: &'static str, screen: &Screen) -> io::Result<()> {
        self.presenter.emit(op, screen, &mut *self.out)?;
        self.out.flush()
    }
}

fn to_io(e: serde_json::Error) -> io::Error { io::Error::new(io::ErrorKind::Other, e) }

#[cfg(test)]
pub(crate) mod testing {
    use std::io::{self, Write};
    use std::sync::{Arc, Mutex};

    /// Cloneable in-memory writer for asserting on emitted output.
    #[derive(Clone, Default)]
    pub struct SharedBuf(pub Arc<Mutex<Vec<u8>>>);

    impl SharedBuf {
        pub fn contents(&self) -> String {
            String::from_utf8(self.0.lock().unwrap().clone()).unwrap()
        }
    }

    impl Write for SharedBuf {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }
        fn flush(&mut self) -> io::Result<()> { Ok(()) }
    }
}
