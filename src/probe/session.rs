use std::io::{self, BufRead, BufReader, Write};
use std::net::{SocketAddr, TcpStream};
use std::time::Duration;

/// One SMTP reply: the three-digit code plus the joined text of all its
/// lines.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct SmtpReply {
    pub code: u16,
    pub text: String,
}

impl SmtpReply {
    pub fn is_positive(&self) -> bool {
        (200..300).contains(&self.code)
    }
}

pub(crate) struct SmtpSession {
    stream: TcpStream,
    reader: BufReader<TcpStream>,
}

impl SmtpSession {
    /// Connects to the first reachable address, with both deadlines set
    /// on the socket.
    pub(crate) fn connect(
        addrs: &[SocketAddr],
        connect_timeout: Duration,
        command_timeout: Duration,
    ) -> io::Result<Self> {
        let mut last_err = None;
        for addr in addrs {
            match TcpStream::connect_timeout(addr, connect_timeout) {
                Ok(stream) => {
                    stream.set_read_timeout(Some(command_timeout))?;
                    stream.set_write_timeout(Some(command_timeout))?;
                    let reader = BufReader::new(stream.try_clone()?);
                    return Ok(Self { stream, reader });
                }
                Err(err) => last_err = Some(err),
            }
        }
        Err(last_err.unwrap_or_else(|| {
            io::Error::new(io::ErrorKind::AddrNotAvailable, "no socket address resolved")
        }))
    }

    /// Sends one command line and reads the full reply to it.
    pub(crate) fn command(&mut self, line: &str) -> io::Result<SmtpReply> {
        self.send(line)?;
        self.read_reply()
    }

    fn send(&mut self, line: &str) -> io::Result<()> {
        self.stream.write_all(line.as_bytes())?;
        self.stream.write_all(b"\r\n")?;
        self.stream.flush()
    }

    /// Reads one possibly multi-line reply. All lines must carry the same
    /// code; a `-` after it marks a continuation line.
    pub(crate) fn read_reply(&mut self) -> io::Result<SmtpReply> {
        let mut code: Option<u16> = None;
        let mut text = String::new();
        loop {
            let mut raw = String::new();
            if self.reader.read_line(&mut raw)? == 0 {
                return Err(io::Error::new(
                    io::ErrorKind::UnexpectedEof,
                    "connection closed while awaiting reply",
                ));
            }
            let line = raw.trim_end_matches(['\r', '\n']);

            if line.len() < 3 || !line.as_bytes()[..3].iter().all(u8::is_ascii_digit) {
                return Err(io::Error::new(
                    io::ErrorKind::InvalidData,
                    format!("malformed SMTP reply: '{line}'"),
                ));
            }
            let parsed = line[..3].parse::<u16>().map_err(|_| {
                io::Error::new(io::ErrorKind::InvalidData, "unparsable SMTP status code")
            })?;
            match code {
                Some(existing) if existing != parsed => {
                    return Err(io::Error::new(
                        io::ErrorKind::InvalidData,
                        format!("reply code changed mid-reply: {existing} vs {parsed}"),
                    ));
                }
                _ => code = Some(parsed),
            }

            if !text.is_empty() {
                text.push(' ');
            }
            text.push_str(line.get(4..).unwrap_or_default());

            let continuation = line.as_bytes().get(3) == Some(&b'-');
            if !continuation {
                break;
            }
        }
        let code = code.ok_or_else(|| {
            io::Error::new(io::ErrorKind::InvalidData, "SMTP reply missing status code")
        })?;
        Ok(SmtpReply { code, text })
    }

    /// Best-effort graceful teardown; failures here never change a
    /// classification.
    pub(crate) fn quit(mut self) {
        if self.send("QUIT").is_ok() {
            let _ = self.read_reply();
        }
    }
}
