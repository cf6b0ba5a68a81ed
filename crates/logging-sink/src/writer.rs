//! crates/logging-sink/src/writer.rs
//! A [`Write`] implementation that delivers each write as one syslog record.

use std::fmt;
use std::io::{self, Write};
use std::net::{SocketAddr, TcpStream, ToSocketAddrs, UdpSocket};
#[cfg(unix)]
use std::os::unix::net::{UnixDatagram, UnixStream};
use std::process;

use logging::sink;
use time::OffsetDateTime;
use time::format_description::FormatItem;
use time::macros::format_description;

use crate::diag;
use crate::error::SyslogError;
use crate::host;
use crate::priority::Priority;

/// Sockets probed, in order, when dialing the local syslog daemon.
pub const LOCAL_SOCKET_PATHS: [&str; 3] = ["/dev/log", "/var/run/syslog", "/var/run/log"];

/// Timestamp used by network records (RFC 3339, second precision).
const NETWORK_TIMESTAMP: &[FormatItem<'static>] = format_description!(
    "[year]-[month]-[day]T[hour]:[minute]:[second][offset_hour sign:mandatory]:[offset_minute]"
);

/// Timestamp used by records sent to the local daemon (`Jan  2 15:04:05`).
const LOCAL_TIMESTAMP: &[FormatItem<'static>] =
    format_description!("[month repr:short] [day padding:space] [hour]:[minute]:[second]");

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
enum Family {
    Any,
    V4,
    V6,
}

impl Family {
    fn admits(self, address: &SocketAddr) -> bool {
        match self {
            Self::Any => true,
            Self::V4 => address.is_ipv4(),
            Self::V6 => address.is_ipv6(),
        }
    }
}

/// Transport selected by the protocol string passed to [`SyslogWriter::dial`].
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
enum Transport {
    Local,
    Tcp(Family),
    Udp(Family),
    Unix,
    Unixgram,
}

impl Transport {
    fn parse(protocol: &str) -> Option<Self> {
        Some(match protocol {
            "" => Self::Local,
            "tcp" => Self::Tcp(Family::Any),
            "tcp4" => Self::Tcp(Family::V4),
            "tcp6" => Self::Tcp(Family::V6),
            "udp" => Self::Udp(Family::Any),
            "udp4" => Self::Udp(Family::V4),
            "udp6" => Self::Udp(Family::V6),
            "unix" => Self::Unix,
            "unixgram" => Self::Unixgram,
            _ => return None,
        })
    }

    const fn is_local(self) -> bool {
        matches!(self, Self::Local)
    }

    fn connect(self, address: &str) -> io::Result<Connection> {
        match self {
            Self::Local => connect_local(),
            Self::Tcp(family) => {
                each_address(address, family, |target| TcpStream::connect(target).map(Connection::Tcp))
            }
            Self::Udp(family) => each_address(address, family, |target| {
                let unspecified: SocketAddr = if target.is_ipv4() {
                    (std::net::Ipv4Addr::UNSPECIFIED, 0).into()
                } else {
                    (std::net::Ipv6Addr::UNSPECIFIED, 0).into()
                };
                let socket = UdpSocket::bind(unspecified)?;
                socket.connect(target)?;
                Ok(Connection::Udp(socket))
            }),
            Self::Unix => connect_stream(address),
            Self::Unixgram => connect_datagram(address),
        }
    }
}

fn each_address<F>(address: &str, family: Family, mut connect: F) -> io::Result<Connection>
where
    F: FnMut(SocketAddr) -> io::Result<Connection>,
{
    let mut last_error = None;
    for target in address.to_socket_addrs()?.filter(|target| family.admits(target)) {
        match connect(target) {
            Ok(connection) => return Ok(connection),
            Err(error) => last_error = Some(error),
        }
    }
    Err(last_error.unwrap_or_else(|| {
        io::Error::new(
            io::ErrorKind::AddrNotAvailable,
            format!("no usable address for {address}"),
        )
    }))
}

fn connect_local() -> io::Result<Connection> {
    let mut last_error = None;
    let connectors: [fn(&str) -> io::Result<Connection>; 2] = [connect_datagram, connect_stream];
    for connect in connectors {
        for path in LOCAL_SOCKET_PATHS {
            match connect(path) {
                Ok(connection) => return Ok(connection),
                Err(error) => last_error = Some(error),
            }
        }
    }
    Err(last_error.unwrap_or_else(|| io::Error::from(io::ErrorKind::NotFound)))
}

#[cfg(unix)]
fn connect_stream(path: &str) -> io::Result<Connection> {
    UnixStream::connect(path).map(Connection::Stream)
}

#[cfg(unix)]
fn connect_datagram(path: &str) -> io::Result<Connection> {
    let socket = UnixDatagram::unbound()?;
    socket.connect(path)?;
    Ok(Connection::Datagram(socket))
}

#[cfg(not(unix))]
fn connect_stream(_path: &str) -> io::Result<Connection> {
    Err(io::Error::new(
        io::ErrorKind::Unsupported,
        "unix sockets are not available on this platform",
    ))
}

#[cfg(not(unix))]
fn connect_datagram(path: &str) -> io::Result<Connection> {
    connect_stream(path)
}

enum Connection {
    Tcp(TcpStream),
    Udp(UdpSocket),
    #[cfg(unix)]
    Stream(UnixStream),
    #[cfg(unix)]
    Datagram(UnixDatagram),
}

impl Connection {
    fn send(&mut self, record: &[u8]) -> io::Result<()> {
        match self {
            Self::Tcp(stream) => stream.write_all(record),
            Self::Udp(socket) => socket.send(record).map(drop),
            #[cfg(unix)]
            Self::Stream(stream) => stream.write_all(record),
            #[cfg(unix)]
            Self::Datagram(socket) => socket.send(record).map(drop),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        match self {
            Self::Tcp(stream) => stream.flush(),
            #[cfg(unix)]
            Self::Stream(stream) => stream.flush(),
            _ => Ok(()),
        }
    }

    fn local_addr(&self) -> Option<String> {
        match self {
            Self::Tcp(stream) => stream.local_addr().ok().map(|addr| addr.to_string()),
            Self::Udp(socket) => socket.local_addr().ok().map(|addr| addr.to_string()),
            #[cfg(unix)]
            _ => None,
        }
    }
}

/// Record header fields, fixed for the lifetime of a writer.
#[derive(Clone, Debug, Eq, PartialEq)]
struct Framing {
    local: bool,
    priority: Priority,
    hostname: String,
    tag: String,
    pid: u32,
}

impl Framing {
    /// Renders `message` as one record, adding a newline only if missing.
    fn render(&self, message: &str, now: OffsetDateTime) -> String {
        let newline = if message.ends_with('\n') { "" } else { "\n" };
        let priority = self.priority.raw();
        let (tag, pid) = (&self.tag, self.pid);
        if self.local {
            let stamp = now.format(LOCAL_TIMESTAMP).unwrap_or_default();
            format!("<{priority}>{stamp} {tag}[{pid}]: {message}{newline}")
        } else {
            let stamp = now.format(NETWORK_TIMESTAMP).unwrap_or_default();
            let hostname = &self.hostname;
            format!("<{priority}>{stamp} {hostname} {tag}[{pid}]: {message}{newline}")
        }
    }
}

/// A connection to a syslog daemon.
///
/// Each call to [`write`](Write::write) (or [`send`](Self::send)) becomes one
/// syslog record carrying the writer's [`Priority`] and tag. Records sent over
/// the network are framed as `<PRI>TIMESTAMP HOSTNAME TAG[PID]: MSG`; records
/// for the local daemon omit the hostname and use the short BSD timestamp.
///
/// When a write fails the writer reconnects once and retries the record.
///
/// # Examples
///
/// ```no_run
/// use std::io::Write;
///
/// use logging_sink::{Facility, Priority, Severity, SyslogWriter};
///
/// let priority = Priority::new(Facility::Daemon, Severity::Notice);
/// let mut writer = SyslogWriter::dial("udp", "logs.example.net:514", priority, "proxy")?;
/// writer.write_all(b"upstream ready")?;
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub struct SyslogWriter {
    protocol: String,
    address: String,
    transport: Transport,
    framing: Framing,
    connection: Option<Connection>,
}

impl SyslogWriter {
    /// Connects to a syslog daemon.
    ///
    /// `protocol` is one of `tcp`, `tcp4`, `tcp6`, `udp`, `udp4`, `udp6`,
    /// `unix` and `unixgram`, with `address` naming the peer (`host:port` or
    /// a socket path). An empty protocol ignores `address` and connects to the
    /// local daemon through [`LOCAL_SOCKET_PATHS`]. An empty `tag` is replaced
    /// by the program name.
    pub fn dial(
        protocol: &str,
        address: &str,
        priority: Priority,
        tag: &str,
    ) -> Result<Self, SyslogError> {
        let transport = Transport::parse(protocol).ok_or_else(|| {
            SyslogError::connection(
                protocol,
                address,
                io::Error::new(
                    io::ErrorKind::InvalidInput,
                    format!("unsupported syslog protocol {protocol:?}"),
                ),
            )
        })?;

        let connection = transport
            .connect(address)
            .map_err(|source| SyslogError::connection(protocol, address, source))?;
        diag::connected(protocol, address);

        let hostname = if transport.is_local() {
            String::from("localhost")
        } else {
            host::hostname()
                .or_else(|| connection.local_addr())
                .unwrap_or_else(|| String::from("localhost"))
        };
        let tag = if tag.is_empty() {
            host::program_name()
        } else {
            tag.to_owned()
        };

        Ok(Self {
            protocol: protocol.to_owned(),
            address: address.to_owned(),
            transport,
            framing: Framing {
                local: transport.is_local(),
                priority,
                hostname,
                tag,
                pid: process::id(),
            },
            connection: Some(connection),
        })
    }

    /// Returns the protocol the writer was dialed with.
    pub fn protocol(&self) -> &str {
        &self.protocol
    }

    /// Returns the address the writer was dialed with.
    pub fn address(&self) -> &str {
        &self.address
    }

    /// Returns the priority stamped on every record.
    pub const fn priority(&self) -> Priority {
        self.framing.priority
    }

    /// Returns the tag stamped on every record.
    pub fn tag(&self) -> &str {
        &self.framing.tag
    }

    /// Returns the hostname stamped on network records.
    pub fn hostname(&self) -> &str {
        &self.framing.hostname
    }

    /// Sends `message` as one record.
    pub fn send(&mut self, message: &str) -> Result<(), SyslogError> {
        let record = self.framing.render(message, sink::local_now());

        let error = match self.connection.as_mut() {
            Some(connection) => match connection.send(record.as_bytes()) {
                Ok(()) => return Ok(()),
                Err(error) => Some(error),
            },
            None => None,
        };
        diag::reconnecting(&self.protocol, &self.address, error.as_ref());

        self.connection = None;
        let mut connection = self
            .transport
            .connect(&self.address)
            .map_err(|source| SyslogError::connection(&self.protocol, &self.address, source))?;
        connection.send(record.as_bytes())?;
        self.connection = Some(connection);
        Ok(())
    }
}

impl Write for SyslogWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.send(&String::from_utf8_lossy(buf))?;
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        self.connection.as_mut().map_or(Ok(()), Connection::flush)
    }
}

impl fmt::Debug for SyslogWriter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SyslogWriter")
            .field("protocol", &self.protocol)
            .field("address", &self.address)
            .field("priority", &self.framing.priority)
            .field("tag", &self.framing.tag)
            .field("connected", &self.connection.is_some())
            .finish()
    }
}
