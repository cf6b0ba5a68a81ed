//! crates/logging-sink/src/host.rs
//! Host and program identity stamped into syslog records.

use std::env;
use std::path::Path;

/// Returns the host name reported by `gethostname(2)`.
#[cfg(unix)]
#[allow(unsafe_code)]
pub(crate) fn hostname() -> Option<String> {
    let mut buffer = [0_u8; 256];
    // SAFETY: `buffer` is a valid, writable region of `buffer.len()` bytes
    // owned by this frame; gethostname writes at most that many bytes.
    let rc = unsafe { libc::gethostname(buffer.as_mut_ptr().cast::<libc::c_char>(), buffer.len()) };
    if rc != 0 {
        return None;
    }
    let len = buffer.iter().position(|&byte| byte == 0).unwrap_or(buffer.len());
    let name = std::str::from_utf8(&buffer[..len]).ok()?;
    (!name.is_empty()).then(|| name.to_owned())
}

/// Returns the host name from the environment on platforms without `gethostname(2)`.
#[cfg(not(unix))]
pub(crate) fn hostname() -> Option<String> {
    env::var("COMPUTERNAME").ok().filter(|name| !name.is_empty())
}

/// Returns the last path segment of the program's invocation name.
///
/// Falls back to the executable's file name, then to `"goose"`.
pub fn program_name() -> String {
    env::args_os()
        .next()
        .and_then(|arg0| file_name(Path::new(&arg0)))
        .or_else(|| env::current_exe().ok().and_then(|exe| file_name(&exe)))
        .unwrap_or_else(|| String::from("goose"))
}

fn file_name(path: &Path) -> Option<String> {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .filter(|name| !name.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[cfg(unix)]
    #[test]
    fn hostname_is_available_and_trimmed() {
        let name = hostname().expect("gethostname succeeds");
        assert!(!name.is_empty());
        assert!(!name.contains('\0'));
    }

    #[test]
    fn program_name_is_a_single_segment() {
        let name = program_name();
        assert!(!name.is_empty());
        assert!(!name.contains('/'));
    }

    #[test]
    fn file_name_takes_the_last_segment() {
        assert_eq!(file_name(Path::new("/usr/local/bin/server")).as_deref(), Some("server"));
        assert_eq!(file_name(Path::new("server")).as_deref(), Some("server"));
        assert_eq!(file_name(Path::new("/")), None);
    }
}
