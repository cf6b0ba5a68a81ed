//! crates/logging/src/trace.rs
//! Call-site resolution for the optional locator prefix.
//!
//! When tracing is enabled, the emission methods walk the active call stack and
//! decodes the frame of the code that called the emitting method into a
//! locator of the form `{package}[file]<function>(line): `.
//!
//! - `package` is the last module segment of the function path, after any
//!   receiver type has been removed;
//! - `file` is the last path segment of the source file;
//! - `function` is the unqualified function name, with closure markers
//!   stripped so a closure reports its enclosing function.
//!
//! The file and line of the frame that called an emitting method come from
//! [`Location::caller`]; the stack supplies the function name. A caller whose
//! frame was folded into a tail call is detected by comparing the two, and
//! never reported under a neighbouring function's name. The emission macros
//! bypass the stack altogether and locate themselves through [`Origin`].
//!
//! Decoding depends on symbol information in the binary. Stripped builds
//! resolve nothing and produce an empty locator. Builds without line tables
//! still locate an emitting method's direct caller, but report no deeper
//! frames rather than invent a position for them.

use std::fmt;
use std::panic::Location;
use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};

static TRACE: AtomicBool = AtomicBool::new(false);

/// Position of the reporting caller among the frames above an emission
/// anchor: the emitting method sits in between.
const EMITTER_CALLER: usize = 1;

/// Position of the reporting caller among the frames above [`resolve`] or
/// [`locator`]: the function that called them.
const DIRECT_CALLER: usize = 0;

/// Turns call-site tracing on for every subsequent emission.
///
/// Intended to be called once during startup.
pub fn enable_trace() {
    TRACE.store(true, Ordering::Relaxed);
}

/// Turns call-site tracing off; locators become empty strings.
pub fn disable_trace() {
    TRACE.store(false, Ordering::Relaxed);
}

/// Reports whether call-site tracing is enabled.
pub fn trace_enabled() -> bool {
    TRACE.load(Ordering::Relaxed)
}

/// A decoded stack frame.
///
/// [`Display`](fmt::Display) renders the locator verbatim;
/// [`to_template`](Self::to_template) renders it with `%` doubled.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct CallSite {
    package: String,
    file: String,
    function: String,
    line: u32,
}

impl CallSite {
    /// Builds a call site from its parts.
    pub fn new(
        package: impl Into<String>,
        file: impl Into<String>,
        function: impl Into<String>,
        line: u32,
    ) -> Self {
        Self {
            package: package.into(),
            file: file.into(),
            function: function.into(),
            line,
        }
    }

    /// Decodes a demangled symbol path plus its source position.
    ///
    /// Returns `None` when the symbol has no function segment.
    ///
    /// # Examples
    ///
    /// ```
    /// use logging::trace::CallSite;
    /// use std::path::Path;
    ///
    /// let site = CallSite::from_symbol(
    ///     "app::net::Server::accept::{{closure}}",
    ///     Some(Path::new("/src/app/src/net/server.rs")),
    ///     88,
    /// )
    /// .expect("decodes");
    ///
    /// assert_eq!(site.to_string(), "{net}[server.rs]<accept>(88): ");
    /// ```
    pub fn from_symbol(symbol: &str, file: Option<&Path>, line: u32) -> Option<Self> {
        let (package, function) = decode_symbol(symbol)?;
        let file = file
            .and_then(Path::file_name)
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();
        Some(Self {
            package,
            file,
            function,
            line,
        })
    }

    /// Returns the last module segment of the caller's path.
    pub fn package(&self) -> &str {
        &self.package
    }

    /// Returns the caller's source file name.
    pub fn file(&self) -> &str {
        &self.file
    }

    /// Returns the caller's unqualified function name.
    pub fn function(&self) -> &str {
        &self.function
    }

    /// Returns the caller's source line.
    pub const fn line(&self) -> u32 {
        self.line
    }

    /// Renders the locator with every `%` doubled, so the result can lead a
    /// printf-style template.
    pub fn to_template(&self) -> String {
        format!(
            "{{{}}}[{}]<{}>({}): ",
            escape_percent(&self.package),
            escape_percent(&self.file),
            escape_percent(&self.function),
            self.line
        )
    }
}

impl fmt::Display for CallSite {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{{{}}}[{}]<{}>({}): ",
            self.package, self.file, self.function, self.line
        )
    }
}

/// Returns the template-safe locator of the caller's caller.
///
/// The frame reported is the one that called the function which called
/// `locator`, after skipping `extra_depth` further frames. Returns an empty
/// string when tracing is disabled or no frame can be decoded.
#[track_caller]
#[inline(never)]
pub fn locator(extra_depth: usize) -> String {
    if !trace_enabled() {
        return String::new();
    }
    let Some(target) = (DIRECT_CALLER + 1).checked_add(extra_depth) else {
        return String::new();
    };
    walk(
        concat!(module_path!(), "::locator"),
        Location::caller(),
        DIRECT_CALLER,
        target,
    )
    .map(|site| site.to_template())
    .unwrap_or_default()
}

/// Decodes the caller's caller, skipping `extra_depth` further frames.
///
/// Returns `None` when tracing is disabled or no frame can be decoded.
#[track_caller]
#[inline(never)]
pub fn resolve(extra_depth: usize) -> Option<CallSite> {
    if !trace_enabled() {
        return None;
    }
    let target = (DIRECT_CALLER + 1).checked_add(extra_depth)?;
    walk(
        concat!(module_path!(), "::resolve"),
        Location::caller(),
        DIRECT_CALLER,
        target,
    )
}

/// Decodes the frame `extra_depth` levels above the code that called an
/// emitting method. `caller` is that method's [`Location::caller`].
#[inline(never)]
pub(crate) fn resolve_emitter(caller: &Location<'_>, extra_depth: usize) -> Option<CallSite> {
    if !trace_enabled() {
        return None;
    }
    let target = EMITTER_CALLER.checked_add(extra_depth)?;
    walk(
        concat!(module_path!(), "::resolve_emitter"),
        caller,
        EMITTER_CALLER,
        target,
    )
}

/// Source position of an emission macro's expansion site.
///
/// The emission macros build one at compile time, so their locator does not
/// depend on the shape of the optimised call stack.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Origin {
    function: &'static str,
    file: &'static str,
    line: u32,
}

impl Origin {
    /// Builds an origin from the type name of an item declared inside the
    /// emitting function, plus `file!()` and `line!()`.
    ///
    /// The last path segment of `marker` names the item and is dropped.
    pub fn new(marker: &'static str, file: &'static str, line: u32) -> Self {
        let function = marker.rsplit_once("::").map_or(marker, |(path, _)| path);
        Self {
            function,
            file,
            line,
        }
    }

    /// Returns the path of the emitting function.
    pub const fn function(&self) -> &'static str {
        self.function
    }

    /// Decodes the origin into a call site, whether or not tracing is on.
    pub fn call_site(&self) -> Option<CallSite> {
        CallSite::from_symbol(self.function, Some(Path::new(self.file)), self.line)
    }
}

/// Decodes `origin` when tracing is enabled.
pub(crate) fn resolve_origin(origin: &Origin) -> Option<CallSite> {
    if !trace_enabled() {
        return None;
    }
    origin.call_site()
}

/// One logical frame; inlined calls contribute a frame each.
struct Frame {
    symbol: Option<String>,
    file: Option<std::path::PathBuf>,
    line: Option<u32>,
}

impl Frame {
    /// Compares the frame's debug position with `location`; `None` when the
    /// frame carries no position.
    fn agrees_with(&self, location: &Location<'_>) -> Option<bool> {
        let file = self.file.as_deref()?;
        let line = self.line.filter(|&line| line != 0)?;
        Some(
            line == location.line()
                && file.file_name() == Path::new(location.file()).file_name(),
        )
    }

    /// Decodes the frame using its own debug position.
    fn site(&self) -> Option<CallSite> {
        let line = self.line.filter(|&line| line != 0)?;
        CallSite::from_symbol(self.symbol.as_deref()?, Some(self.file.as_deref()?), line)
    }

    /// Decodes the frame's function, positioned at `location`.
    fn site_at(&self, location: &Location<'_>) -> Option<CallSite> {
        CallSite::from_symbol(
            self.symbol.as_deref()?,
            Some(Path::new(location.file())),
            location.line(),
        )
    }
}

/// Finds the frame at `target` above `anchor`, where the frame at `caller`
/// is expected to sit at `location`.
#[inline(never)]
fn walk(anchor: &str, location: &Location<'_>, caller: usize, target: usize) -> Option<CallSite> {
    let mut settled = false;
    let frames = frames_above(anchor, |frames| {
        let index = frames.len() - 1;
        let agrees = frames[index].agrees_with(location);
        if index == caller {
            settled = agrees != Some(false);
        } else if index > caller && agrees == Some(true) {
            settled = true;
        }
        settled && frames.len() > target
    });
    pick(&frames, location, caller, target)
}

/// Chooses the reported frame among `frames`, nearest first.
///
/// When the frame at `caller` disagrees with `location` and no frame further
/// up matches it, the caller was folded into a tail call and everything above
/// it is one position nearer. A frame further up that does match means the
/// caller location was forwarded through `#[track_caller]` functions, and the
/// stack positions stand.
fn pick(frames: &[Frame], location: &Location<'_>, caller: usize, target: usize) -> Option<CallSite> {
    let caller_frame = frames.get(caller)?;
    let direct = caller_frame.agrees_with(location) != Some(false);
    let present = direct
        || frames[caller + 1..]
            .iter()
            .any(|frame| frame.agrees_with(location) == Some(true));

    if !present {
        if target == caller {
            return None;
        }
        return frames.get(target - 1)?.site();
    }
    if target == caller && direct {
        return caller_frame.site_at(location);
    }
    frames.get(target)?.site()
}

/// Collects the logical frames above `anchor`, nearest first, until `enough`
/// returns true or the stack runs out.
fn frames_above(anchor: &str, mut enough: impl FnMut(&[Frame]) -> bool) -> Vec<Frame> {
    let mut anchored = false;
    let mut above = Vec::new();

    backtrace::trace(|raw| {
        let mut frames = Vec::new();
        backtrace::resolve_frame(raw, |symbol| {
            frames.push(Frame {
                symbol: symbol.name().map(|name| format!("{name:#}")),
                file: symbol.filename().map(Path::to_path_buf),
                line: symbol.lineno(),
            });
        });
        if frames.is_empty() {
            frames.push(Frame {
                symbol: None,
                file: None,
                line: None,
            });
        }

        for frame in frames {
            if anchored {
                above.push(frame);
                if enough(&above) {
                    return false;
                }
            } else if frame
                .symbol
                .as_deref()
                .is_some_and(|name| strip_disambiguators(name) == anchor)
            {
                anchored = true;
            }
        }
        true
    });

    above
}

/// Splits a demangled path into `(package, function)`.
fn decode_symbol(symbol: &str) -> Option<(String, String)> {
    let symbol = strip_disambiguators(symbol);
    let mut segments: Vec<String> = Vec::new();

    for (index, segment) in split_path(strip_hash(&symbol)).into_iter().enumerate() {
        match qualified_self(segment) {
            Some(inner) if index == 0 => {
                segments.extend(split_path(inner).into_iter().map(str::to_owned));
            }
            _ => segments.push(segment.to_owned()),
        }
    }

    while segments.last().is_some_and(|last| is_marker(last)) {
        segments.pop();
    }
    let function = segments.pop()?;
    while segments.last().is_some_and(|last| is_type_name(last)) {
        segments.pop();
    }
    let package = segments.pop().unwrap_or_default();
    Some((package, function))
}

/// Removes a trailing `::h0123456789abcdef` legacy hash.
fn strip_hash(symbol: &str) -> &str {
    match symbol.rsplit_once("::") {
        Some((head, tail))
            if tail.len() == 17
                && tail.starts_with('h')
                && tail[1..].bytes().all(|b| b.is_ascii_hexdigit()) =>
        {
            head
        }
        _ => symbol,
    }
}

/// Removes `[0123abcd]` crate disambiguators left by v0 demangling.
fn strip_disambiguators(symbol: &str) -> String {
    let mut out = String::with_capacity(symbol.len());
    let mut rest = symbol;
    while let Some(open) = rest.find('[') {
        let after = &rest[open + 1..];
        match after.find(']') {
            Some(close)
                if close > 0 && after[..close].bytes().all(|b| b.is_ascii_hexdigit()) =>
            {
                out.push_str(&rest[..open]);
                rest = &after[close + 1..];
            }
            _ => {
                out.push_str(&rest[..=open]);
                rest = after;
            }
        }
    }
    out.push_str(rest);
    out
}

/// Splits on `::` outside of angle brackets.
fn split_path(path: &str) -> Vec<&str> {
    let mut segments = Vec::new();
    let mut depth = 0usize;
    let mut start = 0;
    let bytes = path.as_bytes();
    let mut i = 0;
    while i < bytes.len() {
        match bytes[i] {
            b'<' => depth += 1,
            b'>' => depth = depth.saturating_sub(1),
            b':' if depth == 0 && bytes.get(i + 1) == Some(&b':') => {
                segments.push(&path[start..i]);
                i += 2;
                start = i;
                continue;
            }
            _ => {}
        }
        i += 1;
    }
    segments.push(&path[start..]);
    segments.retain(|segment| !segment.is_empty());
    segments
}

/// Extracts the self type from `<Type as Trait>` or `<Type>`.
fn qualified_self(segment: &str) -> Option<&str> {
    let inner = segment.strip_prefix('<')?.strip_suffix('>')?;
    Some(inner.split_once(" as ").map_or(inner, |(ty, _)| ty))
}

/// Closure, shim and generic-argument segments that name no function.
fn is_marker(segment: &str) -> bool {
    segment.starts_with('{') || segment.starts_with('<')
}

fn is_type_name(segment: &str) -> bool {
    segment
        .chars()
        .next()
        .is_some_and(|c| c.is_ascii_uppercase() || c == '[' || c == '&' || c == '(')
        || segment.starts_with("<impl ")
}

fn escape_percent(text: &str) -> std::borrow::Cow<'_, str> {
    if text.contains('%') {
        std::borrow::Cow::Owned(text.replace('%', "%%"))
    } else {
        std::borrow::Cow::Borrowed(text)
    }
}

#[cfg(test)]
mod tests;
