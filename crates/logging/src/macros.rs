//! crates/logging/src/macros.rs
//! Emission shorthands and the [`Component`](crate::Component) derive macro.
//!
//! The emission macros locate themselves at compile time, so their locator
//! stays exact when the emitting call ends up in tail position.

/// Expands to the [`Origin`](crate::trace::Origin) of the enclosing function.
#[doc(hidden)]
#[macro_export]
macro_rules! __alert_origin {
    () => {{
        fn __origin() {}
        $crate::trace::Origin::new(
            ::core::any::type_name_of_val(&__origin),
            ::core::file!(),
            ::core::line!(),
        )
    }};
}

/// Writes a record through an [`Alert`](crate::Alert) if the level passes.
///
/// The format arguments are only evaluated when the gate admits the level.
///
/// # Examples
///
/// ```
/// use logging::{alert_log, sink, Alert};
///
/// let _guard = sink::redirect(std::io::sink(), sink::Decoration::Plain);
/// let alert = Alert::new(2);
/// alert_log!(alert, 2, "accepted {} connections", 3);
/// ```
#[macro_export]
macro_rules! alert_log {
    ($alert:expr, $level:expr, $($arg:tt)+) => {
        match (&$alert, $level) {
            (alert, level) => {
                if alert.enabled(level) {
                    alert.log_at($crate::__alert_origin!(), level, ::core::format_args!($($arg)+));
                }
            }
        }
    };
}

/// Writes the rendered message to standard output if the level passes.
///
/// The format arguments are only evaluated when the gate admits the level.
#[macro_export]
macro_rules! alert_print {
    ($alert:expr, $level:expr, $($arg:tt)+) => {
        match (&$alert, $level) {
            (alert, level) => {
                if alert.enabled(level) {
                    alert.print_at($crate::__alert_origin!(), level, ::core::format_args!($($arg)+));
                }
            }
        }
    };
}

/// Renders the message if the level passes, evaluating to a `String`.
///
/// Evaluates to an empty string without touching the format arguments when
/// the level is gated out.
///
/// ```
/// use logging::{alert_format, Alert};
///
/// fn expensive() -> String {
///     panic!("not evaluated");
/// }
///
/// let alert = Alert::new(1);
/// assert_eq!(alert_format!(alert, 1, "{}-{}", "a", 1), "a-1");
/// assert_eq!(alert_format!(alert, 2, "{}", expensive()), "");
/// ```
#[macro_export]
macro_rules! alert_format {
    ($alert:expr, $level:expr, $($arg:tt)+) => {
        match (&$alert, $level) {
            (alert, level) => {
                if alert.enabled(level) {
                    alert.format_at($crate::__alert_origin!(), level, ::core::format_args!($($arg)+))
                } else {
                    ::std::string::String::new()
                }
            }
        }
    };
}

/// Writes a record if the level passes, then terminates the process.
///
/// See [`Alert::fatal`](crate::Alert::fatal) for the exit status.
#[macro_export]
macro_rules! alert_fatal {
    ($alert:expr, $level:expr, $($arg:tt)+) => {
        $alert.fatal_at($crate::__alert_origin!(), $level, ::core::format_args!($($arg)+))
    };
}

/// Implements [`Component`](crate::Component) for a struct by listing its
/// [`Alert`](crate::Alert) fields.
///
/// Each field is visited under its own name unless renamed with `as "Name"`.
///
/// ```
/// use logging::{impl_component, Alert, Component};
///
/// struct Proxy {
///     level: Alert,
///     upstream: Alert,
/// }
///
/// impl_component!(Proxy { level as "Level", upstream });
///
/// let proxy = Proxy { level: Alert::new(1), upstream: Alert::new(2) };
/// let mut seen = Vec::new();
/// proxy.visit_alerts(&mut |name, alert| seen.push((name.to_owned(), alert.get())));
/// assert_eq!(seen, [("Level".to_owned(), 1), ("upstream".to_owned(), 2)]);
/// ```
#[macro_export]
macro_rules! impl_component {
    (@name $field:ident as $name:literal) => {
        $name
    };
    (@name $field:ident) => {
        ::core::stringify!($field)
    };
    ($ty:ty { $($field:ident $(as $name:literal)?),* $(,)? }) => {
        impl $crate::Component for $ty {
            fn visit_alerts(&self, visit: &mut dyn FnMut(&str, &$crate::Alert)) {
                $(
                    visit($crate::impl_component!(@name $field $(as $name)?), &self.$field);
                )*
            }
        }
    };
}
