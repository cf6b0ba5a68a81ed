use super::*;
use std::hint::black_box;
use std::path::PathBuf;

#[inline(never)]
fn emitting_method(extra_depth: usize) -> Option<CallSite> {
    resolve(extra_depth)
}

#[inline(never)]
fn emitting_locator() -> String {
    locator(0)
}

#[inline(never)]
fn direct_caller() -> (Option<CallSite>, u32) {
    (emitting_method(0), line!())
}

#[inline(never)]
fn helper_one_level_down() -> Option<CallSite> {
    black_box(emitting_method(1))
}

#[inline(never)]
fn wrapped_caller() -> (Option<CallSite>, u32) {
    (helper_one_level_down(), line!())
}

#[inline(never)]
fn template_caller() -> (String, u32) {
    (emitting_locator(), line!())
}

#[test]
fn disabled_trace_resolves_nothing() {
    let _lock = test_support::serial();
    disable_trace();

    assert!(!trace_enabled());
    assert_eq!(emitting_method(0), None);
    assert_eq!(emitting_method(5), None);
    assert_eq!(emitting_locator(), "");
}

#[test]
fn enabled_trace_reports_the_callers_caller() {
    let _lock = test_support::serial();
    enable_trace();
    let (site, line) = direct_caller();
    disable_trace();

    let site = site.expect("frame resolves");
    assert_eq!(site.function(), "direct_caller");
    assert_eq!(site.package(), "tests");
    assert_eq!(site.file(), "tests.rs");
    assert_eq!(site.line(), line);
}

#[test]
fn extra_depth_skips_wrapping_helpers() {
    let _lock = test_support::serial();
    enable_trace();
    let (site, line) = wrapped_caller();
    disable_trace();

    let site = site.expect("frame resolves");
    assert_eq!(site.function(), "wrapped_caller");
    assert_eq!(site.line(), line);
}

#[test]
fn locator_renders_template_form() {
    let _lock = test_support::serial();
    enable_trace();
    let (locator, line) = template_caller();
    disable_trace();

    assert_eq!(locator, format!("{{tests}}[tests.rs]<template_caller>({line}): "));
}

#[test]
fn depth_beyond_the_stack_yields_nothing() {
    let _lock = test_support::serial();
    enable_trace();
    let site = emitting_method(100_000);
    disable_trace();

    assert_eq!(site, None);
}

#[test]
fn maximal_depth_yields_nothing() {
    let _lock = test_support::serial();
    enable_trace();
    let site = emitting_method(usize::MAX);
    let rendered = locator(usize::MAX);
    disable_trace();

    assert_eq!(site, None);
    assert_eq!(rendered, "");
}

#[test]
fn toggles_flip_the_flag() {
    let _lock = test_support::serial();
    enable_trace();
    assert!(trace_enabled());
    disable_trace();
    assert!(!trace_enabled());
}

#[test]
fn decodes_free_functions() {
    let site = CallSite::from_symbol(
        "server::handlers::accept",
        Some(Path::new("/work/server/src/handlers.rs")),
        12,
    )
    .expect("decodes");

    assert_eq!(site.package(), "handlers");
    assert_eq!(site.function(), "accept");
    assert_eq!(site.file(), "handlers.rs");
    assert_eq!(site.to_string(), "{handlers}[handlers.rs]<accept>(12): ");
}

#[test]
fn strips_receiver_types() {
    let site = CallSite::from_symbol("server::conn::Connection::close", None, 3).expect("decodes");
    assert_eq!(site.package(), "conn");
    assert_eq!(site.function(), "close");
    assert_eq!(site.file(), "");
}

#[test]
fn resolves_trait_impls_to_the_self_type_module() {
    let site = CallSite::from_symbol(
        "<server::conn::Connection as std::io::Write>::write",
        None,
        40,
    )
    .expect("decodes");
    assert_eq!(site.package(), "conn");
    assert_eq!(site.function(), "write");
}

#[test]
fn closures_report_their_enclosing_function() {
    let legacy = CallSite::from_symbol("app::worker::run::{{closure}}", None, 1).expect("decodes");
    assert_eq!(legacy.function(), "run");
    assert_eq!(legacy.package(), "worker");

    let v0 = CallSite::from_symbol("app::worker::run::{closure#0}", None, 1).expect("decodes");
    assert_eq!(v0.function(), "run");
}

#[test]
fn strips_hashes_and_disambiguators() {
    let legacy = CallSite::from_symbol("app::main::h0123456789abcdef", None, 9).expect("decodes");
    assert_eq!(legacy.package(), "app");
    assert_eq!(legacy.function(), "main");

    let v0 = CallSite::from_symbol("app[5f2c1a]::db::open", None, 9).expect("decodes");
    assert_eq!(v0.package(), "db");
    assert_eq!(v0.function(), "open");
}

#[test]
fn generic_arguments_are_not_function_names() {
    let site = CallSite::from_symbol("app::codec::decode::<u8>", None, 5).expect("decodes");
    assert_eq!(site.function(), "decode");
    assert_eq!(site.package(), "codec");
}

#[test]
fn single_segment_symbols_have_no_package() {
    let site = CallSite::from_symbol("main", None, 1).expect("decodes");
    assert_eq!(site.package(), "");
    assert_eq!(site.function(), "main");
}

#[test]
fn empty_symbols_do_not_decode() {
    assert_eq!(CallSite::from_symbol("", None, 1), None);
    assert_eq!(CallSite::from_symbol("{{closure}}", None, 1), None);
}

#[test]
fn template_doubles_percent_signs() {
    let site = CallSite::new("p%kg", "50%.rs", "f%", 7);
    assert_eq!(site.to_template(), "{p%%kg}[50%%.rs]<f%%>(7): ");
    assert_eq!(site.to_string(), "{p%kg}[50%.rs]<f%>(7): ");
}

#[test]
fn split_path_respects_angle_brackets() {
    assert_eq!(
        split_path("<a::B as c::D>::e"),
        vec!["<a::B as c::D>", "e"]
    );
    assert_eq!(split_path("a::b"), vec!["a", "b"]);
}

fn positioned(symbol: &str, line: u32) -> Frame {
    Frame {
        symbol: Some(symbol.to_owned()),
        file: Some(PathBuf::from("/build/logging/src/trace/tests.rs")),
        line: Some(line),
    }
}

fn unpositioned(symbol: &str) -> Frame {
    Frame {
        symbol: Some(symbol.to_owned()),
        file: None,
        line: None,
    }
}

#[test]
fn caller_at_its_location_is_reported_there() {
    let location = Location::caller();
    let frames = [
        positioned("logging::emit::Alert::log", 40),
        positioned("app::net::serve", location.line()),
        positioned("app::main", location.line() + 30),
    ];

    let site = pick(&frames, location, 1, 1).expect("caller resolves");
    assert_eq!(site.to_string(), format!("{{net}}[tests.rs]<serve>({}): ", location.line()));
}

#[test]
fn caller_folded_into_a_tail_call_is_not_misnamed() {
    let location = Location::caller();
    let frames = [
        positioned("logging::emit::Alert::log", 40),
        positioned("app::net::outer", location.line() + 2),
        positioned("app::main", location.line() + 30),
    ];

    assert_eq!(pick(&frames, location, 1, 1), None);

    let site = pick(&frames, location, 1, 2).expect("outer frame resolves");
    assert_eq!(site.function(), "outer");
    assert_eq!(site.line(), location.line() + 2);
}

#[test]
fn forwarded_location_keeps_stack_positions() {
    let location = Location::caller();
    let frames = [
        positioned("logging::emit::Alert::log", 40),
        positioned("app::net::Conn::report", location.line() + 9),
        positioned("app::net::serve", location.line()),
    ];

    let site = pick(&frames, location, 1, 1).expect("wrapper resolves");
    assert_eq!(site.function(), "report");
    assert_eq!(site.line(), location.line() + 9);
}

#[test]
fn frames_without_positions_borrow_only_the_callers_location() {
    let location = Location::caller();
    let frames = [
        unpositioned("logging::emit::Alert::log"),
        unpositioned("app::net::serve"),
        unpositioned("app::main"),
    ];

    let site = pick(&frames, location, 1, 1).expect("caller resolves");
    assert_eq!(site.function(), "serve");
    assert_eq!(site.file(), "tests.rs");
    assert_eq!(site.line(), location.line());

    assert_eq!(pick(&frames, location, 1, 2), None);
}

#[test]
fn shallow_stacks_pick_nothing() {
    let location = Location::caller();
    let frames = [positioned("logging::emit::Alert::log", 40)];
    assert_eq!(pick(&frames, location, 1, 1), None);
    assert_eq!(pick(&[], location, 0, 1), None);
}

#[test]
fn origin_drops_the_marker_segment() {
    let origin = Origin::new("app::net::serve::__origin", "src/net.rs", 4);
    assert_eq!(origin.function(), "app::net::serve");
    assert_eq!(
        origin.call_site().expect("decodes").to_string(),
        "{net}[net.rs]<serve>(4): "
    );
}

#[test]
fn macro_origin_names_the_enclosing_function() {
    let line = line!() + 1;
    let origin = crate::__alert_origin!();
    let site = origin.call_site().expect("decodes");
    assert_eq!(site.function(), "macro_origin_names_the_enclosing_function");
    assert_eq!(site.package(), "tests");
    assert_eq!(site.file(), "tests.rs");
    assert_eq!(site.line(), line);

    let in_closure = (|| crate::__alert_origin!())();
    let site = in_closure.call_site().expect("decodes");
    assert_eq!(site.function(), "macro_origin_names_the_enclosing_function");
}

#[test]
fn origins_resolve_only_while_tracing() {
    let _lock = test_support::serial();
    let origin = Origin::new("app::net::serve::__origin", "src/net.rs", 4);

    disable_trace();
    assert_eq!(resolve_origin(&origin), None);
    enable_trace();
    let site = resolve_origin(&origin);
    disable_trace();
    assert_eq!(site.map(|site| site.function().to_owned()).as_deref(), Some("serve"));
}
