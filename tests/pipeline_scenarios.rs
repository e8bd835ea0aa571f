//! End-to-end scenarios through the full default filter chain: telnet,
//! ANSI, decoding, flow control, triggers.

use std::cell::RefCell;
use std::rc::Rc;

use spyrit::chunk::{Chunk, ChunkMask, FlowControlCode};
use spyrit::color::Rgb;
use spyrit::config::{PipelineConfig, TriggerSpec};
use spyrit::format::{FormatDelta, FormatProperty, FormatValue, ResolvedFormat};
use spyrit::format_stack::{FormatStack, LayerId};
use spyrit::pipeline::Pipeline;
use spyrit::trigger::{ActionParams, PatternKind, TriggerEngine};

// ============================================================================
// Helpers
// ============================================================================

fn collecting_pipeline(
    engine: Option<Rc<RefCell<TriggerEngine>>>,
    mask: ChunkMask,
) -> (Pipeline, Rc<RefCell<Vec<Chunk>>>) {
    let mut pipeline = Pipeline::with_defaults(PipelineConfig::default(), engine);
    let seen = Rc::new(RefCell::new(Vec::new()));
    let clone = Rc::clone(&seen);
    pipeline.add_sink(
        Box::new(move |chunk: &Chunk| clone.borrow_mut().push(chunk.clone())),
        mask,
    );
    (pipeline, seen)
}

fn highlight_engine(pattern: &str, token: &str, format: &str) -> Rc<RefCell<TriggerEngine>> {
    let mut engine = TriggerEngine::without_builtins();
    let mut params = ActionParams::new();
    params.insert(token.to_string(), format.to_string());
    engine
        .add_spec(&TriggerSpec {
            patterns: vec![(PatternKind::Smart, pattern.to_string())],
            actions: vec![("highlights".to_string(), params)],
        })
        .unwrap();
    Rc::new(RefCell::new(engine))
}

const DIM_RED: Rgb = Rgb::new(0x80, 0x00, 0x00);
const BRIGHT_RED: Rgb = Rgb::new(0xff, 0x00, 0x00);

// ============================================================================
// ANSI across packet boundaries
// ============================================================================

#[test]
fn ansi_sequence_split_across_packets() {
    let (mut pipeline, seen) = collecting_pipeline(None, ChunkMask::TEXT | ChunkMask::ANSI);

    pipeline.feed_bytes(b"hello\x1b[");
    assert_eq!(*seen.borrow(), vec![Chunk::Text("hello".into())]);

    pipeline.feed_bytes(b"31mred\x1b[m");
    assert_eq!(
        *seen.borrow(),
        vec![
            Chunk::Text("hello".into()),
            Chunk::Ansi(FormatDelta::color(DIM_RED)),
            Chunk::Text("red".into()),
            Chunk::Ansi(FormatDelta::new()),
        ]
    );
}

#[test]
fn bold_upgrades_current_color_pair() {
    let (mut pipeline, seen) = collecting_pipeline(None, ChunkMask::TEXT | ChunkMask::ANSI);

    pipeline.feed_bytes(b"\x1b[31mred\x1b[1mBRIGHT\x1b[m");
    assert_eq!(
        *seen.borrow(),
        vec![
            Chunk::Ansi(FormatDelta::color(DIM_RED)),
            Chunk::Text("red".into()),
            Chunk::Ansi(FormatDelta::bold(true).with_color(BRIGHT_RED)),
            Chunk::Text("BRIGHT".into()),
            Chunk::Ansi(FormatDelta::new()),
        ]
    );
}

// ============================================================================
// Telnet escapes
// ============================================================================

#[test]
fn doubled_iac_decodes_as_literal_byte() {
    let (mut pipeline, seen) = collecting_pipeline(None, ChunkMask::TEXT);

    // 0xFF is U+00FF in the default latin1 decoding.
    pipeline.feed_bytes(b"\xff\xffA\r\n");
    let text: String = seen
        .borrow()
        .iter()
        .filter_map(|c| match c {
            Chunk::Text(s) => Some(s.as_str()),
            _ => None,
        })
        .collect();
    assert_eq!(text, "\u{ff}A");
}

#[test]
fn outbound_escapes_iac_and_fixes_crlf() {
    let (pipeline, _) = collecting_pipeline(None, ChunkMask::all());
    assert_eq!(
        pipeline.format_outbound(vec![0xFF, b'h', b'i', b'\n']),
        vec![0xFF, 0xFF, b'h', b'i', b'\r', b'\n']
    );
}

// ============================================================================
// Prompt sweep
// ============================================================================

#[test]
fn prompt_sweep_flushes_partial_line() {
    let engine = Rc::new(RefCell::new(TriggerEngine::without_builtins()));
    let (mut pipeline, seen) =
        collecting_pipeline(Some(engine), ChunkMask::TEXT | ChunkMask::PROMPT_SWEEP);

    pipeline.feed_bytes(b"login: ");
    // The trigger filter is still buffering the unterminated line.
    assert!(seen.borrow().is_empty());
    assert!(pipeline.prompt_deadline().is_some());

    pipeline.sweep_prompt();
    assert_eq!(
        *seen.borrow(),
        vec![Chunk::Text("login: ".into()), Chunk::PromptSweep]
    );
    assert!(pipeline.prompt_deadline().is_none());
}

// ============================================================================
// Triggers
// ============================================================================

#[test]
fn highlight_splices_around_token() {
    let engine = highlight_engine("[player] pages: *", "player", "bold; color: #ffffff");
    let (mut pipeline, seen) = collecting_pipeline(
        Some(engine),
        ChunkMask::TEXT | ChunkMask::HIGHLIGHT | ChunkMask::FLOW_CONTROL,
    );

    pipeline.feed_bytes(b"Alice pages: hi\r\n");

    let delta = FormatDelta::bold(true).with_color(Rgb::new(0xff, 0xff, 0xff));
    assert_eq!(
        *seen.borrow(),
        vec![
            Chunk::Highlight(1, delta),
            Chunk::Text("Alice".into()),
            Chunk::Highlight(1, FormatDelta::new()),
            Chunk::Text(" pages: hi".into()),
            Chunk::FlowControl(FlowControlCode::CarriageReturn),
            Chunk::FlowControl(FlowControlCode::Linefeed),
        ]
    );
}

#[test]
fn gag_removes_line_but_keeps_ansi() {
    let mut engine = TriggerEngine::without_builtins();
    engine
        .add_spec(&TriggerSpec {
            patterns: vec![(PatternKind::Smart, "spoiler".to_string())],
            actions: vec![("gag".to_string(), ActionParams::new())],
        })
        .unwrap();
    let (mut pipeline, seen) = collecting_pipeline(
        Some(Rc::new(RefCell::new(engine))),
        ChunkMask::TEXT | ChunkMask::ANSI | ChunkMask::FLOW_CONTROL | ChunkMask::HIGHLIGHT,
    );

    pipeline.feed_bytes(b"\x1b[31mspoiler ahead\r\n");
    assert_eq!(*seen.borrow(), vec![Chunk::Ansi(FormatDelta::color(DIM_RED))]);
}

#[test]
fn builtin_url_trigger_survives_the_full_chain() {
    let engine = Rc::new(RefCell::new(TriggerEngine::new()));
    let (mut pipeline, seen) =
        collecting_pipeline(Some(engine), ChunkMask::TEXT | ChunkMask::HIGHLIGHT);

    pipeline.feed_bytes(b"see https://example.com for more\r\n");

    let chunks = seen.borrow();
    let open = chunks
        .iter()
        .find_map(|c| match c {
            Chunk::Highlight(_, d) if !d.is_empty() => Some(d),
            _ => None,
        })
        .expect("URL highlight opened");
    assert_eq!(
        open.get(FormatProperty::Href),
        Some(&Some(FormatValue::Url("https://example.com".to_string())))
    );
    let text: String = chunks
        .iter()
        .filter_map(|c| match c {
            Chunk::Text(s) => Some(s.as_str()),
            _ => None,
        })
        .collect();
    assert_eq!(text, "see https://example.com for more");
}

// ============================================================================
// Encoding switch
// ============================================================================

#[test]
fn encoding_change_applies_to_subsequent_bytes() {
    let (mut pipeline, seen) = collecting_pipeline(None, ChunkMask::TEXT);

    pipeline.feed_bytes(b"caf\xe9\r\n");
    pipeline.notify(spyrit::bus::ENCODING_CHANGED, "utf-8");
    pipeline.feed_bytes(b"caf\xc3\xa9\r\n");

    let text: String = seen
        .borrow()
        .iter()
        .filter_map(|c| match c {
            Chunk::Text(s) => Some(s.as_str()),
            _ => None,
        })
        .collect();
    assert_eq!(text, "cafécafé");
}

// ============================================================================
// Rendering the chunk stream through the format stack
// ============================================================================

#[test]
fn format_stack_tracks_ansi_and_highlights() {
    let engine = highlight_engine("[who] waves", "who", "color: #0000ff");
    let (mut pipeline, seen) = collecting_pipeline(
        Some(engine),
        ChunkMask::TEXT | ChunkMask::ANSI | ChunkMask::HIGHLIGHT,
    );

    pipeline.feed_bytes(b"\x1b[31mBob waves\r\n");

    // Replay the stream into a renderer-style format resolution.
    let mut stack = FormatStack::new();
    let mut format = ResolvedFormat::new();
    let mut styled = Vec::new();
    for chunk in seen.borrow().iter() {
        match chunk {
            Chunk::Ansi(delta) => stack.apply(&mut format, LayerId::Ansi, delta),
            Chunk::Highlight(id, delta) => {
                stack.apply(&mut format, LayerId::Ephemeral(*id), delta);
            }
            Chunk::Text(text) => {
                styled.push((text.clone(), format.get(FormatProperty::Color).cloned()));
            }
            _ => {}
        }
    }

    assert_eq!(
        styled,
        vec![
            // Inside the highlight the trigger color overrides ANSI red.
            ("Bob".to_string(), Some(FormatValue::Color(Rgb::new(0, 0, 0xff)))),
            // After the close, the ANSI red is restored.
            (" waves".to_string(), Some(FormatValue::Color(DIM_RED))),
        ]
    );
}
