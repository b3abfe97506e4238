//! Error handling tests for the translator

use ansi_cells::{
    Attribute, ClearRegion, Color, ColorRole, Instruction, TranslateError, Translator,
    TranslatorConfig,
};
use ansi_cells_test_utils::{RecordingRenderer, RendererCall};
use pretty_assertions::assert_eq;

fn translator() -> Translator<RecordingRenderer> {
    let mut translator = Translator::new(RecordingRenderer::new()).unwrap();
    translator.renderer_mut().take_calls();
    translator
}

#[test]
fn unrecognized_instruction_stops_processing() {
    let mut translator = translator();

    let err = translator
        .process([
            Instruction::text("a"),
            Instruction::Unrecognized("\x1b[?25l".to_string()),
            Instruction::text("b"),
        ])
        .unwrap_err();

    assert!(matches!(err, TranslateError::UnrecognizedInstruction(ref raw) if raw == "\x1b[?25l"));
    assert_eq!(
        translator.renderer().calls(),
        &[RendererCall::Write("a".to_string())]
    );
}

#[test]
fn unsupported_attribute_keeps_earlier_output() {
    let mut translator = translator();

    let err = translator.add_str("x\x1b[9my").unwrap_err();

    assert!(matches!(
        err,
        TranslateError::UnsupportedAttribute(Attribute::Strikethrough)
    ));
    assert_eq!(
        translator.renderer().calls(),
        &[RendererCall::Write("x".to_string())]
    );
}

#[test]
fn underline_color_is_an_unknown_role() {
    let mut translator = translator();

    let err = translator.add_str("\x1b[58;5;1mz").unwrap_err();

    assert!(matches!(err, TranslateError::UnknownRole(ColorRole::Underline)));
    assert!(translator.renderer().calls().is_empty());
    assert!(!translator.table().contains(Color::RED));
}

#[test]
fn unsupported_clear_regions() {
    for region in [
        ClearRegion::ScreenBeforeCursor,
        ClearRegion::Scrollback,
        ClearRegion::LineBeforeCursor,
    ] {
        let mut translator = translator();
        let err = translator
            .process([Instruction::SetClear(region)])
            .unwrap_err();
        assert!(matches!(err, TranslateError::UnsupportedClearRegion(r) if r == region));
        assert!(translator.renderer().calls().is_empty());
    }
}

#[test]
fn missing_base_pair_leaves_slot_zero_reserved() {
    let config = TranslatorConfig {
        start_color: true,
        base_pair: None,
    };
    let mut translator = Translator::with_config(RecordingRenderer::new(), config).unwrap();

    let err = translator
        .process([Instruction::foreground(Color::RED)])
        .unwrap_err();

    assert!(matches!(err, TranslateError::ReservedIndex(0)));
    // The color itself was still registered and propagated
    assert_eq!(
        translator.renderer().calls(),
        &[
            RendererCall::StartColor,
            RendererCall::DefineColor(0, Color::RED),
        ]
    );
}

#[test]
fn renderer_failures_surface_as_render_errors() {
    let mut translator = translator();
    translator.renderer_mut().fail_writes();

    let err = translator
        .process([
            Instruction::SetAttribute(Attribute::Bold),
            Instruction::text("lost"),
            Instruction::SetAttribute(Attribute::Italic),
        ])
        .unwrap_err();

    assert!(matches!(err, TranslateError::Render(_)));
    assert_eq!(translator.renderer().calls().len(), 1);
}

#[test]
fn error_messages_are_descriptive() {
    let err = TranslateError::ReservedIndex(0);
    assert_eq!(err.to_string(), "Cannot redefine color pair 0");

    let err = TranslateError::UnsupportedClearRegion(ClearRegion::Scrollback);
    assert_eq!(err.to_string(), "Unsupported clear region: Scrollback");
}

#[test]
fn failed_call_leaves_nothing_for_the_next_one() {
    let mut translator = translator();

    // The red foreground shares a sequence with the rejected strikethrough
    let err = translator.add_str("\x1b[9;31m").unwrap_err();
    assert!(matches!(
        err,
        TranslateError::UnsupportedAttribute(Attribute::Strikethrough)
    ));
    assert!(translator.renderer().calls().is_empty());

    translator.add_str("x").unwrap();
    assert_eq!(
        translator.renderer().calls(),
        &[RendererCall::Write("x".to_string())]
    );
    assert!(!translator.table().contains(Color::RED));
}

#[test]
fn text_queued_before_a_failure_is_dropped() {
    let mut translator = translator();

    translator.add_str("a\x1b[9mb").unwrap_err();
    translator.add_str("c").unwrap();

    assert_eq!(
        translator.renderer().calls(),
        &[
            RendererCall::Write("a".to_string()),
            RendererCall::Write("c".to_string()),
        ]
    );
}
