use ansi_cells::{
    AttrFlags, Attribute, ClearRegion, Color, ColorPair, CursorMove, Instruction, Renderer,
    Translator, TranslatorConfig, UNSET_INDEX,
};
use ansi_cells_test_utils::{init_test_logging, CallLogComparator, RecordingRenderer, RendererCall};
use pretty_assertions::assert_eq;

/// Translator with the default config and the construction calls already drained
fn translator() -> Translator<RecordingRenderer> {
    init_test_logging();
    let mut translator = Translator::new(RecordingRenderer::new()).unwrap();
    translator.renderer_mut().take_calls();
    translator
}

#[test]
fn construction_claims_pair_zero_for_the_base_pair() {
    let translator = Translator::new(RecordingRenderer::new()).unwrap();

    // Background first, and pair 0 itself is never redefined
    assert_eq!(
        translator.renderer().calls(),
        &[
            RendererCall::StartColor,
            RendererCall::DefineColor(0, Color::BLACK),
            RendererCall::DefineColor(1, Color::WHITE),
        ]
    );
    let base = ColorPair::new(Some(Color::WHITE), Some(Color::BLACK));
    assert_eq!(translator.table().get_index(base).unwrap(), 0);
    assert_eq!(translator.table().current_pair(), ColorPair::default());
}

#[test]
fn bare_config_touches_nothing() {
    let config = TranslatorConfig {
        start_color: false,
        base_pair: None,
    };
    let translator = Translator::with_config(RecordingRenderer::new(), config).unwrap();

    assert!(translator.renderer().calls().is_empty());
    assert!(translator.table().is_empty());
}

#[test]
fn attribute_round_trip() {
    let mut translator = translator();
    translator
        .process([Instruction::foreground(Color::RED)])
        .unwrap();
    translator.renderer_mut().take_calls();

    translator
        .process([
            Instruction::SetAttribute(Attribute::Bold),
            Instruction::text("Hi"),
            Instruction::SetAttribute(Attribute::Normal),
        ])
        .unwrap();

    assert_eq!(
        translator.renderer().calls(),
        &[
            RendererCall::AttributeOn(AttrFlags::BOLD),
            RendererCall::Write("Hi".to_string()),
            RendererCall::AttributeOn(AttrFlags::NORMAL),
        ]
    );
    assert_eq!(translator.table().foreground(), None);
    assert_eq!(translator.table().background(), None);
}

#[test]
fn off_attributes_disable_flags() {
    let mut translator = translator();
    translator
        .process([
            Instruction::SetAttribute(Attribute::NeitherBoldNorDim),
            Instruction::SetAttribute(Attribute::NotHidden),
        ])
        .unwrap();

    assert_eq!(
        translator.renderer().calls(),
        &[
            RendererCall::AttributeOff(AttrFlags::BOLD | AttrFlags::DIM),
            RendererCall::AttributeOff(AttrFlags::HIDDEN),
        ]
    );
}

#[test]
fn color_activation_follows_the_current_pair() {
    let mut translator = translator();
    translator
        .process([
            Instruction::foreground(Color::RED),
            Instruction::background(Color::BLACK),
        ])
        .unwrap();

    let table = translator.table();
    let red_only = table
        .get_index(ColorPair::new(Some(Color::RED), None))
        .unwrap();
    let red_on_black = table
        .get_index(ColorPair::new(Some(Color::RED), Some(Color::BLACK)))
        .unwrap();
    assert_eq!((red_only, red_on_black), (1, 2));

    assert_eq!(
        translator.renderer().drawing_calls(),
        vec![
            RendererCall::ActivateColorPair(1),
            RendererCall::ActivateColorPair(2),
        ]
    );

    // New colors and pairs reach the renderer before they are activated
    assert_eq!(
        translator.renderer().calls(),
        &[
            RendererCall::DefineColor(2, Color::RED),
            RendererCall::DefinePair(1, 2, UNSET_INDEX),
            RendererCall::ActivateColorPair(1),
            RendererCall::DefinePair(2, 2, 0),
            RendererCall::ActivateColorPair(2),
        ]
    );
}

#[test]
fn known_pairs_are_not_redefined() {
    let mut translator = translator();
    translator
        .process([
            Instruction::foreground(Color::GREEN),
            Instruction::foreground(None),
            Instruction::foreground(Color::GREEN),
        ])
        .unwrap();

    assert_eq!(
        translator.renderer().calls(),
        &[
            RendererCall::DefineColor(2, Color::GREEN),
            RendererCall::DefinePair(1, 2, UNSET_INDEX),
            RendererCall::ActivateColorPair(1),
            RendererCall::ActivateColorPair(UNSET_INDEX),
            RendererCall::ActivateColorPair(1),
        ]
    );
}

#[test]
fn clear_line_returns_to_column_zero_first() {
    let mut translator = translator();
    translator.renderer_mut().set_cursor(3, 7);

    translator
        .process([Instruction::SetClear(ClearRegion::Line)])
        .unwrap();

    assert_eq!(
        translator.renderer().calls(),
        &[RendererCall::MoveCursor(3, 0), RendererCall::EraseToLineEnd]
    );
}

#[test]
fn clear_regions_map_to_erase_primitives() {
    let mut translator = translator();
    translator
        .process([
            Instruction::SetClear(ClearRegion::Screen),
            Instruction::SetClear(ClearRegion::ScreenAfterCursor),
            Instruction::SetClear(ClearRegion::LineAfterCursor),
        ])
        .unwrap();

    assert_eq!(
        translator.renderer().calls(),
        &[
            RendererCall::EraseScreen,
            RendererCall::EraseToScreenEnd,
            RendererCall::EraseToLineEnd,
        ]
    );
}

#[test]
fn relative_cursor_adds_to_current_position() {
    let mut translator = translator();
    translator.renderer_mut().set_cursor(2, 2);

    translator
        .process([Instruction::SetCursor(CursorMove::Relative { rows: 1, cols: 1 })])
        .unwrap();

    assert_eq!(
        translator.renderer().calls(),
        &[RendererCall::MoveCursor(3, 3)]
    );
}

#[test]
fn absolute_cursor_is_set_directly() {
    let mut translator = translator();
    translator.renderer_mut().set_cursor(9, 9);

    translator
        .process([
            Instruction::SetCursor(CursorMove::Absolute { row: 1, col: 4 }),
            Instruction::SetCursor(CursorMove::Relative { rows: -3, cols: -1 }),
        ])
        .unwrap();

    assert_eq!(
        translator.renderer().calls(),
        &[RendererCall::MoveCursor(1, 4), RendererCall::MoveCursor(0, 3)]
    );
}

#[test]
fn add_str_decodes_and_applies() {
    let mut translator = translator();
    translator
        .add_str("\x1b[1;5;33mHello \x1b[2mWorld\x1b[0m!")
        .unwrap();

    let expected = [
        RendererCall::AttributeOn(AttrFlags::BOLD),
        RendererCall::AttributeOn(AttrFlags::BLINK),
        RendererCall::DefineColor(2, Color::YELLOW),
        RendererCall::DefinePair(1, 2, UNSET_INDEX),
        RendererCall::ActivateColorPair(1),
        RendererCall::Write("Hello ".to_string()),
        RendererCall::AttributeOn(AttrFlags::DIM),
        RendererCall::Write("World".to_string()),
        RendererCall::AttributeOn(AttrFlags::NORMAL),
        RendererCall::Write("!".to_string()),
    ];
    CallLogComparator::new()
        .compare_calls(&expected, translator.renderer().calls())
        .unwrap();
}

#[test]
fn add_str_keeps_parser_state_between_calls() {
    let mut translator = translator();
    translator.add_str("a\x1b[3").unwrap();
    translator.add_str("1mb").unwrap();

    CallLogComparator::new()
        .assert_subsequence(
            &[
                RendererCall::Write("a".to_string()),
                RendererCall::ActivateColorPair(1),
                RendererCall::Write("b".to_string()),
            ],
            translator.renderer().calls(),
        )
        .unwrap();
    assert_eq!(translator.table().foreground(), Some(Color::RED));
}

#[test]
fn passthrough_reaches_the_renderer() {
    let mut translator = translator();

    let position = translator.with_renderer(|renderer| {
        renderer.set_cursor(4, 2);
        renderer.cursor_position()
    });
    assert_eq!(position, (4, 2));

    let renderer = translator.into_renderer();
    assert!(renderer.calls().is_empty());
}

#[test]
fn translators_own_independent_tables() {
    let mut first = translator();
    let second = translator();

    first.process([Instruction::foreground(Color::BLUE)]).unwrap();

    assert!(first.table().contains(Color::BLUE));
    assert!(!second.table().contains(Color::BLUE));
}

#[test]
fn discard_through_translator_forces_fresh_index() {
    let mut translator = translator();
    translator
        .process([Instruction::foreground(Color::BLUE)])
        .unwrap();
    let pair = ColorPair::new(Some(Color::BLUE), None);
    assert_eq!(translator.table().get_index(pair).unwrap(), 1);

    translator.discard_pair(pair);
    translator.discard_color(Some(Color::BLUE));
    translator.renderer_mut().take_calls();

    translator
        .process([Instruction::foreground(Color::BLUE)])
        .unwrap();
    assert_eq!(
        translator.renderer().calls(),
        &[
            RendererCall::DefineColor(3, Color::BLUE),
            RendererCall::DefinePair(2, 3, UNSET_INDEX),
            RendererCall::ActivateColorPair(2),
        ]
    );
}
