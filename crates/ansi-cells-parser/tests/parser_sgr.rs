use ansi_cells_parser::{parse, Attribute, Color, ColorRole, Instruction};
use pretty_assertions::assert_eq;

#[test]
fn parser_applies_sgr_attributes_and_colors() {
    // Bold + blink + yellow fg, then dim, then reset
    let instructions = parse("\x1b[1;5;33mHello \x1b[2mWorld\x1b[0m!");

    assert_eq!(
        instructions,
        vec![
            Instruction::SetAttribute(Attribute::Bold),
            Instruction::SetAttribute(Attribute::Blink),
            Instruction::foreground(Color::YELLOW),
            Instruction::text("Hello "),
            Instruction::SetAttribute(Attribute::Dim),
            Instruction::text("World"),
            Instruction::SetAttribute(Attribute::Normal),
            Instruction::text("!"),
        ]
    );
}

#[test]
fn empty_sgr_is_a_reset() {
    assert_eq!(
        parse("\x1b[m"),
        vec![Instruction::SetAttribute(Attribute::Normal)]
    );
}

#[test]
fn bright_and_default_colors() {
    let instructions = parse("\x1b[91;100m\x1b[39;49m");
    assert_eq!(
        instructions,
        vec![
            Instruction::foreground(Color::BRIGHT_RED),
            Instruction::background(Color::BRIGHT_BLACK),
            Instruction::foreground(None),
            Instruction::background(None),
        ]
    );
}

#[test]
fn extended_colors_semicolon_form() {
    let instructions = parse("\x1b[38;5;196m\x1b[48;2;10;20;30m");
    assert_eq!(
        instructions,
        vec![
            Instruction::foreground(Color::from_ansi256(196)),
            Instruction::background(Color::new(10, 20, 30)),
        ]
    );
}

#[test]
fn extended_colors_colon_form() {
    let instructions = parse("\x1b[38:2::1:2:3m\x1b[48:5:21m");
    assert_eq!(
        instructions,
        vec![
            Instruction::foreground(Color::new(1, 2, 3)),
            Instruction::background(Color::from_ansi256(21)),
        ]
    );
}

#[test]
fn underline_color_targets_its_own_role() {
    let instructions = parse("\x1b[58;5;1m\x1b[59m");
    assert_eq!(
        instructions,
        vec![
            Instruction::SetColor {
                role: ColorRole::Underline,
                color: Some(Color::RED),
            },
            Instruction::SetColor {
                role: ColorRole::Underline,
                color: None,
            },
        ]
    );
}

#[test]
fn off_renditions_are_decoded() {
    let instructions = parse("\x1b[22;23;24;25;27;28;29m");
    assert_eq!(
        instructions,
        vec![
            Instruction::SetAttribute(Attribute::NeitherBoldNorDim),
            Instruction::SetAttribute(Attribute::NotItalic),
            Instruction::SetAttribute(Attribute::NotUnderline),
            Instruction::SetAttribute(Attribute::NotBlink),
            Instruction::SetAttribute(Attribute::NotReverse),
            Instruction::SetAttribute(Attribute::NotHidden),
            Instruction::SetAttribute(Attribute::NotStrikethrough),
        ]
    );
}

#[test]
fn unknown_sgr_code_is_unrecognized() {
    let instructions = parse("\x1b[1;73m");
    assert_eq!(
        instructions,
        vec![
            Instruction::SetAttribute(Attribute::Bold),
            Instruction::Unrecognized("\x1b[73m".to_string()),
        ]
    );
}

#[test]
fn truncated_extended_color_is_unrecognized() {
    let instructions = parse("\x1b[38;5m");
    assert_eq!(
        instructions,
        vec![Instruction::Unrecognized("\x1b[38m".to_string())]
    );
}
