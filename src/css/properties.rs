//! Property parsing: token values → typed property values.
//!
//! Parses declaration values into the typed fields on
//! [`crate::css::styles::Styles`].

use crate::css::model::DeclarationValue;
use crate::css::styles::*;
use crate::geometry::Spacing;

/// Errors from property parsing.
#[derive(Debug, thiserror::Error)]
pub enum PropertyError {
    #[error("unknown property: {0}")]
    UnknownProperty(String),
    #[error("invalid value for {property}: {message}")]
    InvalidValue { property: String, message: String },
}

fn invalid(property: &str, message: impl Into<String>) -> PropertyError {
    PropertyError::InvalidValue {
        property: property.into(),
        message: message.into(),
    }
}

/// Parse a non-negative whole number of cells.
fn parse_cells(value: &DeclarationValue, property: &str) -> Result<u16, PropertyError> {
    match value {
        DeclarationValue::Number(n) if *n >= 0.0 && n.fract() == 0.0 && *n <= u16::MAX as f32 => {
            Ok(*n as u16)
        }
        other => Err(invalid(
            property,
            format!("expected a whole number of cells, got: {other:?}"),
        )),
    }
}

/// Parse 1-4 cell values into a [`Spacing`] (CSS box shorthand).
pub fn parse_spacing(values: &[DeclarationValue], property: &str) -> Result<Spacing, PropertyError> {
    let cells = values
        .iter()
        .map(|v| parse_cells(v, property).map(i32::from))
        .collect::<Result<Vec<_>, _>>()?;
    Spacing::from_shorthand(&cells)
        .ok_or_else(|| invalid(property, format!("expected 1-4 values, got {}", cells.len())))
}

/// Extract a single identifier from values.
fn require_single_ident<'a>(
    values: &'a [DeclarationValue],
    property: &str,
) -> Result<&'a str, PropertyError> {
    match values {
        [DeclarationValue::Ident(name)] => Ok(name.as_str()),
        [other] => Err(invalid(property, format!("expected identifier, got: {other:?}"))),
        _ => Err(invalid(
            property,
            format!("expected 1 value, got {}", values.len()),
        )),
    }
}

/// Extract a color value (name or hex color) from values.
fn require_color_value(values: &[DeclarationValue], property: &str) -> Result<String, PropertyError> {
    match values {
        [DeclarationValue::Ident(name)] => Ok(name.clone()),
        [DeclarationValue::Color(hex)] => Ok(format!("#{hex}")),
        [other] => Err(invalid(
            property,
            format!("expected color name or hex color, got: {other:?}"),
        )),
        _ => Err(invalid(
            property,
            format!("expected 1 color value, got {}", values.len()),
        )),
    }
}

fn require_single_cells(values: &[DeclarationValue], property: &str) -> Result<u16, PropertyError> {
    match values {
        [value] => parse_cells(value, property),
        _ => Err(invalid(
            property,
            format!("expected 1 value, got {}", values.len()),
        )),
    }
}

/// Parse text-style values: one or more of bold, dim, italic, underline, reverse, none.
fn parse_text_style(values: &[DeclarationValue]) -> Result<TextStyleFlags, PropertyError> {
    let mut flags = TextStyleFlags::default();

    for value in values {
        let DeclarationValue::Ident(name) = value else {
            return Err(invalid(
                "text-style",
                format!("expected text style identifier, got: {value:?}"),
            ));
        };
        match name.as_str() {
            "bold" => flags.bold = Some(true),
            "dim" => flags.dim = Some(true),
            "italic" => flags.italic = Some(true),
            "underline" => flags.underline = Some(true),
            "reverse" => flags.reverse = Some(true),
            "none" => {
                flags = TextStyleFlags {
                    bold: Some(false),
                    dim: Some(false),
                    italic: Some(false),
                    underline: Some(false),
                    reverse: Some(false),
                };
            }
            other => return Err(invalid("text-style", format!("unknown text style: {other}"))),
        }
    }

    Ok(flags)
}

/// Apply a CSS declaration (property name + values) to a mutable [`Styles`].
///
/// Returns an error for unknown properties or invalid values; `styles` is left
/// untouched in that case.
pub fn apply_declaration(
    styles: &mut Styles,
    property: &str,
    values: &[DeclarationValue],
) -> Result<(), PropertyError> {
    match property {
        "all" => {
            styles.all = Some(match require_single_ident(values, property)? {
                "initial" => AllKeyword::Initial,
                "inherit" => AllKeyword::Inherit,
                "unset" => AllKeyword::Unset,
                other => {
                    return Err(invalid(
                        property,
                        format!("expected initial|inherit|unset, got: {other}"),
                    ))
                }
            });
        }
        "display" => {
            styles.display = Some(match require_single_ident(values, property)? {
                "block" => Display::Block,
                "none" => Display::None,
                other => return Err(invalid(property, format!("expected block|none, got: {other}"))),
            });
        }
        "layout" => {
            styles.layout = Some(match require_single_ident(values, property)? {
                "vertical" => LayoutDirection::Vertical,
                "horizontal" => LayoutDirection::Horizontal,
                other => {
                    return Err(invalid(
                        property,
                        format!("expected vertical|horizontal, got: {other}"),
                    ))
                }
            });
        }
        "width" => styles.width = Some(require_single_cells(values, property)?),
        "height" => styles.height = Some(require_single_cells(values, property)?),
        "margin" => styles.margin = Some(parse_spacing(values, property)?),
        "padding" => styles.padding = Some(parse_spacing(values, property)?),
        "color" => styles.color = Some(require_color_value(values, property)?),
        "background" => styles.background = Some(require_color_value(values, property)?),
        "text-align" => {
            styles.text_align = Some(match require_single_ident(values, property)? {
                "left" => TextAlign::Left,
                "center" => TextAlign::Center,
                "right" => TextAlign::Right,
                other => {
                    return Err(invalid(
                        property,
                        format!("expected left|center|right, got: {other}"),
                    ))
                }
            });
        }
        "text-style" => styles.text_style = Some(parse_text_style(values)?),
        other => return Err(PropertyError::UnknownProperty(other.into())),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ident(s: &str) -> DeclarationValue {
        DeclarationValue::Ident(s.into())
    }

    fn num(n: f32) -> DeclarationValue {
        DeclarationValue::Number(n)
    }

    fn apply(property: &str, values: &[DeclarationValue]) -> Result<Styles, PropertyError> {
        let mut styles = Styles::new();
        apply_declaration(&mut styles, property, values)?;
        Ok(styles)
    }

    #[test]
    fn all_keywords() {
        assert_eq!(apply("all", &[ident("initial")]).unwrap().all, Some(AllKeyword::Initial));
        assert_eq!(apply("all", &[ident("inherit")]).unwrap().all, Some(AllKeyword::Inherit));
        assert_eq!(apply("all", &[ident("unset")]).unwrap().all, Some(AllKeyword::Unset));
        assert!(apply("all", &[ident("revert")]).is_err());
    }

    #[test]
    fn layout_direction() {
        let s = apply("layout", &[ident("horizontal")]).unwrap();
        assert_eq!(s.layout, Some(LayoutDirection::Horizontal));
        assert!(apply("layout", &[ident("grid")]).is_err());
    }

    #[test]
    fn padding_shorthand() {
        let s = apply("padding", &[num(0.0), num(2.0)]).unwrap();
        assert_eq!(s.padding, Some(Spacing::new(0, 2, 0, 2)));

        let s = apply("margin", &[num(1.0)]).unwrap();
        assert_eq!(s.margin, Some(Spacing::all(1)));

        let s = apply("margin", &[num(1.0), num(2.0), num(3.0), num(4.0)]).unwrap();
        assert_eq!(s.margin, Some(Spacing::new(1, 2, 3, 4)));
    }

    #[test]
    fn spacing_rejects_bad_values() {
        assert!(apply("padding", &[]).is_err());
        assert!(apply("padding", &vec![num(1.0); 5]).is_err());
        assert!(apply("padding", &[num(-1.0)]).is_err());
        assert!(apply("padding", &[num(0.5)]).is_err());
        assert!(apply("padding", &[ident("auto")]).is_err());
    }

    #[test]
    fn width_and_height() {
        assert_eq!(apply("width", &[num(12.0)]).unwrap().width, Some(12));
        assert_eq!(apply("height", &[num(3.0)]).unwrap().height, Some(3));
        assert!(apply("width", &[num(1.0), num(2.0)]).is_err());
    }

    #[test]
    fn colors() {
        let s = apply("background", &[DeclarationValue::Color("3498db".into())]).unwrap();
        assert_eq!(s.background, Some("#3498db".into()));
        let s = apply("color", &[ident("white")]).unwrap();
        assert_eq!(s.color, Some("white".into()));
        assert!(apply("color", &[num(1.0)]).is_err());
    }

    #[test]
    fn text_style_flags() {
        let s = apply("text-style", &[ident("bold"), ident("underline")]).unwrap();
        let flags = s.text_style.unwrap();
        assert_eq!(flags.bold, Some(true));
        assert_eq!(flags.underline, Some(true));
        assert!(flags.italic.is_none());

        let none = apply("text-style", &[ident("none")]).unwrap().text_style.unwrap();
        assert_eq!(none.bold, Some(false));

        assert!(apply("text-style", &[ident("blink")]).is_err());
    }

    #[test]
    fn text_align_and_display() {
        assert_eq!(
            apply("text-align", &[ident("center")]).unwrap().text_align,
            Some(TextAlign::Center)
        );
        assert_eq!(
            apply("display", &[ident("none")]).unwrap().display,
            Some(Display::None)
        );
    }

    #[test]
    fn unknown_property() {
        assert!(matches!(
            apply("float", &[ident("left")]),
            Err(PropertyError::UnknownProperty(name)) if name == "float"
        ));
    }

    #[test]
    fn error_leaves_styles_untouched() {
        let mut styles = Styles::new();
        styles.color = Some("red".into());
        let _ = apply_declaration(&mut styles, "color", &[num(3.0)]);
        assert_eq!(styles.color, Some("red".into()));
    }
}
