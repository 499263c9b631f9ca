use crossterm::style::{Attribute, Color, ContentStyle, Stylize};

use super::types::LineStyle;

/// Trait for converting line styles to terminal styles
pub trait AsContentStyle {
    fn as_content_style(&self) -> ContentStyle;
}

impl AsContentStyle for LineStyle {
    fn as_content_style(&self) -> ContentStyle {
        let style = ContentStyle::new();
        match self {
            LineStyle::Plain => style,
            LineStyle::Prompt => style.attribute(Attribute::Bold),
            LineStyle::Selected => style.attribute(Attribute::Reverse),
            LineStyle::Dim => style.attribute(Attribute::Dim),
            LineStyle::Filter => style.with(Color::Cyan),
            LineStyle::Warning => style.with(Color::Yellow),
        }
    }
}
