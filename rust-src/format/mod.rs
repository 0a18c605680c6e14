//! Value formatting and tooltip templates.

mod template;
mod value;

#[allow(unused_imports)]
pub use template::{escape_html, TemplateRegistry};
#[allow(unused_imports)]
pub use value::{fmt_value, format_bytes, format_thousands};
