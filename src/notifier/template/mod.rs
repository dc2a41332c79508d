use handlebars::{no_escape, Handlebars, TemplateError};

pub const MESSAGE_TEMPLATE: &str = "message";

/// Registers `custom`, or the built-in announcement when none is given.
pub fn handlebars<'hb>(custom: Option<&str>) -> Result<Handlebars<'hb>, TemplateError> {
    let mut hb = Handlebars::new();
    hb.register_escape_fn(no_escape);

    let template = custom.unwrap_or(include_str!("./default_template.hbs"));

    hb.register_template_string(MESSAGE_TEMPLATE, template)?;

    Ok(hb)
}
