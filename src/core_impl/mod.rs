use super::*;

mod dom;
mod form_controls;
mod html;

pub(crate) use form_controls::{
    is_checkbox_input, is_form_element, is_radio_input, is_submit_control,
};
pub(crate) use html::{is_void_tag, parse_html};
